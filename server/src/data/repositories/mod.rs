//! Backend-neutral repositories
//!
//! Every statement is written once with `:name` binds and runs through a
//! [`QueryExecutor`](crate::data::QueryExecutor), so the same code serves
//! SQLite and PostgreSQL. Values always travel as bind parameters; the only
//! identifiers spliced into SQL text come from the filter allow-list or from
//! catalog metadata.

pub mod account;
pub mod brand_deal;
pub mod catalog;
pub mod influencer;
pub mod reports;
pub mod tables;

pub use account::insert_account;
pub use brand_deal::update_brand_deal;
pub use catalog::{list_columns, list_tables, projection};
pub use influencer::{delete_influencer, filter_influencers};
pub use reports::{
    above_average_followers, accounts_on_every_platform, average_age_by_niche,
    deals_above_production_cost, high_engagement_niches,
};
pub use tables::{FixedTable, fetch_table};
