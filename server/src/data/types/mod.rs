//! Shared data types for all database backends
//!
//! Values and records that cross the backend boundary, so SQLite and
//! PostgreSQL see the same model.

mod bind;
mod records;

pub use bind::{BindValue, Row};
pub use records::{AccountInsert, BrandDealUpdate};
