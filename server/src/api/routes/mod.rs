//! API route handlers

pub mod accounts;
pub mod brand_deals;
pub mod catalog;
pub mod health;
pub mod influencers;
pub mod reports;
pub mod tables;
