//! Brandlink server
//!
//! HTTP backend for the influencer and brand-deal dashboard: fixed-table
//! listings, row edits, filtered influencer search, catalog browsing and a
//! handful of join/aggregation reports over SQLite or PostgreSQL.

pub mod api;
pub mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;
