//! Domain logic
//!
//! - `filters` - Dynamic influencer filter parsing and WHERE-clause building

pub mod filters;
