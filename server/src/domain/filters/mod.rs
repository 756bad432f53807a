//! Influencer filter system
//!
//! Turns caller-supplied `{attribute, operator, value, conjunction}` records
//! into a parameterized WHERE fragment. Validation (`parser`) always runs
//! before rendering (`builder`).
//!
//! ## Usage
//!
//! ```
//! use brandlink_server::domain::filters::{
//!     FilterCondition, FilterMode, FilterSet, QueryBuilder, parse_filters,
//! };
//!
//! let raw = vec![FilterCondition::new("age", ">", "25")];
//! if let FilterSet::Where(conditions) = parse_filters(&raw).unwrap() {
//!     let fragment = QueryBuilder::new(FilterMode::Strict).build(&conditions);
//!     assert_eq!(fragment.where_clause(), "age > :vals0");
//! }
//! ```

mod builder;
mod parser;
mod types;

pub use builder::QueryBuilder;
pub use parser::parse_filters;
pub use types::{
    Attribute, BIND_KEY_PREFIX, Conditions, Conjunction, FilterCondition, FilterError, FilterMode,
    FilterSet, FilterValue, NormalizedCondition, Operator, QueryFragment, bind_key,
};
