//! Bind parameters and untyped result rows

use chrono::NaiveDate;

use crate::domain::filters::FilterValue;

/// One positional result row, cells in SELECT order
pub type Row = Vec<serde_json::Value>;

/// Parameter value bound into a statement
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Integer(i64),
    Real(f64),
    Text(String),
    Date(NaiveDate),
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for BindValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<NaiveDate> for BindValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<FilterValue> for BindValue {
    fn from(v: FilterValue) -> Self {
        match v {
            FilterValue::Integer(i) => Self::Integer(i),
            FilterValue::Real(f) => Self::Real(f),
            FilterValue::Text(s) => Self::Text(s),
        }
    }
}
