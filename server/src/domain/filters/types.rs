//! Filter type definitions
//!
//! Wire-level filter conditions as sent by the browser, and the validated
//! forms the parser hands to the query builder.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Prefix of the generated bind keys (`vals0`, `vals1`, ...)
pub const BIND_KEY_PREFIX: &str = "vals";

/// Bind key for the condition at `index`
pub fn bind_key(index: usize) -> String {
    format!("{}{}", BIND_KEY_PREFIX, index)
}

/// One user-supplied predicate.
///
/// Accepts both `attribute/operator/value/conjunction` and the short
/// `attr/op/val/conj` spelling used by the legacy frontend scripts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FilterCondition {
    #[serde(alias = "attr")]
    pub attribute: String,
    #[serde(alias = "op")]
    pub operator: String,
    /// String or number; numbers are kept in their JSON text form
    #[serde(alias = "val", deserialize_with = "string_or_number")]
    #[schema(value_type = String)]
    pub value: String,
    #[serde(default, alias = "conj")]
    pub conjunction: Option<String>,
}

impl FilterCondition {
    pub fn new(
        attribute: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            operator: operator.into(),
            value: value.into(),
            conjunction: None,
        }
    }

    pub fn with_conjunction(mut self, conjunction: impl Into<String>) -> Self {
        self.conjunction = Some(conjunction.into());
        self
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

// =============================================================================
// Allow-listed vocabulary
// =============================================================================

/// Filterable Influencer columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    InfluencerId,
    InfluencerName,
    Location,
    Age,
    Niche,
}

impl Attribute {
    pub const ALL: &'static [Attribute] = &[
        Attribute::InfluencerId,
        Attribute::InfluencerName,
        Attribute::Location,
        Attribute::Age,
        Attribute::Niche,
    ];

    /// Column name as rendered into SQL
    pub const fn column(&self) -> &'static str {
        match self {
            Attribute::InfluencerId => "influencerID",
            Attribute::InfluencerName => "influencerName",
            Attribute::Location => "location",
            Attribute::Age => "age",
            Attribute::Niche => "niche",
        }
    }

    /// Numeric attributes bind a number instead of a string
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Attribute::InfluencerId | Attribute::Age)
    }

    /// Exact, case-sensitive lookup
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.column() == name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Lt,
    Gt,
    Like,
}

impl Operator {
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Like => "LIKE",
        }
    }

    /// Exact match only; `like` in lower case is rejected
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "=" => Some(Operator::Eq),
            "<" => Some(Operator::Lt),
            ">" => Some(Operator::Gt),
            "LIKE" => Some(Operator::Like),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
}

impl Conjunction {
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
        }
    }

    /// `OR` in any case selects `Or`; anything else, including nothing, is `And`
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("or") => Conjunction::Or,
            _ => Conjunction::And,
        }
    }
}

/// How the builder joins conditions after the first one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Use the conjunction each condition asked for
    #[default]
    Strict,
    /// Join every condition with `OR`
    ForceOr,
}

impl FilterMode {
    pub fn apply(&self, requested: Option<Conjunction>) -> Option<Conjunction> {
        match self {
            FilterMode::Strict => requested,
            FilterMode::ForceOr => requested.map(|_| Conjunction::Or),
        }
    }
}

// =============================================================================
// Normalized output
// =============================================================================

/// Typed bind value produced by the parser
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Integer(v) => write!(f, "{}", v),
            FilterValue::Real(v) => write!(f, "{}", v),
            FilterValue::Text(v) => f.write_str(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCondition {
    pub attribute: Attribute,
    pub operator: Operator,
    pub value: FilterValue,
    /// `None` only at position 0
    pub conjunction: Option<Conjunction>,
    pub bind_key: String,
}

/// Non-empty, ordered list of validated conditions
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions(Vec<NormalizedCondition>);

impl Conditions {
    /// Returns `None` for an empty list
    pub(super) fn new(conditions: Vec<NormalizedCondition>) -> Option<Self> {
        if conditions.is_empty() {
            None
        } else {
            Some(Self(conditions))
        }
    }

    pub fn as_slice(&self) -> &[NormalizedCondition] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parser result
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSet {
    /// No conditions: select every row
    All,
    Where(Conditions),
}

/// WHERE-clause fragment plus its bind values, in clause order
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFragment {
    clauses: Vec<String>,
    binds: Vec<(String, FilterValue)>,
}

impl QueryFragment {
    pub(super) fn new(clauses: Vec<String>, binds: Vec<(String, FilterValue)>) -> Self {
        Self { clauses, binds }
    }

    /// One token per condition, conjunction included after the first
    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    pub fn binds(&self) -> &[(String, FilterValue)] {
        &self.binds
    }

    /// Text to place after `WHERE`
    pub fn where_clause(&self) -> String {
        self.clauses.join(" ")
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.binds.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid attribute at position {index}: {attribute}")]
    InvalidAttribute { index: usize, attribute: String },

    #[error("Invalid operator at position {index}: {operator}")]
    InvalidOperator { index: usize, operator: String },

    #[error("Invalid value at position {index}: '{value}' is not a number ({attribute})")]
    InvalidValue {
        index: usize,
        attribute: &'static str,
        value: String,
    },
}

impl FilterError {
    /// Machine-readable error code
    pub const fn code(&self) -> &'static str {
        match self {
            FilterError::InvalidAttribute { .. } => "INVALID_ATTRIBUTE",
            FilterError::InvalidOperator { .. } => "INVALID_OPERATOR",
            FilterError::InvalidValue { .. } => "INVALID_VALUE",
        }
    }
}
