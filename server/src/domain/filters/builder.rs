//! WHERE-clause rendering
//!
//! Only allow-listed attribute and operator tokens reach the SQL text;
//! every value goes through a named bind (`:vals{i}`).

use super::types::{Conditions, FilterMode, Operator, QueryFragment};

/// Renders validated conditions under one conjunction policy
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder {
    mode: FilterMode,
    numeric_like_as_text: bool,
}

impl QueryBuilder {
    pub const fn new(mode: FilterMode) -> Self {
        Self {
            mode,
            numeric_like_as_text: false,
        }
    }

    /// Compare numeric columns under `LIKE` as text, for backends without
    /// an implicit number-to-text conversion
    pub const fn numeric_like_as_text(mut self, enabled: bool) -> Self {
        self.numeric_like_as_text = enabled;
        self
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn build(&self, conditions: &Conditions) -> QueryFragment {
        let mut clauses = Vec::with_capacity(conditions.len());
        let mut binds = Vec::with_capacity(conditions.len());

        for condition in conditions.as_slice() {
            let clause = if self.numeric_like_as_text
                && condition.operator == Operator::Like
                && condition.attribute.is_numeric()
            {
                format!(
                    "CAST({} AS TEXT) LIKE CAST(:{} AS TEXT)",
                    condition.attribute.column(),
                    condition.bind_key
                )
            } else {
                format!(
                    "{} {} :{}",
                    condition.attribute.column(),
                    condition.operator.as_sql(),
                    condition.bind_key
                )
            };
            let clause = match self.mode.apply(condition.conjunction) {
                Some(conjunction) => format!("{} {}", conjunction.as_sql(), clause),
                None => clause,
            };
            clauses.push(clause);
            binds.push((condition.bind_key.clone(), condition.value.clone()));
        }

        QueryFragment::new(clauses, binds)
    }
}
