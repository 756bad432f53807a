//! Named bind parameters
//!
//! SQL is written with `:name` markers and compiled per dialect into
//! positional placeholders. Quoted literals, quoted identifiers and
//! PostgreSQL `::` casts are left untouched.

use super::SqlDialect;
use crate::data::error::DataError;
use crate::data::types::BindValue;

/// SQL text with named binds
#[derive(Debug, Clone, PartialEq)]
pub struct NamedQuery {
    sql: String,
    binds: Vec<(String, BindValue)>,
}

/// Dialect-specific SQL with parameters in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl NamedQuery {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            binds: Vec::new(),
        }
    }

    /// Add or replace a bind value
    pub fn bind(mut self, key: impl Into<String>, value: impl Into<BindValue>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.binds.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.binds.push((key, value)),
        }
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bind keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.binds.iter().map(|(k, _)| k.as_str())
    }

    fn lookup(&self, key: &str) -> Option<&BindValue> {
        self.binds.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Rewrite `:name` markers into dialect placeholders.
    ///
    /// Every occurrence gets its own position, so a name used twice is bound
    /// twice. Fails on the first marker without a value.
    pub fn compile(&self, dialect: &dyn SqlDialect) -> Result<CompiledQuery, DataError> {
        let mut sql = String::with_capacity(self.sql.len());
        let mut params = Vec::with_capacity(self.binds.len());
        let mut chars = self.sql.chars().peekable();
        let mut quote: Option<char> = None;

        while let Some(c) = chars.next() {
            if let Some(q) = quote {
                sql.push(c);
                if c == q {
                    quote = None;
                }
                continue;
            }

            match c {
                '\'' | '"' => {
                    quote = Some(c);
                    sql.push(c);
                }
                ':' if chars.peek() == Some(&':') => {
                    chars.next();
                    sql.push_str("::");
                }
                ':' if chars.peek().is_some_and(|n| n.is_ascii_alphabetic() || *n == '_') => {
                    let mut name = String::new();
                    while let Some(&n) = chars.peek() {
                        if n.is_ascii_alphanumeric() || n == '_' {
                            name.push(n);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    let value = self
                        .lookup(&name)
                        .ok_or_else(|| DataError::MissingBind(name.clone()))?;
                    params.push(value.clone());
                    sql.push_str(&dialect.placeholder(params.len()));
                }
                _ => sql.push(c),
            }
        }

        Ok(CompiledQuery { sql, params })
    }
}
