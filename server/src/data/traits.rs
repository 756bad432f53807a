//! Query executor trait for database backends
//!
//! The repositories write backend-neutral SQL with named binds; each backend
//! (SQLite, PostgreSQL) compiles it for its dialect, binds the values and
//! decodes rows into positional JSON cells.

use async_trait::async_trait;
use serde_json::Value;

use crate::data::error::DataError;
use crate::data::sql::{Backend, NamedQuery};
use crate::data::types::Row;

#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Backend this executor talks to
    fn backend(&self) -> Backend;

    /// Round-trip a trivial statement
    async fn ping(&self) -> Result<(), DataError>;

    /// Run a SELECT and return every row
    async fn fetch_rows(&self, query: &NamedQuery) -> Result<Vec<Row>, DataError>;

    /// Run a write statement and return the affected row count
    async fn execute(&self, query: &NamedQuery) -> Result<u64, DataError>;

    /// User table names from the live catalog
    async fn list_tables(&self) -> Result<Vec<String>, DataError> {
        let query = NamedQuery::new(self.backend().dialect().list_tables_sql());
        let rows = self.fetch_rows(&query).await?;
        Ok(first_text_column(rows))
    }

    /// Column names of `table` in declaration order (empty if the table is unknown)
    async fn list_columns(&self, table: &str) -> Result<Vec<String>, DataError> {
        let query =
            NamedQuery::new(self.backend().dialect().list_columns_sql()).bind("table", table);
        let rows = self.fetch_rows(&query).await?;
        Ok(first_text_column(rows))
    }
}

fn first_text_column(rows: Vec<Row>) -> Vec<String> {
    rows.into_iter()
        .filter_map(|row| match row.into_iter().next() {
            Some(Value::String(s)) => Some(s),
            _ => None,
        })
        .collect()
}
