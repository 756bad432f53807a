//! Catalog lookups and projections
//!
//! Table and column names from requests are matched case-insensitively
//! against the live catalog, and only the catalog spelling (quoted) reaches
//! the SQL text.

use crate::data::QueryExecutor;
use crate::data::error::DataError;
use crate::data::sql::NamedQuery;
use crate::data::types::Row;

/// User tables in the database
pub async fn list_tables(executor: &dyn QueryExecutor) -> Result<Vec<String>, DataError> {
    executor.list_tables().await
}

/// Columns of `table` in declaration order
pub async fn list_columns(
    executor: &dyn QueryExecutor,
    table: &str,
) -> Result<Vec<String>, DataError> {
    let table = resolve_table(executor, table).await?;
    executor.list_columns(&table).await
}

/// Select the requested columns of a table
///
/// Every name must exist in the catalog; the first unknown one is reported.
pub async fn projection(
    executor: &dyn QueryExecutor,
    table: &str,
    columns: &[&str],
) -> Result<Vec<Row>, DataError> {
    let table = resolve_table(executor, table).await?;
    let known = executor.list_columns(&table).await?;

    if columns.is_empty() {
        return Err(DataError::UnknownColumn {
            table,
            column: String::new(),
        });
    }

    let dialect = executor.backend().dialect();
    let mut projected = Vec::with_capacity(columns.len());
    for requested in columns {
        let requested = requested.trim();
        let canonical = known
            .iter()
            .find(|c| c.eq_ignore_ascii_case(requested))
            .ok_or_else(|| DataError::UnknownColumn {
                table: table.clone(),
                column: requested.to_string(),
            })?;
        projected.push(dialect.quote_identifier(canonical));
    }

    let sql = format!(
        "SELECT {} FROM {}",
        projected.join(", "),
        dialect.quote_identifier(&table)
    );
    tracing::debug!(%sql, "Projection");
    executor.fetch_rows(&NamedQuery::new(sql)).await
}

async fn resolve_table(executor: &dyn QueryExecutor, requested: &str) -> Result<String, DataError> {
    let requested = requested.trim();
    executor
        .list_tables()
        .await?
        .into_iter()
        .find(|t| t.eq_ignore_ascii_case(requested))
        .ok_or_else(|| DataError::UnknownTable(requested.to_string()))
}
