//! SQL dialect trait for multi-database support
//!
//! This trait defines the interface for generating database-specific SQL syntax.

use crate::utils::sql::quote_identifier;

/// SQL dialect trait for generating database-specific SQL
///
/// Backends differ in:
/// - Parameter placeholders (? vs $1)
/// - Where table and column metadata lives
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;

    /// Quote a catalog-validated identifier
    fn quote_identifier(&self, ident: &str) -> String {
        quote_identifier(ident)
    }

    /// Numeric columns must be cast to text before `LIKE`
    fn like_needs_text_cast(&self) -> bool {
        false
    }

    /// Query returning one user table name per row
    fn list_tables_sql(&self) -> &'static str;

    /// Query returning the column names of `:table`, in declaration order
    fn list_columns_sql(&self) -> &'static str;
}
