//! Unified error type for data layer
//!
//! This module provides a unified error type that can represent errors from
//! both database backends (SQLite, PostgreSQL) plus query-construction failures.

use thiserror::Error;

/// Unified error type for data layer operations
///
/// This error type wraps backend-specific errors while preserving context
/// about which backend generated the error.
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// PostgreSQL database error
    #[error("PostgreSQL error: {0}")]
    Postgres(sqlx::Error),

    /// Schema bootstrap failed
    #[error("Schema bootstrap failed on {backend}: {error}")]
    SchemaFailed {
        backend: &'static str,
        error: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A `:name` marker in the statement has no bound value
    #[error("Missing bind value for :{0}")]
    MissingBind(String),

    /// Table is not in the live catalog
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// Column is not part of the table
    #[error("Unknown column {column} in table {table}")]
    UnknownColumn { table: String, column: String },
}

impl DataError {
    /// Create a SQLite error with preserved context
    pub fn from_sqlite(e: sqlx::Error) -> Self {
        Self::Sqlite(e)
    }

    /// Create a PostgreSQL error with preserved context
    pub fn from_postgres(e: sqlx::Error) -> Self {
        Self::Postgres(e)
    }

    /// Check if this is a connection-related error that might be transient
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Sqlite(e) | Self::Postgres(e) => {
                matches!(
                    e,
                    sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
                )
            }
            _ => false,
        }
    }

    /// Constraint violation reported by the database (duplicate key, bad FK, ...)
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::Sqlite(sqlx::Error::Database(e)) | Self::Postgres(sqlx::Error::Database(e)) => {
                e.is_unique_violation() || e.is_foreign_key_violation() || e.is_check_violation()
            }
            _ => false,
        }
    }

    /// Get the backend name that generated this error
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Postgres(_) => "postgres",
            Self::SchemaFailed { backend, .. } => backend,
            Self::Config(_)
            | Self::Io(_)
            | Self::MissingBind(_)
            | Self::UnknownTable(_)
            | Self::UnknownColumn { .. } => "unknown",
        }
    }
}

/// Convert from the existing SqliteError type
impl From<crate::data::sqlite::SqliteError> for DataError {
    fn from(e: crate::data::sqlite::SqliteError) -> Self {
        match e {
            crate::data::sqlite::SqliteError::Database(e) => Self::Sqlite(e),
            crate::data::sqlite::SqliteError::Schema(error) => Self::SchemaFailed {
                backend: "sqlite",
                error,
            },
            crate::data::sqlite::SqliteError::Io(e) => Self::Io(e),
        }
    }
}

/// Convert from the existing PostgresError type
impl From<crate::data::postgres::PostgresError> for DataError {
    fn from(e: crate::data::postgres::PostgresError) -> Self {
        match e {
            crate::data::postgres::PostgresError::Database(e) => Self::Postgres(e),
            crate::data::postgres::PostgresError::Schema(error) => Self::SchemaFailed {
                backend: "postgres",
                error,
            },
            crate::data::postgres::PostgresError::Config(msg) => Self::Config(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_failed_error_display() {
        let err = DataError::SchemaFailed {
            backend: "postgres",
            error: "syntax error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Schema bootstrap failed on postgres: syntax error"
        );
        assert_eq!(err.backend(), "postgres");
    }

    #[test]
    fn test_missing_bind_display() {
        let err = DataError::MissingBind("vals3".to_string());
        assert_eq!(err.to_string(), "Missing bind value for :vals3");
        assert_eq!(err.backend(), "unknown");
    }

    #[test]
    fn test_is_transient() {
        assert!(DataError::from_sqlite(sqlx::Error::PoolTimedOut).is_transient());
        assert!(DataError::from_postgres(sqlx::Error::PoolClosed).is_transient());
        assert!(!DataError::from_sqlite(sqlx::Error::RowNotFound).is_transient());
        assert!(!DataError::Config("x".into()).is_transient());
    }

    #[test]
    fn test_sqlite_error_conversion() {
        let err: DataError = crate::data::sqlite::SqliteError::Schema("bad".into()).into();
        assert!(matches!(err, DataError::SchemaFailed { backend: "sqlite", .. }));
    }

    #[test]
    fn test_postgres_error_conversion() {
        let err: DataError = crate::data::postgres::PostgresError::Config("no url".into()).into();
        assert!(matches!(err, DataError::Config(ref m) if m == "no url"));
    }
}
