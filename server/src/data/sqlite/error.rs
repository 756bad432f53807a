//! SQLite error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Schema bootstrap failed: {0}")]
    Schema(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = SqliteError::Schema("near \"TABEL\": syntax error".to_string());
        assert_eq!(
            err.to_string(),
            "Schema bootstrap failed: near \"TABEL\": syntax error"
        );
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let sqlite_err: SqliteError = io_err.into();
        assert!(sqlite_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_debug() {
        let err = SqliteError::Schema("boom".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Schema"));
    }
}
