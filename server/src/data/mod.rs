//! Data storage layer
//!
//! Provides database services for the application:
//! - `sqlite` - Embedded database (default)
//! - `postgres` - Shared database for multi-instance deployments
//! - `repositories` - Backend-neutral statements for every endpoint
//! - `types` - Shared data types across all backends
//! - `traits` - Query executor trait for multi-database support
//! - `sql` - SQL abstraction layer for multi-database support
//! - `error` - Unified error type for all backends

pub mod error;
pub mod postgres;
pub mod repositories;
pub mod sql;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export backend-specific services
pub use postgres::PostgresService;
pub use sqlite::SqliteService;

// Re-export unified error type
pub use error::DataError;

// Re-export executor trait
pub use traits::QueryExecutor;

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::config::{DatabaseBackend, PostgresConfig};
use crate::core::storage::AppStorage;

/// Database service enum
///
/// Wraps the underlying backend-specific service (SQLite or PostgreSQL).
/// Services are stored as Arc so handlers and background tasks can share them.
pub enum DatabaseService {
    /// SQLite backend (default, embedded)
    Sqlite(Arc<SqliteService>),
    /// PostgreSQL backend (for distributed deployments)
    Postgres(Arc<PostgresService>),
}

impl DatabaseService {
    /// Initialize the database service based on configuration
    ///
    /// For SQLite backend, uses the storage path.
    /// For PostgreSQL backend, requires a PostgresConfig.
    pub async fn init(
        backend: DatabaseBackend,
        storage: &AppStorage,
        postgres_config: Option<&PostgresConfig>,
    ) -> Result<Self, DataError> {
        match backend {
            DatabaseBackend::Sqlite => {
                let service = SqliteService::init(storage).await?;
                Ok(Self::Sqlite(Arc::new(service)))
            }
            DatabaseBackend::Postgres => {
                let config = postgres_config.ok_or_else(|| {
                    DataError::Config("PostgreSQL configuration required".to_string())
                })?;
                let service = PostgresService::init(config).await?;
                Ok(Self::Postgres(Arc::new(service)))
            }
        }
    }

    /// Run a WAL checkpoint (SQLite) or equivalent maintenance task
    pub async fn checkpoint(&self) -> Result<(), DataError> {
        match self {
            Self::Sqlite(s) => s.checkpoint().await.map_err(Into::into),
            // PostgreSQL manages its own maintenance via autovacuum
            Self::Postgres(_) => Ok(()),
        }
    }

    /// Close the database connection gracefully
    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
            Self::Postgres(p) => p.close().await,
        }
    }

    /// Start the background checkpoint task (SQLite only)
    /// For PostgreSQL, starts a health check task instead.
    pub fn start_background_task(&self, shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
        match self {
            Self::Sqlite(s) => s.start_checkpoint_task(shutdown_rx),
            Self::Postgres(p) => p.start_health_check_task(shutdown_rx),
        }
    }

    /// Get the backend type
    pub fn backend(&self) -> DatabaseBackend {
        match self {
            Self::Sqlite(_) => DatabaseBackend::Sqlite,
            Self::Postgres(_) => DatabaseBackend::Postgres,
        }
    }

    /// Get the executor trait object for data operations
    pub fn executor(&self) -> &dyn QueryExecutor {
        match self {
            Self::Sqlite(s) => s,
            Self::Postgres(p) => p,
        }
    }

    /// Wrap an existing SQLite pool (primarily for testing)
    #[cfg(test)]
    pub async fn sqlite_in_memory() -> Arc<Self> {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .unwrap();
        sqlite::schema::bootstrap(&pool).await.unwrap();
        Arc::new(Self::Sqlite(Arc::new(SqliteService::from_pool(pool))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sql::Backend;

    #[tokio::test]
    async fn test_in_memory_service_executes() {
        let db = DatabaseService::sqlite_in_memory().await;
        assert_eq!(db.backend(), DatabaseBackend::Sqlite);
        assert_eq!(db.executor().backend(), Backend::Sqlite);
        db.executor().ping().await.unwrap();
        db.checkpoint().await.ok();
    }

    #[tokio::test]
    async fn test_catalog_lists_bootstrap_tables() {
        let db = DatabaseService::sqlite_in_memory().await;
        let tables = db.executor().list_tables().await.unwrap();
        for t in ["Account", "BrandDealOne", "Influencer", "PostOne", "SponsorCompany"] {
            assert!(tables.iter().any(|n| n == t), "missing {t}");
        }

        let columns = db.executor().list_columns("Influencer").await.unwrap();
        assert_eq!(
            columns,
            vec!["influencerID", "influencerName", "location", "age", "niche"]
        );
        assert!(db.executor().list_columns("Nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_postgres_requires_config() {
        let dir = tempfile::tempdir().unwrap();
        let storage = AppStorage::init_for_test(dir.path().to_path_buf());
        let err = DatabaseService::init(DatabaseBackend::Postgres, &storage, None)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, DataError::Config(_)));
    }
}
