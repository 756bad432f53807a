//! QueryExecutor implementation for SQLite
//!
//! Cells are decoded by their runtime storage class (INTEGER, REAL, TEXT,
//! BLOB); dates are stored as ISO-8601 text and come back as strings.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row as _, Sqlite, TypeInfo, ValueRef};

use crate::data::error::DataError;
use crate::data::sql::{Backend, NamedQuery, SqliteDialect};
use crate::data::traits::QueryExecutor;
use crate::data::types::{BindValue, Row};

use super::SqliteService;

#[async_trait]
impl QueryExecutor for Arc<SqliteService> {
    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    async fn ping(&self) -> Result<(), DataError> {
        sqlx::query("SELECT 1")
            .execute(self.pool())
            .await
            .map_err(DataError::from_sqlite)?;
        Ok(())
    }

    async fn fetch_rows(&self, query: &NamedQuery) -> Result<Vec<Row>, DataError> {
        let compiled = query.compile(&SqliteDialect)?;
        tracing::trace!(sql = %compiled.sql, params = compiled.params.len(), "SQLite fetch");

        let rows = bind_params(sqlx::query(&compiled.sql), compiled.params)
            .fetch_all(self.pool())
            .await
            .map_err(DataError::from_sqlite)?;

        rows.iter()
            .map(decode_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(DataError::from_sqlite)
    }

    async fn execute(&self, query: &NamedQuery) -> Result<u64, DataError> {
        let compiled = query.compile(&SqliteDialect)?;
        tracing::trace!(sql = %compiled.sql, params = compiled.params.len(), "SQLite execute");

        let result = bind_params(sqlx::query(&compiled.sql), compiled.params)
            .execute(self.pool())
            .await
            .map_err(DataError::from_sqlite)?;
        Ok(result.rows_affected())
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: Vec<BindValue>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            BindValue::Integer(v) => query.bind(v),
            BindValue::Real(v) => query.bind(v),
            BindValue::Text(v) => query.bind(v),
            BindValue::Date(v) => query.bind(v),
        };
    }
    query
}

fn decode_row(row: &SqliteRow) -> Result<Row, sqlx::Error> {
    (0..row.len()).map(|i| decode_cell(row, i)).collect()
}

fn decode_cell(row: &SqliteRow, index: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let type_name = raw.type_info().name().to_string();

    match type_name.as_str() {
        "INTEGER" => Ok(Value::from(row.try_get::<i64, _>(index)?)),
        "REAL" => Ok(real_to_json(row.try_get::<f64, _>(index)?)),
        "BLOB" => {
            let bytes = row.try_get::<Vec<u8>, _>(index)?;
            Ok(Value::String(format!("<binary {} bytes>", bytes.len())))
        }
        _ => Ok(Value::String(row.try_get::<String, _>(index)?)),
    }
}

fn real_to_json(v: f64) -> Value {
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::schema;
    use chrono::NaiveDate;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn service() -> Arc<SqliteService> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();
        schema::bootstrap(&pool).await.unwrap();
        Arc::new(SqliteService::from_pool(pool))
    }

    #[tokio::test]
    async fn test_ping() {
        let db = service().await;
        db.ping().await.unwrap();
        assert_eq!(db.backend(), Backend::Sqlite);
    }

    #[tokio::test]
    async fn test_execute_and_fetch_mixed_types() {
        let db = service().await;
        let affected = db
            .execute(
                &NamedQuery::new(
                    "INSERT INTO Influencer (influencerID, influencerName, location, age, niche) \
                     VALUES (:id, :name, :loc, :age, NULL)",
                )
                .bind("id", 1i64)
                .bind("name", "Ana")
                .bind("loc", "NYC")
                .bind("age", 27i64),
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let rows = db
            .fetch_rows(
                &NamedQuery::new("SELECT influencerID, influencerName, age, niche, 1.5 FROM Influencer WHERE influencerID = :id")
                    .bind("id", 1i64),
            )
            .await
            .unwrap();
        assert_eq!(
            rows,
            vec![vec![
                serde_json::json!(1),
                serde_json::json!("Ana"),
                serde_json::json!(27),
                Value::Null,
                serde_json::json!(1.5)
            ]]
        );
    }

    #[tokio::test]
    async fn test_date_round_trips_as_text() {
        let db = service().await;
        db.execute(
            &NamedQuery::new("INSERT INTO Influencer (influencerID, influencerName) VALUES (1, 'Ana')"),
        )
        .await
        .unwrap();
        db.execute(
            &NamedQuery::new(
                "INSERT INTO Account (username, platformName, influencerID, followerCount, activationDate) \
                 VALUES ('ana', 'tiktok', 1, 10, :d)",
            )
            .bind("d", NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()),
        )
        .await
        .unwrap();

        let rows = db
            .fetch_rows(&NamedQuery::new("SELECT activationDate FROM Account"))
            .await
            .unwrap();
        assert_eq!(rows, vec![vec![serde_json::json!("2024-03-09")]]);
    }

    #[tokio::test]
    async fn test_missing_bind_never_executes() {
        let db = service().await;
        let err = db
            .execute(&NamedQuery::new(
                "INSERT INTO Influencer (influencerID, influencerName) VALUES (:id, 'x')",
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::MissingBind(_)));

        let rows = db
            .fetch_rows(&NamedQuery::new("SELECT * FROM Influencer"))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}
