//! QueryExecutor implementation for PostgreSQL
//!
//! Cells are decoded by their declared column type. Aggregates that would
//! produce NUMERIC are cast to DOUBLE PRECISION in the shared SQL, so
//! NUMERIC is not decoded here.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row as _, TypeInfo, ValueRef};

use crate::data::error::DataError;
use crate::data::sql::{Backend, NamedQuery, PostgresDialect};
use crate::data::traits::QueryExecutor;
use crate::data::types::{BindValue, Row};

use super::PostgresService;

#[async_trait]
impl QueryExecutor for Arc<PostgresService> {
    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    async fn ping(&self) -> Result<(), DataError> {
        sqlx::query("SELECT 1")
            .execute(self.pool())
            .await
            .map_err(DataError::from_postgres)?;
        Ok(())
    }

    async fn fetch_rows(&self, query: &NamedQuery) -> Result<Vec<Row>, DataError> {
        let compiled = query.compile(&PostgresDialect)?;
        tracing::trace!(sql = %compiled.sql, params = compiled.params.len(), "PostgreSQL fetch");

        let rows = bind_params(sqlx::query(&compiled.sql), compiled.params)
            .fetch_all(self.pool())
            .await
            .map_err(DataError::from_postgres)?;

        rows.iter()
            .map(decode_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(DataError::from_postgres)
    }

    async fn execute(&self, query: &NamedQuery) -> Result<u64, DataError> {
        let compiled = query.compile(&PostgresDialect)?;
        tracing::trace!(sql = %compiled.sql, params = compiled.params.len(), "PostgreSQL execute");

        let result = bind_params(sqlx::query(&compiled.sql), compiled.params)
            .execute(self.pool())
            .await
            .map_err(DataError::from_postgres)?;
        Ok(result.rows_affected())
    }
}

fn bind_params(
    mut query: Query<'_, Postgres, PgArguments>,
    params: Vec<BindValue>,
) -> Query<'_, Postgres, PgArguments> {
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

fn decode_row(row: &PgRow) -> Result<Row, sqlx::Error> {
    (0..row.len()).map(|i| decode_cell(row, i)).collect()
}

fn decode_cell(row: &PgRow, index: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let type_name = raw.type_info().name().to_string();

    let value = match type_name.as_str() {
        "INT2" => Value::from(row.try_get::<i16, _>(index)?),
        "INT4" => Value::from(row.try_get::<i32, _>(index)?),
        "INT8" => Value::from(row.try_get::<i64, _>(index)?),
        "FLOAT4" => float_to_json(f64::from(row.try_get::<f32, _>(index)?)),
        "FLOAT8" => float_to_json(row.try_get::<f64, _>(index)?),
        "BOOL" => Value::Bool(row.try_get::<bool, _>(index)?),
        "DATE" => Value::String(row.try_get::<NaiveDate, _>(index)?.to_string()),
        "TIMESTAMP" => Value::String(row.try_get::<NaiveDateTime, _>(index)?.to_string()),
        "TIMESTAMPTZ" => Value::String(row.try_get::<DateTime<Utc>, _>(index)?.to_rfc3339()),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "CHAR" => {
            Value::String(row.try_get::<String, _>(index)?)
        }
        other => {
            tracing::warn!(column = index, pg_type = other, "Unsupported column type, returning null");
            Value::Null
        }
    };
    Ok(value)
}

fn float_to_json(v: f64) -> Value {
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
