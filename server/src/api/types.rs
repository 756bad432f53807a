//! Shared API types
//!
//! Error handling and the JSON envelopes the browser scripts read
//! (`{data}`, `{success, data}`, `{success, message}`).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::data::DataError;
use crate::data::types::Row;
use crate::domain::filters::FilterError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Map a data-layer failure to an HTTP error
    ///
    /// Catalog misses and constraint violations are the caller's fault; every
    /// other database failure is logged and reported as a 500.
    pub fn from_data(e: DataError) -> Self {
        match e {
            DataError::UnknownTable(table) => {
                Self::not_found("UNKNOWN_TABLE", format!("Unknown table: {}", table))
            }
            DataError::UnknownColumn { column, .. } if column.is_empty() => {
                Self::bad_request("UNKNOWN_COLUMN", "At least one column is required")
            }
            DataError::UnknownColumn { table, column } => Self::bad_request(
                "UNKNOWN_COLUMN",
                format!("Unknown column {} in table {}", column, table),
            ),
            e if e.is_constraint_violation() => {
                tracing::debug!(error = %e, "Constraint violation");
                Self::conflict(
                    "CONSTRAINT_VIOLATION",
                    "The change conflicts with existing data",
                )
            }
            e => {
                tracing::error!(error = %e, "Data error");
                Self::internal("Database operation failed")
            }
        }
    }
}

impl From<DataError> for ApiError {
    fn from(e: DataError) -> Self {
        Self::from_data(e)
    }
}

impl From<FilterError> for ApiError {
    fn from(e: FilterError) -> Self {
        Self::bad_request(e.code(), e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Conflict { code, message } => (StatusCode::CONFLICT, "conflict", code, message),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

/// Rows as positional arrays
#[derive(Debug, Serialize, ToSchema)]
pub struct RowsResponse {
    #[schema(value_type = Vec<Vec<Object>>)]
    pub data: Vec<Row>,
}

impl RowsResponse {
    pub fn new(data: Vec<Row>) -> Self {
        Self { data }
    }
}

/// Table or column names
#[derive(Debug, Serialize, ToSchema)]
pub struct NamesResponse {
    pub data: Vec<String>,
}

/// Report rows with a success flag
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportResponse {
    pub success: bool,
    #[schema(value_type = Vec<Vec<Object>>)]
    pub data: Vec<Row>,
}

impl ReportResponse {
    pub fn ok(data: Vec<Row>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Outcome of an insert, update or delete
#[derive(Debug, Serialize, ToSchema)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MutationResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Number as sent by HTML form scripts: a JSON number or a numeric string
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

/// Deserialize an `i64` from a JSON number or a numeric string
pub fn int_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n
            .as_i64()
            .ok_or_else(|| D::Error::custom(format!("expected an integer, got {}", n))),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected an integer, got '{}'", s))),
    }
}

/// Deserialize a finite `f64` from a JSON number or a numeric string
pub fn float_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n.as_f64(),
        NumberOrString::Text(s) => s.trim().parse::<f64>().ok(),
    };
    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| D::Error::custom("expected a number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::bad_request("INVALID_VALUE", "bad").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "bad_request", "code": "INVALID_VALUE", "message": "bad"})
        );
    }

    #[test]
    fn test_unknown_table_is_not_found() {
        let err = ApiError::from_data(DataError::UnknownTable("users".to_string()));
        assert!(matches!(err, ApiError::NotFound { ref code, .. } if code == "UNKNOWN_TABLE"));
    }

    #[test]
    fn test_unknown_column_is_bad_request() {
        let err = ApiError::from_data(DataError::UnknownColumn {
            table: "Influencer".to_string(),
            column: "salary".to_string(),
        });
        assert!(matches!(
            err,
            ApiError::BadRequest { ref code, ref message }
                if code == "UNKNOWN_COLUMN" && message.contains("salary")
        ));
    }

    #[test]
    fn test_database_failure_is_internal() {
        let err = ApiError::from_data(DataError::MissingBind("vals0".to_string()));
        assert!(matches!(err, ApiError::Internal { .. }));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_filter_error_keeps_code() {
        let err: ApiError = FilterError::InvalidOperator {
            index: 1,
            operator: "!=".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            ApiError::BadRequest { ref code, ref message }
                if code == "INVALID_OPERATOR" && message.contains("position 1")
        ));
    }

    #[derive(Debug, Deserialize)]
    struct Lenient {
        #[serde(deserialize_with = "int_or_string")]
        count: i64,
        #[serde(deserialize_with = "float_or_string")]
        rate: f64,
    }

    #[test]
    fn test_numbers_from_strings_or_numbers() {
        let v: Lenient = serde_json::from_str(r#"{"count": " 12 ", "rate": "0.5"}"#).unwrap();
        assert_eq!((v.count, v.rate), (12, 0.5));
        let v: Lenient = serde_json::from_str(r#"{"count": 7, "rate": 3}"#).unwrap();
        assert_eq!((v.count, v.rate), (7, 3.0));
    }

    #[test]
    fn test_numbers_reject_garbage() {
        assert!(serde_json::from_str::<Lenient>(r#"{"count": "12a", "rate": 1}"#).is_err());
        assert!(serde_json::from_str::<Lenient>(r#"{"count": 1.5, "rate": 1}"#).is_err());
        assert!(serde_json::from_str::<Lenient>(r#"{"count": 1, "rate": "NaN"}"#).is_err());
    }

    #[test]
    fn test_mutation_response_omits_empty_message() {
        let json = serde_json::to_value(MutationResponse::ok()).unwrap();
        assert_eq!(json, serde_json::json!({"success": true}));
        let json = serde_json::to_value(MutationResponse::failed("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "message": "nope"}));
    }
}
