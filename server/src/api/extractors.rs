//! Path and validation extractors for API routes

use std::ops::Deref;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use validator::Validate;

/// Raw path extractor for influencer routes (internal use)
#[derive(Debug, Deserialize)]
struct InfluencerPathRaw {
    id: String,
}

/// Validated influencer path extractor.
///
/// The id must be an integer; anything else is a 400 before the database
/// is touched.
#[derive(Debug)]
pub struct InfluencerPath {
    pub id: i64,
}

impl<S> FromRequestParts<S> for InfluencerPath
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<InfluencerPathRaw>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Path)?;

        let id = raw
            .id
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationRejection::InvalidInfluencerId(raw.id))?;

        Ok(Self { id })
    }
}

/// Validation rejection with structured error response
pub enum ValidationRejection {
    /// Failed to parse path parameters
    Path(PathRejection),
    /// Influencer id is not an integer
    InvalidInfluencerId(String),
    /// Failed to parse query string
    Query(QueryRejection),
    /// Failed to parse JSON body
    Json(JsonRejection),
    /// Validation constraints not satisfied
    Validation(validator::ValidationErrors),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Path(rejection) => (
                StatusCode::BAD_REQUEST,
                "PATH_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::InvalidInfluencerId(raw) => (
                StatusCode::BAD_REQUEST,
                "INVALID_ID",
                format!("Invalid influencer id '{}': must be an integer", raw),
            ),
            Self::Query(rejection) => (
                StatusCode::BAD_REQUEST,
                "QUERY_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::Json(rejection) => (
                StatusCode::BAD_REQUEST,
                "JSON_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format_validation_errors(&errors),
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": "bad_request",
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| match (e.code.as_ref(), e.params.get("max")) {
                        ("length", Some(max)) => {
                            format!("{} exceeds the maximum length of {}", field, max)
                        }
                        _ => format!("{}: validation failed", field),
                    })
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Query extractor with automatic validation.
///
/// Deserializes query parameters and validates them using the `validator` crate.
/// Returns a `ValidationRejection` on parse or validation failure.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T> Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

/// JSON body extractor with automatic validation.
///
/// Deserializes JSON body and validates it using the `validator` crate.
/// Returns a `ValidationRejection` on parse or validation failure.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::routing::get;
    use tower::ServiceExt;

    async fn echo_id(path: InfluencerPath) -> String {
        path.id.to_string()
    }

    async fn call(uri: &str) -> (StatusCode, String) {
        let app = Router::new().route("/influencer/{id}", get(echo_id));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_influencer_path_accepts_integer() {
        assert_eq!(call("/influencer/42").await, (StatusCode::OK, "42".to_string()));
        assert_eq!(call("/influencer/-3").await, (StatusCode::OK, "-3".to_string()));
    }

    #[tokio::test]
    async fn test_influencer_path_rejects_text() {
        let (status, body) = call("/influencer/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("INVALID_ID"));
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Limited {
        #[validate(length(max = 2, message = "too many"))]
        items: Vec<u8>,
    }

    #[test]
    fn test_format_validation_errors_uses_message() {
        let errors = Limited {
            items: vec![1, 2, 3],
        }
        .validate()
        .unwrap_err();
        assert_eq!(format_validation_errors(&errors), "too many");
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Bounded {
        #[validate(length(max = 2))]
        items: Vec<u8>,
    }

    #[test]
    fn test_format_validation_errors_reports_length_bound() {
        let errors = Bounded {
            items: vec![1, 2, 3],
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            format_validation_errors(&errors),
            "items exceeds the maximum length of 2"
        );
    }
}
