//! Brand deal update endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::types::{ApiError, MutationResponse, float_or_string, int_or_string};
use crate::data::DatabaseService;
use crate::data::repositories::update_brand_deal;
use crate::data::types::BrandDealUpdate;

/// Shared state for brand deal endpoints
#[derive(Clone)]
pub struct BrandDealsApiState {
    pub database: Arc<DatabaseService>,
}

/// Build brand deal routes
pub fn routes(database: Arc<DatabaseService>) -> Router<()> {
    let state = BrandDealsApiState { database };

    Router::new()
        .route("/update-brand-deal", post(edit_brand_deal))
        .with_state(state)
}

/// Replacement values for one deal
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBrandDealRequest {
    #[serde(rename = "brandDealID", deserialize_with = "int_or_string")]
    pub brand_deal_id: i64,
    #[serde(rename = "adType")]
    #[validate(length(min = 1, max = 64, message = "Ad type must be 1-64 characters"))]
    pub ad_type: String,
    #[serde(rename = "paymentRate", deserialize_with = "float_or_string")]
    #[validate(range(min = 0.0, message = "Payment rate must be >= 0"))]
    pub payment_rate: f64,
    #[serde(rename = "companyID", deserialize_with = "int_or_string")]
    pub company_id: i64,
    #[serde(rename = "postID", deserialize_with = "int_or_string")]
    pub post_id: i64,
}

impl From<UpdateBrandDealRequest> for BrandDealUpdate {
    fn from(req: UpdateBrandDealRequest) -> Self {
        Self {
            brand_deal_id: req.brand_deal_id,
            ad_type: req.ad_type.trim().to_string(),
            payment_rate: req.payment_rate,
            company_id: req.company_id,
            post_id: req.post_id,
        }
    }
}

/// Overwrite a brand deal
#[utoipa::path(
    post,
    path = "/update-brand-deal",
    tag = "brand-deals",
    request_body = UpdateBrandDealRequest,
    responses(
        (status = 200, description = "`success` is false when no deal has this ID", body = MutationResponse),
        (status = 400, description = "Malformed body"),
        (status = 409, description = "Company or post unknown or already used by another deal")
    )
)]
pub async fn edit_brand_deal(
    State(state): State<BrandDealsApiState>,
    ValidatedJson(request): ValidatedJson<UpdateBrandDealRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let deal = BrandDealUpdate::from(request);
    let brand_deal_id = deal.brand_deal_id;

    let updated = update_brand_deal(state.database.executor(), deal)
        .await
        .map_err(ApiError::from_data)?;

    if updated == 0 {
        return Ok(Json(MutationResponse::failed(format!(
            "No brand deal with ID {}",
            brand_deal_id
        ))));
    }

    tracing::info!(brand_deal_id, "Brand deal updated");
    Ok(Json(MutationResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_support::{seeded, send};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_update_brand_deal() {
        let db = seeded().await;
        let body = json!({
            "brandDealID": "1001",
            "adType": "unboxing",
            "paymentRate": "1200.5",
            "companyID": 11,
            "postID": 101
        });
        let (status, body) =
            send(routes(db.clone()), Method::POST, "/update-brand-deal", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let rows = crate::data::repositories::fetch_table(
            db.executor(),
            crate::data::repositories::FixedTable::BrandDeal,
        )
        .await
        .unwrap();
        assert!(rows.contains(&vec![
            json!(1001),
            json!("unboxing"),
            json!(1200.5),
            json!(11),
            json!(101)
        ]));
    }

    #[tokio::test]
    async fn test_update_unknown_deal_is_not_success() {
        let db = seeded().await;
        let body = json!({
            "brandDealID": 4242, "adType": "story", "paymentRate": 1, "companyID": 10, "postID": 100
        });
        let (status, body) = send(routes(db), Method::POST, "/update-brand-deal", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_update_conflicting_post() {
        let db = seeded().await;
        let body = json!({
            "brandDealID": 1000, "adType": "story", "paymentRate": 1, "companyID": 10, "postID": 103
        });
        let (status, body) = send(routes(db), Method::POST, "/update-brand-deal", Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "CONSTRAINT_VIOLATION");
    }

    #[tokio::test]
    async fn test_update_rejects_missing_field() {
        let db = seeded().await;
        let body = json!({"brandDealID": 1000, "adType": "story"});
        let (status, body) = send(routes(db), Method::POST, "/update-brand-deal", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "JSON_PARSE_ERROR");
    }
}
