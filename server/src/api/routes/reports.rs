//! Join and aggregation report endpoints

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::api::extractors::ValidatedQuery;
use crate::api::types::{ApiError, ReportResponse, float_or_string};
use crate::data::DatabaseService;
use crate::data::repositories::{
    above_average_followers, accounts_on_every_platform, average_age_by_niche,
    deals_above_production_cost, high_engagement_niches,
};

/// Shared state for report endpoints
#[derive(Clone)]
pub struct ReportsApiState {
    pub database: Arc<DatabaseService>,
}

/// Build report routes
pub fn routes(database: Arc<DatabaseService>) -> Router<()> {
    let state = ReportsApiState { database };

    Router::new()
        .route("/join-table/{productionCost}", get(join_table))
        .route("/aggregation-with-having", get(aggregation_with_having))
        .route("/nested-aggregation", get(nested_aggregation))
        .route("/group-by-aggregation", get(group_by_aggregation))
        .route("/division-aggregation", get(division_aggregation))
        .with_state(state)
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EngagementQuery {
    /// Minimum average engagement rate (exclusive)
    #[serde(rename = "engagementRate", deserialize_with = "float_or_string")]
    #[validate(range(min = 0.0, message = "Engagement rate must be >= 0"))]
    pub engagement_rate: f64,
}

fn parse_bound(raw: &str, name: &str) -> Result<f64, ApiError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ApiError::bad_request("INVALID_VALUE", format!("{} must be a number", name)))
}

/// Deals whose post cost more than the bound
#[utoipa::path(
    get,
    path = "/join-table/{productionCost}",
    tag = "reports",
    params(("productionCost" = f64, Path, description = "Exclusive lower bound on production cost")),
    responses(
        (status = 200, description = "Rows of [adType, productionCost]", body = ReportResponse),
        (status = 400, description = "Bound is not a number")
    )
)]
pub async fn join_table(
    State(state): State<ReportsApiState>,
    Path(production_cost): Path<String>,
) -> Result<Json<ReportResponse>, ApiError> {
    let min_cost = parse_bound(&production_cost, "productionCost")?;
    let rows = deals_above_production_cost(state.database.executor(), min_cost)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(ReportResponse::ok(rows)))
}

/// Niches whose posts average more engagement than the bound
#[utoipa::path(
    get,
    path = "/aggregation-with-having",
    tag = "reports",
    params(EngagementQuery),
    responses(
        (status = 200, description = "Rows of [niche, averageEngagement]", body = ReportResponse),
        (status = 400, description = "Missing or invalid engagementRate")
    )
)]
pub async fn aggregation_with_having(
    State(state): State<ReportsApiState>,
    ValidatedQuery(query): ValidatedQuery<EngagementQuery>,
) -> Result<Json<ReportResponse>, ApiError> {
    let rows = high_engagement_niches(state.database.executor(), query.engagement_rate)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(ReportResponse::ok(rows)))
}

/// Influencers whose mean follower count beats the overall mean
#[utoipa::path(
    get,
    path = "/nested-aggregation",
    tag = "reports",
    responses((status = 200, description = "Rows of [influencerID, averageFollowers]", body = ReportResponse))
)]
pub async fn nested_aggregation(
    State(state): State<ReportsApiState>,
) -> Result<Json<ReportResponse>, ApiError> {
    let rows = above_average_followers(state.database.executor())
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(ReportResponse::ok(rows)))
}

/// Influencer count and mean age per niche
#[utoipa::path(
    get,
    path = "/group-by-aggregation",
    tag = "reports",
    responses((status = 200, description = "Rows of [niche, count, averageAge]", body = ReportResponse))
)]
pub async fn group_by_aggregation(
    State(state): State<ReportsApiState>,
) -> Result<Json<ReportResponse>, ApiError> {
    let rows = average_age_by_niche(state.database.executor())
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(ReportResponse::ok(rows)))
}

/// Influencers with an account on every platform
#[utoipa::path(
    get,
    path = "/division-aggregation",
    tag = "reports",
    responses((status = 200, description = "Rows of [influencerID, influencerName]", body = ReportResponse))
)]
pub async fn division_aggregation(
    State(state): State<ReportsApiState>,
) -> Result<Json<ReportResponse>, ApiError> {
    let rows = accounts_on_every_platform(state.database.executor())
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(ReportResponse::ok(rows)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_support::{seeded, send};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_join_table() {
        let db = seeded().await;
        let (status, body) = send(routes(db), Method::GET, "/join-table/1000", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "data": [["review", 1500.0], ["video", 3000.0]]})
        );
    }

    #[tokio::test]
    async fn test_join_table_rejects_text_bound() {
        let db = seeded().await;
        let (status, body) =
            send(routes(db), Method::GET, "/join-table/1%20OR%201=1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_VALUE");
    }

    #[tokio::test]
    async fn test_aggregation_with_having() {
        let db = seeded().await;
        let (status, body) = send(
            routes(db.clone()),
            Method::GET,
            "/aggregation-with-having?engagementRate=0.05",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0][0], "fitness");

        let (status, body) =
            send(routes(db), Method::GET, "/aggregation-with-having", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "QUERY_PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_nested_aggregation() {
        let db = seeded().await;
        let (status, body) = send(routes(db), Method::GET, "/nested-aggregation", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0][0], 1);
        assert_eq!(body["data"][1], json!([4, 70000.0]));
    }

    #[tokio::test]
    async fn test_group_by_aggregation() {
        let db = seeded().await;
        let (status, body) = send(routes(db), Method::GET, "/group-by-aggregation", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            json!([["fitness", 2, 24.5], ["food", 1, 41.0], ["tech", 1, 34.0]])
        );
    }

    #[tokio::test]
    async fn test_division_aggregation() {
        let db = seeded().await;
        let (status, body) = send(routes(db), Method::GET, "/division-aggregation", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "data": [[1, "Ana"]]}));
    }

    #[tokio::test]
    async fn test_reports_fail_loudly() {
        let db = seeded().await;
        db.close().await;
        let (status, body) = send(routes(db), Method::GET, "/group-by-aggregation", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.get("success").is_none());
    }
}
