//! Whole-table browse endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::types::{ApiError, RowsResponse};
use crate::data::DatabaseService;
use crate::data::repositories::{FixedTable, fetch_table};

/// Shared state for table endpoints
#[derive(Clone)]
pub struct TablesApiState {
    pub database: Arc<DatabaseService>,
}

/// Build table routes
pub fn routes(database: Arc<DatabaseService>) -> Router<()> {
    let state = TablesApiState { database };

    Router::new()
        .route("/account", get(list_accounts))
        .route("/influencer", get(list_influencers))
        .route("/brandDeal", get(list_brand_deals))
        .route("/company", get(list_companies))
        .route("/post", get(list_posts))
        .with_state(state)
}

async fn rows_of(state: &TablesApiState, table: FixedTable) -> Result<Json<RowsResponse>, ApiError> {
    let rows = fetch_table(state.database.executor(), table)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(RowsResponse::new(rows)))
}

#[utoipa::path(
    get,
    path = "/account",
    tag = "tables",
    responses((status = 200, description = "Every Account row", body = RowsResponse))
)]
pub async fn list_accounts(
    State(state): State<TablesApiState>,
) -> Result<Json<RowsResponse>, ApiError> {
    rows_of(&state, FixedTable::Account).await
}

#[utoipa::path(
    get,
    path = "/influencer",
    tag = "tables",
    responses((status = 200, description = "Every Influencer row", body = RowsResponse))
)]
pub async fn list_influencers(
    State(state): State<TablesApiState>,
) -> Result<Json<RowsResponse>, ApiError> {
    rows_of(&state, FixedTable::Influencer).await
}

#[utoipa::path(
    get,
    path = "/brandDeal",
    tag = "tables",
    responses((status = 200, description = "Every BrandDealOne row", body = RowsResponse))
)]
pub async fn list_brand_deals(
    State(state): State<TablesApiState>,
) -> Result<Json<RowsResponse>, ApiError> {
    rows_of(&state, FixedTable::BrandDeal).await
}

#[utoipa::path(
    get,
    path = "/company",
    tag = "tables",
    responses((status = 200, description = "Every SponsorCompany row", body = RowsResponse))
)]
pub async fn list_companies(
    State(state): State<TablesApiState>,
) -> Result<Json<RowsResponse>, ApiError> {
    rows_of(&state, FixedTable::Company).await
}

#[utoipa::path(
    get,
    path = "/post",
    tag = "tables",
    responses((status = 200, description = "Every PostOne row", body = RowsResponse))
)]
pub async fn list_posts(State(state): State<TablesApiState>) -> Result<Json<RowsResponse>, ApiError> {
    rows_of(&state, FixedTable::Post).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_support::{seeded, send};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_each_table_route() {
        let db = seeded().await;
        for (uri, count) in [
            ("/account", 7),
            ("/influencer", 4),
            ("/brandDeal", 3),
            ("/company", 3),
            ("/post", 4),
        ] {
            let (status, body) = send(routes(db.clone()), Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(body["data"].as_array().unwrap().len(), count, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_rows_are_positional_arrays() {
        let db = seeded().await;
        let (_, body) = send(routes(db), Method::GET, "/company", None).await;
        assert_eq!(body["data"][0], json!([10, "Acme", "apparel"]));
    }

    #[tokio::test]
    async fn test_empty_table() {
        let db = DatabaseService::sqlite_in_memory().await;
        let (status, body) = send(routes(db), Method::GET, "/post", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": []}));
    }

    #[tokio::test]
    async fn test_database_failure_is_500() {
        let db = seeded().await;
        db.close().await;
        let (status, body) = send(routes(db), Method::GET, "/influencer", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL");
    }
}
