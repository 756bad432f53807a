//! Influencer search and delete endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{delete, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{InfluencerPath, ValidatedJson};
use crate::api::types::{ApiError, MutationResponse, RowsResponse};
use crate::core::constants::MAX_FILTER_CONDITIONS;
use crate::data::DatabaseService;
use crate::data::repositories::{delete_influencer, filter_influencers};
use crate::domain::filters::{FilterCondition, FilterMode, parse_filters};

/// Shared state for influencer endpoints
#[derive(Clone)]
pub struct InfluencersApiState {
    pub database: Arc<DatabaseService>,
}

/// Build influencer routes
pub fn routes(database: Arc<DatabaseService>) -> Router<()> {
    let state = InfluencersApiState { database };

    Router::new()
        .route("/filter-influencer", post(filter_all))
        .route("/filter-influencer-or", post(filter_any))
        .route("/delete-influencer/{id}", delete(remove_influencer))
        .with_state(state)
}

/// Filter request body; a missing or empty list selects every influencer
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FilterRequest {
    #[serde(default)]
    #[validate(length(max = MAX_FILTER_CONDITIONS))]
    pub filters: Option<Vec<FilterCondition>>,
}

async fn run_filter(
    state: &InfluencersApiState,
    request: FilterRequest,
    mode: FilterMode,
) -> Result<Json<RowsResponse>, ApiError> {
    let filters = request.filters.unwrap_or_default();
    let set = parse_filters(&filters)?;
    let rows = filter_influencers(state.database.executor(), set, mode)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(RowsResponse::new(rows)))
}

/// Influencers matching the filters, joined as requested (AND by default)
#[utoipa::path(
    post,
    path = "/filter-influencer",
    tag = "influencers",
    request_body = FilterRequest,
    responses(
        (status = 200, description = "Matching Influencer rows", body = RowsResponse),
        (status = 400, description = "Invalid attribute, operator or value")
    )
)]
pub async fn filter_all(
    State(state): State<InfluencersApiState>,
    ValidatedJson(request): ValidatedJson<FilterRequest>,
) -> Result<Json<RowsResponse>, ApiError> {
    run_filter(&state, request, FilterMode::Strict).await
}

/// Influencers matching any of the filters
#[utoipa::path(
    post,
    path = "/filter-influencer-or",
    tag = "influencers",
    request_body = FilterRequest,
    responses(
        (status = 200, description = "Matching Influencer rows", body = RowsResponse),
        (status = 400, description = "Invalid attribute, operator or value")
    )
)]
pub async fn filter_any(
    State(state): State<InfluencersApiState>,
    ValidatedJson(request): ValidatedJson<FilterRequest>,
) -> Result<Json<RowsResponse>, ApiError> {
    run_filter(&state, request, FilterMode::ForceOr).await
}

/// Delete one influencer (accounts and posts cascade)
#[utoipa::path(
    delete,
    path = "/delete-influencer/{id}",
    tag = "influencers",
    params(("id" = i64, Path, description = "Influencer ID")),
    responses(
        (status = 200, description = "`success` is false when no influencer has this ID", body = MutationResponse),
        (status = 400, description = "ID is not an integer")
    )
)]
pub async fn remove_influencer(
    State(state): State<InfluencersApiState>,
    path: InfluencerPath,
) -> Result<Json<MutationResponse>, ApiError> {
    let deleted = delete_influencer(state.database.executor(), path.id)
        .await
        .map_err(ApiError::from_data)?;

    if deleted == 0 {
        return Ok(Json(MutationResponse::failed(format!(
            "Cannot delete the influencer with ID {}. Check that the ID exists.",
            path.id
        ))));
    }

    tracing::info!(influencer_id = path.id, "Influencer deleted");
    Ok(Json(MutationResponse::ok()))
}
