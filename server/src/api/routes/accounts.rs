//! Account insert endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::types::{ApiError, MutationResponse, int_or_string};
use crate::data::DatabaseService;
use crate::data::repositories::insert_account;
use crate::data::types::AccountInsert;

/// Shared state for account endpoints
#[derive(Clone)]
pub struct AccountsApiState {
    pub database: Arc<DatabaseService>,
}

/// Build account routes
pub fn routes(database: Arc<DatabaseService>) -> Router<()> {
    let state = AccountsApiState { database };

    Router::new()
        .route("/insert-account", post(create_account))
        .with_state(state)
}

/// New account as sent by the insert form
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InsertAccountRequest {
    #[validate(length(min = 1, max = 255, message = "Username must be 1-255 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 64, message = "Platform must be 1-64 characters"))]
    pub platform: String,
    /// Owning influencer ID
    #[serde(deserialize_with = "int_or_string")]
    pub influencer: i64,
    #[serde(deserialize_with = "int_or_string")]
    #[validate(range(min = 0, message = "Followers must be >= 0"))]
    pub followers: i64,
    /// Activation date (`YYYY-MM-DD`)
    pub date: NaiveDate,
}

impl From<InsertAccountRequest> for AccountInsert {
    fn from(req: InsertAccountRequest) -> Self {
        Self {
            username: req.username.trim().to_string(),
            platform: req.platform.trim().to_string(),
            influencer_id: req.influencer,
            followers: req.followers,
            activation_date: req.date,
        }
    }
}

/// Insert an account
#[utoipa::path(
    post,
    path = "/insert-account",
    tag = "accounts",
    request_body = InsertAccountRequest,
    responses(
        (status = 200, description = "Account inserted", body = MutationResponse),
        (status = 400, description = "Malformed body"),
        (status = 409, description = "Duplicate account or unknown influencer")
    )
)]
pub async fn create_account(
    State(state): State<AccountsApiState>,
    ValidatedJson(request): ValidatedJson<InsertAccountRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let account = AccountInsert::from(request);
    let username = account.username.clone();

    insert_account(state.database.executor(), account)
        .await
        .map_err(ApiError::from_data)?;

    tracing::info!(%username, "Account inserted");
    Ok(Json(MutationResponse::ok()))
}
