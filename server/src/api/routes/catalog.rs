//! Catalog browsing and projection endpoints

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::types::{ApiError, NamesResponse, RowsResponse};
use crate::core::constants::MAX_PROJECTION_COLUMNS;
use crate::data::DatabaseService;
use crate::data::repositories::{list_columns, list_tables, projection};

/// Shared state for catalog endpoints
#[derive(Clone)]
pub struct CatalogApiState {
    pub database: Arc<DatabaseService>,
}

/// Build catalog routes
pub fn routes(database: Arc<DatabaseService>) -> Router<()> {
    let state = CatalogApiState { database };

    Router::new()
        .route("/table-names", get(table_names))
        .route("/table-attributes/{table}", get(table_attributes))
        .route("/projection-table/{table}/{columns}", get(project_table))
        .with_state(state)
}

/// Names of the user tables
#[utoipa::path(
    get,
    path = "/table-names",
    tag = "catalog",
    responses((status = 200, description = "Table names", body = NamesResponse))
)]
pub async fn table_names(
    State(state): State<CatalogApiState>,
) -> Result<Json<NamesResponse>, ApiError> {
    let data = list_tables(state.database.executor())
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(NamesResponse { data }))
}

/// Column names of one table
#[utoipa::path(
    get,
    path = "/table-attributes/{table}",
    tag = "catalog",
    params(("table" = String, Path, description = "Table name (case-insensitive)")),
    responses(
        (status = 200, description = "Column names in declaration order", body = NamesResponse),
        (status = 404, description = "Unknown table")
    )
)]
pub async fn table_attributes(
    State(state): State<CatalogApiState>,
    Path(table): Path<String>,
) -> Result<Json<NamesResponse>, ApiError> {
    let data = list_columns(state.database.executor(), &table)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(NamesResponse { data }))
}

/// Selected columns of one table
#[utoipa::path(
    get,
    path = "/projection-table/{table}/{columns}",
    tag = "catalog",
    params(
        ("table" = String, Path, description = "Table name (case-insensitive)"),
        ("columns" = String, Path, description = "Comma-separated column names")
    ),
    responses(
        (status = 200, description = "Projected rows", body = RowsResponse),
        (status = 400, description = "Unknown or missing column"),
        (status = 404, description = "Unknown table")
    )
)]
pub async fn project_table(
    State(state): State<CatalogApiState>,
    Path((table, columns)): Path<(String, String)>,
) -> Result<Json<RowsResponse>, ApiError> {
    let columns = split_columns(&columns);
    if columns.len() > MAX_PROJECTION_COLUMNS {
        return Err(ApiError::bad_request(
            "TOO_MANY_COLUMNS",
            format!("At most {} columns can be projected", MAX_PROJECTION_COLUMNS),
        ));
    }

    let rows = projection(state.database.executor(), &table, &columns)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(RowsResponse::new(rows)))
}

/// Split a comma-separated column list, dropping blank entries
fn split_columns(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}
