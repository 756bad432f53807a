//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{accounts, brand_deals, catalog, health, influencers, reports, tables};
use crate::api::types::{MutationResponse, NamesResponse, ReportResponse, RowsResponse};
use crate::domain::filters::FilterCondition;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Brandlink API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Influencer and brand deal manager"
    ),
    tags(
        (name = "health", description = "Health and connectivity checks"),
        (name = "tables", description = "Whole-table listings"),
        (name = "influencers", description = "Influencer search and deletion"),
        (name = "accounts", description = "Account inserts"),
        (name = "brand-deals", description = "Brand deal updates"),
        (name = "catalog", description = "Table metadata and projections"),
        (name = "reports", description = "Join and aggregation reports")
    ),
    paths(
        // Health
        health::health,
        health::check_db_connection,
        // Tables
        tables::list_accounts,
        tables::list_influencers,
        tables::list_brand_deals,
        tables::list_companies,
        tables::list_posts,
        // Influencers
        influencers::filter_all,
        influencers::filter_any,
        influencers::remove_influencer,
        // Writes
        accounts::create_account,
        brand_deals::edit_brand_deal,
        // Catalog
        catalog::table_names,
        catalog::table_attributes,
        catalog::project_table,
        // Reports
        reports::join_table,
        reports::aggregation_with_having,
        reports::nested_aggregation,
        reports::group_by_aggregation,
        reports::division_aggregation,
    ),
    components(schemas(
        // Envelopes
        RowsResponse,
        NamesResponse,
        ReportResponse,
        MutationResponse,
        health::HealthResponse,
        // Requests
        FilterCondition,
        influencers::FilterRequest,
        accounts::InsertAccountRequest,
        brand_deals::UpdateBrandDealRequest,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Brandlink API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        html { box-sizing: border-box; overflow-y: scroll; }
        *, *:before, *:after { box-sizing: inherit; }
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout",
                deepLinking: true,
                showExtensions: true,
                showCommonExtensions: true
            });
        };
    </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/check-db-connection",
            "/filter-influencer",
            "/filter-influencer-or",
            "/delete-influencer/{id}",
            "/insert-account",
            "/update-brand-deal",
            "/projection-table/{table}/{columns}",
            "/join-table/{productionCost}",
            "/division-aggregation",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{}", path);
        }
    }

    #[test]
    fn test_openapi_serializes() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert_eq!(json["info"]["title"], "Brandlink API");
    }
}
