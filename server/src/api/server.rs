//! API server initialization

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::Redirect;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::middleware::{self, AllowedOrigins};
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{accounts, brand_deals, catalog, health, influencers, reports, tables};
use crate::core::CoreApp;
use crate::core::constants::DEFAULT_BODY_LIMIT;
use crate::data::DatabaseService;

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);
        Self {
            app,
            allowed_origins,
        }
    }

    /// Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        let shutdown = app.shutdown.clone();

        let host = app.config.server.host.clone();
        let port = app.config.server.port;
        let addr = SocketAddr::new(
            host.parse()
                .with_context(|| format!("Invalid listen address: {}", host))?,
            port,
        );

        let router = build_router(
            app.database.clone(),
            app.config.server.static_dir.as_deref(),
            &allowed_origins,
        );

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::debug!(%addr, "HTTP server listening");

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .await?;

        Ok(app)
    }
}

/// Assemble every route, the fallback and the shared layers
pub fn build_router(
    database: Arc<DatabaseService>,
    static_dir: Option<&Path>,
    allowed_origins: &AllowedOrigins,
) -> Router {
    let router = Router::new()
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/docs", get(swagger_ui_html))
        .route("/api/docs/", get(swagger_ui_html))
        .merge(health::routes(database.clone()))
        .merge(tables::routes(database.clone()))
        .merge(influencers::routes(database.clone()))
        .merge(accounts::routes(database.clone()))
        .merge(brand_deals::routes(database.clone()))
        .merge(catalog::routes(database.clone()))
        .merge(reports::routes(database));

    // Frontend files for everything else, or the API docs and a logged 404
    let router = match static_dir {
        Some(dir) => {
            tracing::debug!(dir = %dir.display(), "Serving static frontend");
            router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true))
        }
        None => router
            .route("/", get(|| async { Redirect::temporary("/api/docs") }))
            .fallback(middleware::handle_404),
    };

    router
        .layer(CompressionLayer::new())
        .layer(middleware::cors(allowed_origins))
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
}
