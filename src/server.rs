use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::{HtmlCatalogClient, StaticBranchDirectory};
use crate::config::Config;
use crate::error::{Result, StockError};
use crate::handlers::{games_index, games_search, health, movies_search, return_date};
use crate::state::AppState;

/// Create the HTTP router; everything not matched by a route is served from `static_dir`
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/games-index/", post(games_index))
        .route("/movies-search/", post(movies_search))
        .route("/games-search/", post(games_search))
        .route("/return-date/:branch_code/:media_type/:title", get(return_date))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Wire the production collaborators and serve until the process is stopped
pub async fn start_server(config: &Config) -> Result<()> {
    let catalog = HtmlCatalogClient::new(&config.catalog)?;
    let state = AppState::new(
        Arc::new(catalog),
        Arc::new(StaticBranchDirectory::default()),
        config.catalog.timeout(),
    );
    let app = create_router(state, &config.server.static_dir);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| StockError::Config(format!("Invalid listen address: {e}")))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("HTTP server running on http://{addr}");
    info!("Catalog: {}", config.catalog.base_url);
    info!("Static files: {}", config.server.static_dir);

    axum::serve(listener, app).await?;
    Ok(())
}
