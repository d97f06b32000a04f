use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Json};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

use crate::aggregate::{filter_available, group_by_branch};
use crate::catalog::{BranchDirectory, CatalogClient};
use crate::constants::PLACEHOLDER_RETURN_DATE;
use crate::error::{Result, StockError};
use crate::models::{GameIndexForm, GameSearchForm, MovieSearchForm};
use crate::render::{render_flat, render_grouped};
use crate::state::AppState;
use crate::types::{BranchIndexQuery, GameQuery, MediaRecord, MediaType, MovieQuery};

/// Runs a catalog lookup, giving up once `limit` has passed
async fn with_timeout<F>(limit: Duration, lookup: F) -> Result<Vec<MediaRecord>>
where
    F: Future<Output = Result<Vec<MediaRecord>>>,
{
    match tokio::time::timeout(limit, lookup).await {
        Ok(result) => result,
        Err(_) => Err(StockError::Timeout { limit }),
    }
}

fn present(media: Vec<MediaRecord>, show_not_available: bool, media_type: MediaType) -> Result<String> {
    let media = if show_not_available {
        media
    } else {
        filter_available(media)
    };
    render_grouped(&group_by_branch(media), media_type)
}

pub async fn search_games(
    catalog: &dyn CatalogClient,
    limit: Duration,
    query: &GameQuery,
) -> Result<String> {
    let games = with_timeout(limit, catalog.find_games(&query.title, &query.platform)).await?;
    info!(title = %query.title, platform = %query.platform, hits = games.len(), "Game search");
    present(games, query.show_not_available, MediaType::Game)
}

pub async fn search_movies(
    catalog: &dyn CatalogClient,
    limit: Duration,
    query: &MovieQuery,
) -> Result<String> {
    let movies = with_timeout(limit, catalog.find_movies(&query.title)).await?;
    info!(title = %query.title, hits = movies.len(), "Movie search");
    present(movies, query.show_not_available, MediaType::Movie)
}

pub async fn index_games_by_branch(
    catalog: &dyn CatalogClient,
    branches: &dyn BranchDirectory,
    limit: Duration,
    query: &BranchIndexQuery,
) -> Result<String> {
    let Some(branch_code) = branches.resolve_branch_code(&query.branch) else {
        warn!("Requested branch: {} does not exist.", query.branch);
        return Err(StockError::UnknownBranch(query.branch.clone()));
    };
    let games = with_timeout(limit, catalog.find_available_games(&branch_code, &query.platform)).await?;
    info!(branch = %query.branch, code = %branch_code, hits = games.len(), "Game index");
    render_flat(&games)
}

pub async fn games_search(
    State(state): State<AppState>,
    Form(form): Form<GameSearchForm>,
) -> Result<Html<String>> {
    let query = GameQuery::from(form);
    search_games(state.catalog.as_ref(), state.catalog_timeout, &query)
        .await
        .map(Html)
}

pub async fn movies_search(
    State(state): State<AppState>,
    Form(form): Form<MovieSearchForm>,
) -> Result<Html<String>> {
    let query = MovieQuery::from(form);
    search_movies(state.catalog.as_ref(), state.catalog_timeout, &query)
        .await
        .map(Html)
}

pub async fn games_index(
    State(state): State<AppState>,
    Form(form): Form<GameIndexForm>,
) -> Result<Html<String>> {
    let query = BranchIndexQuery::from(form);
    index_games_by_branch(
        state.catalog.as_ref(),
        state.branches.as_ref(),
        state.catalog_timeout,
        &query,
    )
    .await
    .map(Html)
}

/// Due date of a lent out title.
///
/// The catalog does not expose per-item due dates yet, so this answers a fixed
/// placeholder for the frontend.
pub async fn return_date(
    Path((branch_code, media_type, title)): Path<(String, String, String)>,
) -> impl IntoResponse {
    info!("{} - {} - {}", branch_code, media_type, title);
    PLACEHOLDER_RETURN_DATE
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "library-stock",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
