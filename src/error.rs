use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::time::Duration;
use thiserror::Error;
use tracing::error;

use crate::constants::{
    CATALOG_UNAVAILABLE_MESSAGE, RENDER_FAILED_MESSAGE, UNKNOWN_BRANCH_MESSAGE,
};

#[derive(Error, Debug)]
pub enum StockError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {message}")]
    Catalog { message: String },

    #[error("Catalog lookup timed out after {limit:?}")]
    Timeout { limit: Duration },

    #[error("Unknown branch: {0}")]
    UnknownBranch(String),

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("Bot API error: {message}")]
    Bot { message: String },

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, StockError>;

impl StockError {
    /// HTTP status a request failing with this error should answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            StockError::UnknownBranch(_) => StatusCode::NOT_FOUND,
            StockError::Http(_)
            | StockError::Json(_)
            | StockError::Catalog { .. }
            | StockError::Timeout { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for StockError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            StockError::UnknownBranch(_) => UNKNOWN_BRANCH_MESSAGE,
            _ if status == StatusCode::BAD_GATEWAY => CATALOG_UNAVAILABLE_MESSAGE,
            _ => RENDER_FAILED_MESSAGE,
        };
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "Request failed");
        }
        (status, Html(body.to_string())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_branch_maps_to_not_found() {
        let err = StockError::UnknownBranch("nirgendwo".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_failures_map_to_bad_gateway() {
        let timeout = StockError::Timeout {
            limit: Duration::from_secs(10),
        };
        let catalog = StockError::Catalog {
            message: "status 503".to_string(),
        };
        assert_eq!(timeout.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(catalog.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn timeout_message_keeps_sub_second_limits() {
        let err = StockError::Timeout {
            limit: Duration::from_millis(10),
        };
        assert_eq!(err.to_string(), "Catalog lookup timed out after 10ms");
    }

    #[test]
    fn config_errors_are_internal() {
        let err = StockError::Config("missing token".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Configuration error: missing token");
    }
}
