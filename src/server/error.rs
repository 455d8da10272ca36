// src/server/error.rs
// =============================================================================
// Errors returned by the HTTP handlers, and how they turn into responses.
//
// - A missing "website" field is the caller's fault: 400
// - A crawl that could not even start is reported as a 500
//
// The body is always {"error": "..."}.
// =============================================================================

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::CrawlError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Website URL is required")]
    MissingWebsite,

    #[error("Crawl failed: {0}")]
    Crawl(#[from] CrawlError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingWebsite => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Crawl(e) => {
                tracing::error!("Error in scrape-emails: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
