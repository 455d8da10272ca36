// src/server/routes.rs
// =============================================================================
// The HTTP endpoints.
//
//   POST /scrape-emails   {"website": "https://example.com"}
//                         -> 200 {"emails": ["info@example.com"]}
//   GET  /healthz         -> 200
//
// Handlers only validate input and call into the crawler; all crawl
// behaviour lives in crate::crawl.
// =============================================================================

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::ApiError;
use crate::crawl::EmailCrawler;

#[derive(Clone)]
pub struct AppState {
    pub crawler: Arc<EmailCrawler>,
}

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub website: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub emails: Vec<String>,
}

pub fn router(crawler: EmailCrawler) -> Router {
    let state = AppState {
        crawler: Arc::new(crawler),
    };

    Router::new()
        .route("/healthz", get(healthz))
        .route("/scrape-emails", post(scrape_emails))
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn scrape_emails(
    State(state): State<AppState>,
    request: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    // No body, wrong content type and broken JSON all mean "no website given"
    let request = match request {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Rejected scrape-emails body: {}", rejection);
            return Err(ApiError::MissingWebsite);
        }
    };

    let website = request
        .website
        .filter(|w| !w.trim().is_empty())
        .ok_or(ApiError::MissingWebsite)?;

    let report = state.crawler.crawl(&website).await?;

    Ok(Json(ScrapeResponse {
        emails: report.emails,
    }))
}
