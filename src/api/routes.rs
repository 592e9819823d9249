use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::AppState;
use crate::api::models::{HealthResponse, RootResponse, ScrapeQuery, ScrapeRequest, ScrapeResponse};
use crate::api::response::panic_response;
use crate::error::{AppError, Result};
use crate::recency::{DEFAULT_LOOKBACK_DAYS, filter_recent};
use crate::scraper::VideoQuery;
use crate::video::normalize;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/scrape/:username", post(scrape_handler))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "TikTok Scraper Service is running",
    })
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "tiktok-scraper",
    })
}

async fn scrape_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
    body: Bytes,
) -> Result<Json<ScrapeResponse>> {
    info!(%username, "scraping videos");
    let start_time = std::time::Instant::now();

    let request = parse_scrape_body(&body)?;
    let query = ScrapeQuery::from_parts(&username, request)?;
    let response = process_scrape_request(&state, &query).await?;

    info!(
        handle = %response.handle,
        recent = response.videos.len(),
        elapsed = ?start_time.elapsed(),
        "scrape finished"
    );
    Ok(Json(response))
}

/// The body is optional: empty or `null` means "use defaults".
fn parse_scrape_body(body: &[u8]) -> Result<Option<ScrapeRequest>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<ScrapeRequest>>(body)
        .map_err(|e| AppError::ValidationError(format!("malformed request body: {}", e)))
}

async fn process_scrape_request(state: &AppState, query: &ScrapeQuery) -> Result<ScrapeResponse> {
    debug!(handle = %query.handle, count = query.count, "fetching videos");
    let raw = state
        .source
        .fetch_videos(VideoQuery {
            handle: &query.handle,
            count: query.count,
            session: &state.config.session,
        })
        .await?;

    debug!(handle = %query.handle, fetched = raw.len(), "normalizing videos");
    let videos = raw.into_iter().map(normalize).collect();

    let recent = filter_recent(videos, DEFAULT_LOOKBACK_DAYS);
    debug!(handle = %query.handle, recent = recent.len(), "filtered to recent videos");

    Ok(ScrapeResponse {
        handle: query.handle.clone(),
        message: format!("Successfully fetched {} recent videos", recent.len()),
        videos: recent,
    })
}
