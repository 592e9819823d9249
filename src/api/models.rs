use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::video::NormalizedVideo;

pub const DEFAULT_VIDEO_COUNT: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    /// Echoed by callers; the path segment decides which account is scraped.
    pub handle: String,
    pub count: Option<u32>,
}

/// A scrape request after handle normalization and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeQuery {
    pub handle: String,
    pub count: u32,
}

impl ScrapeQuery {
    pub fn from_parts(username: &str, request: Option<ScrapeRequest>) -> Result<Self> {
        let handle = username.strip_prefix('@').unwrap_or(username);
        if handle.is_empty() {
            return Err(AppError::ValidationError("handle must not be empty".to_string()));
        }

        let count = request
            .and_then(|req| req.count)
            .unwrap_or(DEFAULT_VIDEO_COUNT);
        if count == 0 {
            return Err(AppError::ValidationError("count must be at least 1".to_string()));
        }

        Ok(ScrapeQuery {
            handle: handle.to_string(),
            count,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub handle: String,
    pub videos: Vec<NormalizedVideo>,
    pub message: String,
}

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}
