use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::{AppError, Result};
use crate::video::RawVideoRecord;

/// What to fetch, and with which session.
#[derive(Debug, Clone, Copy)]
pub struct VideoQuery<'a> {
    pub handle: &'a str,
    pub count: u32,
    pub session: &'a SessionConfig,
}

/// Anything able to produce a user's latest raw video records.
#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn fetch_videos(&self, query: VideoQuery<'_>) -> Result<Vec<RawVideoRecord>>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EngineRequest<'a> {
    username: &'a str,
    count: u32,
    ms_tokens: [Option<&'a str>; 1],
    num_sessions: u32,
    sleep_after: u32,
    browser: &'static str,
}

#[derive(Deserialize)]
struct EngineResponse {
    #[serde(default, deserialize_with = "crate::video::lenient::records")]
    videos: Vec<RawVideoRecord>,
}

/// Client for the browser-automation scraping engine.
#[derive(Clone)]
pub struct EngineClient {
    client: Client,
    videos_url: String,
}

impl EngineClient {
    pub fn new(engine_url: &str) -> Result<Self> {
        // No overall timeout: browser sessions can take a long time to warm up.
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(EngineClient {
            client,
            videos_url: format!("{}/videos", engine_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl VideoSource for EngineClient {
    async fn fetch_videos(&self, query: VideoQuery<'_>) -> Result<Vec<RawVideoRecord>> {
        let body = EngineRequest {
            username: query.handle,
            count: query.count,
            ms_tokens: [query.session.ms_token.as_deref()],
            num_sessions: 1,
            sleep_after: 3,
            browser: query.session.browser.as_str(),
        };

        tracing::debug!(url = %self.videos_url, handle = query.handle, count = query.count, "calling scraping engine");
        let res = self.client.post(&self.videos_url).json(&body).send().await?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(AppError::FetchError(format!(
                "scraping engine returned {}: {}",
                status,
                text.trim()
            )));
        }

        let payload: EngineResponse = res.json().await?;
        tracing::debug!(handle = query.handle, fetched = payload.videos.len(), "scraping engine replied");
        Ok(payload.videos)
    }
}
