pub mod api;
pub mod config;
pub mod error;
pub mod recency;
pub mod scraper;
pub mod telemetry;
pub mod video;

use std::sync::Arc;
use config::Config;
use scraper::VideoSource;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn VideoSource>,
}
