use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::error::{AppError, Result};

/// Browser engine the scraping engine drives for its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Browser {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(AppError::ConfigError(format!(
                "Unknown browser '{}', expected chromium, firefox or webkit",
                other
            ))),
        }
    }
}

/// Session settings handed to the scraping engine on every fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// `None` means the engine starts an anonymous session.
    pub ms_token: Option<String>,
    pub browser: Browser,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub engine_url: String,
    pub session: SessionConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("PORT").unwrap_or_else(|| "8000".to_string());
        let port = port
            .parse::<u16>()
            .map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let engine_url = var("SCRAPER_ENGINE_URL")
            .unwrap_or_else(|| "http://127.0.0.1:8001".to_string())
            .trim_end_matches('/')
            .to_string();
        if !engine_url.starts_with("http://") && !engine_url.starts_with("https://") {
            return Err(AppError::ConfigError(format!(
                "Invalid scraper engine URL: {}",
                engine_url
            )));
        }

        let ms_token = var("ms_token").filter(|token| !token.trim().is_empty());
        let browser = match var("TIKTOK_BROWSER") {
            Some(name) => name.parse()?,
            None => Browser::default(),
        };

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            engine_url,
            session: SessionConfig { ms_token, browser },
        })
    }
}
