use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// User-Agent sent when the caller doesn't supply one
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
);

/// Scraper engine configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub port: u16,
    pub fetch_timeout: Duration,
    pub user_agent: String,
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse().context("PORT must be a valid port number")?,
            Err(_) => 3000,
        };
        let fetch_timeout_ms: u64 = match env::var("FETCH_TIMEOUT_MS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .context("FETCH_TIMEOUT_MS must be a number of milliseconds")?,
            Err(_) => 10_000,
        };

        Ok(Self {
            port,
            fetch_timeout: Duration::from_millis(fetch_timeout_ms),
            user_agent: env::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            fetch_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
