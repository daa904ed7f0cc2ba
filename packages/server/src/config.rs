use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub project_name: String,
    pub fast_engine_url: String,
    pub fast_engine_timeout: Duration,
    pub heavy_engine_enabled: bool,
    pub heavy_engine_timeout: Duration,
    pub heavy_engine_max_sessions: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
            port: parse_or("PORT", 8000)?,
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "Mall Chatbot".to_string()),
            fast_engine_url: env::var("FAST_ENGINE_URL")
                .unwrap_or_else(|_| extraction::DEFAULT_FAST_ENGINE_URL.to_string()),
            fast_engine_timeout: Duration::from_millis(parse_or("FAST_ENGINE_TIMEOUT_MS", 3000)?),
            heavy_engine_enabled: parse_or("HEAVY_ENGINE_ENABLED", true)?,
            heavy_engine_timeout: Duration::from_millis(parse_or(
                "HEAVY_ENGINE_TIMEOUT_MS",
                10_000,
            )?),
            heavy_engine_max_sessions: parse_or(
                "HEAVY_ENGINE_MAX_SESSIONS",
                extraction::DEFAULT_MAX_SESSIONS,
            )?,
        })
    }
}

/// Read `key` and parse it, falling back to `default` when unset.
fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid {}", key, std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}
