//! Application configuration loaded from environment variables.
//!
//! These settings shape the service around the stats engine. Week start and
//! monthly bucketing are fixed behaviour of the engine and are not
//! configurable.

use crate::time_utils::offset_from_minutes;
use chrono::FixedOffset;
use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Serve stats through the per-user report cache
    pub stats_cache_enabled: bool,
    /// Offset for the service clock and for server-stamped activities
    pub default_utc_offset: FixedOffset,
}

impl Config {
    /// Deterministic config for tests.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            stats_cache_enabled: true,
            default_utc_offset: crate::time_utils::utc_offset(),
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port: u16 = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };

        let stats_cache_enabled = match env::var("STATS_CACHE_ENABLED") {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid("STATS_CACHE_ENABLED", raw))?,
            Err(_) => true,
        };

        let default_utc_offset = match env::var("DEFAULT_UTC_OFFSET_MINUTES") {
            Ok(raw) => raw
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(offset_from_minutes)
                .ok_or(ConfigError::Invalid("DEFAULT_UTC_OFFSET_MINUTES", raw))?,
            Err(_) => crate::time_utils::utc_offset(),
        };

        Ok(Self {
            port,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            stats_cache_enabled,
            default_utc_offset,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
