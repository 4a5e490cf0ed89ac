use std::time::Duration;

use thiserror::Error;

use crate::constants::{DEFAULT_SHEET_NAME, SHEET_QUERY_BASE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Data source
    pub feed_url: String,
    pub fetch_timeout: Duration,

    // Web Server
    pub web_host: String,
    pub web_port: u16,

    // Rendering
    pub card_rotation: Duration,
    pub detail_rotation: Duration,
    pub page_size: usize,
    pub narrow_viewport_max: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `FEED_URL` wins when set; otherwise the URL is built from `SHEET_ID`
    /// and `SHEET_NAME`.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let feed_url = match optional_env("FEED_URL") {
            Some(url) => url,
            None => sheet_query_url(
                &required_env("SHEET_ID")?,
                &env_or_default("SHEET_NAME", DEFAULT_SHEET_NAME),
            ),
        };

        Ok(Self {
            // Data source
            feed_url,
            fetch_timeout: Duration::from_secs(parse_env_u64("FETCH_TIMEOUT_SECS", 30)?),

            // Web Server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8080)?,

            // Rendering
            card_rotation: Duration::from_millis(parse_env_u64("CARD_ROTATION_MS", 3000)?),
            detail_rotation: Duration::from_millis(parse_env_u64("DETAIL_ROTATION_MS", 4000)?),
            page_size: parse_env_usize("PAGE_SIZE", 10)?,
            narrow_viewport_max: parse_env_u32("NARROW_VIEWPORT_MAX", 768)?,
        })
    }

    /// Configuration with defaults and a placeholder feed URL, for tests.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            feed_url: "http://127.0.0.1:9/feed".to_string(),
            fetch_timeout: Duration::from_secs(5),
            web_host: "127.0.0.1".to_string(),
            web_port: 8080,
            card_rotation: Duration::from_millis(3000),
            detail_rotation: Duration::from_millis(4000),
            page_size: 10,
            narrow_viewport_max: 768,
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "FEED_URL".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "PAGE_SIZE".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.card_rotation.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "CARD_ROTATION_MS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.detail_rotation < self.card_rotation {
            return Err(ConfigError::InvalidValue {
                name: "DETAIL_ROTATION_MS".to_string(),
                message: "must not be shorter than CARD_ROTATION_MS".to_string(),
            });
        }
        Ok(())
    }
}

/// Build the visualization query URL for one sheet tab.
#[must_use]
pub fn sheet_query_url(sheet_id: &str, sheet_name: &str) -> String {
    format!(
        "{SHEET_QUERY_BASE}/{sheet_id}/gviz/tq?tqx=out:json&sheet={}",
        urlencoding::encode(sheet_name)
    )
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    optional_env(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u32(name: &str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}
