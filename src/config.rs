//! Client configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default API endpoint for local development.
const DEFAULT_API_URL: &str = "http://localhost:8001";

/// Default toast lifetime in milliseconds.
const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the club API (no trailing slash)
    pub api_url: String,
    /// File where the session keys are persisted
    pub session_file: PathBuf,
    /// How long a toast stays visible by default
    pub toast_duration: Duration,
    /// Suffix appended to page titles
    pub site_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local
    /// development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("JUDO_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::Invalid("JUDO_API_URL", api_url));
        }

        let session_file = match env::var("JUDO_SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_session_file()?,
        };

        let toast_duration = match env::var("TOAST_DURATION_MS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::Invalid("TOAST_DURATION_MS", raw))?,
            Err(_) => Duration::from_millis(DEFAULT_TOAST_DURATION_MS),
        };

        Ok(Self {
            api_url,
            session_file,
            toast_duration,
            site_name: env::var("SITE_NAME").unwrap_or_else(|_| "Judo Club Hem".to_string()),
        })
    }

    /// Config for tests: local API, throwaway session file.
    pub fn test_default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: env::temp_dir().join("judo-club-test-session.json"),
            toast_duration: Duration::from_millis(DEFAULT_TOAST_DURATION_MS),
            site_name: "Judo Club Hem".to_string(),
        }
    }
}

fn default_session_file() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("judo-club").join("session.json"))
        .ok_or(ConfigError::Missing("JUDO_SESSION_FILE"))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
