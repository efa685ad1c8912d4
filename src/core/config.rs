use std::time::Duration;

/// All interfaces, so the widget can reach the server from another device.
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
/// Goodreads "updates" RSS feed of the user whose reading progress is served.
pub const DEFAULT_FEED_URL: &str = "https://www.goodreads.com/user/updates_rss/147409847";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

const HOST_ENV: &str = "READING_PROGRESS_HOST";
const PORT_ENV: &str = "READING_PROGRESS_PORT";
const FEED_URL_ENV: &str = "READING_PROGRESS_FEED_URL";
const FETCH_TIMEOUT_ENV: &str = "READING_PROGRESS_FETCH_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub feed_url: String,
    pub fetch_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            feed_url: DEFAULT_FEED_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `.env.local` and `READING_PROGRESS_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::from_filename(".env.local");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(host) = read(HOST_ENV) {
            config.host = host;
        }
        if let Some(port) = read(PORT_ENV) {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: PORT_ENV,
                value: port,
            })?;
        }
        if let Some(feed_url) = read(FEED_URL_ENV) {
            config.feed_url = feed_url;
        }
        if let Some(timeout) = read(FETCH_TIMEOUT_ENV) {
            let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
                key: FETCH_TIMEOUT_ENV,
                value: timeout,
            })?;
            config.fetch_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
