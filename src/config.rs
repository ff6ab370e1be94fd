//! Configuration module for telewatch.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, TelewatchError};

/// Feed endpoint configuration.
///
/// Everything that identifies a request to the telegraph endpoint lives
/// here: the URL, the fixed query-parameter set and the browser-identity
/// headers. Nothing request-related is kept in globals.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Telegraph list endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Application id sent as the `app` query parameter.
    #[serde(default = "default_app")]
    pub app: String,
    /// Platform sent as the `os` query parameter.
    #[serde(default = "default_os")]
    pub os: String,
    /// Client version sent as the `sv` query parameter.
    #[serde(default = "default_client_version")]
    pub client_version: String,
    /// Signing token sent as the `sign` query parameter.
    ///
    /// Externally supplied credential; can be overridden with the
    /// `TELEWATCH_FEED_SIGN` environment variable.
    #[serde(default = "default_sign")]
    pub sign: String,
    /// Number of items to request per poll (`rn` query parameter).
    #[serde(default = "default_item_count")]
    pub item_count: u32,
    /// Whether to request the first VIP article (`hasFirstVipArticle`).
    #[serde(default = "default_include_vip_article")]
    pub include_vip_article: bool,
    /// User agent header asserting a browser identity.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Referer header matching the feed's web front end.
    #[serde(default = "default_referer")]
    pub referer: String,
    /// Origin header matching the feed's web origin.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Total per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://www.cls.cn/nodeapi/telegraphList".to_string()
}

fn default_app() -> String {
    "CailianpressWeb".to_string()
}

fn default_os() -> String {
    "web".to_string()
}

fn default_client_version() -> String {
    "8.4.6".to_string()
}

fn default_sign() -> String {
    "7fbe61b974fb82107a9f9c5872bd2800".to_string()
}

fn default_item_count() -> u32 {
    20
}

fn default_include_vip_article() -> bool {
    true
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36"
        .to_string()
}

fn default_referer() -> String {
    "https://www.cls.cn/telegraph".to_string()
}

fn default_origin() -> String {
    "https://www.cls.cn".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            app: default_app(),
            os: default_os(),
            client_version: default_client_version(),
            sign: default_sign(),
            item_count: default_item_count(),
            include_vip_article: default_include_vip_article(),
            user_agent: default_user_agent(),
            referer: default_referer(),
            origin: default_origin(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Polling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Interval between polls in seconds.
    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,
}

fn default_poll_interval() -> u64 {
    30
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/telewatch.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Feed endpoint configuration.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Polling configuration.
    #[serde(default)]
    pub poll: PollConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(TelewatchError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| TelewatchError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `TELEWATCH_FEED_SIGN`: Override the feed signing token
    pub fn apply_env_overrides(&mut self) {
        if let Ok(sign) = std::env::var("TELEWATCH_FEED_SIGN") {
            if !sign.is_empty() {
                self.feed.sign = sign;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The endpoint is not a parseable http(s) URL
    /// - The signing token is empty
    /// - The item count or poll interval is zero
    pub fn validate(&self) -> Result<()> {
        let endpoint = url::Url::parse(&self.feed.endpoint)
            .map_err(|e| TelewatchError::Config(format!("invalid endpoint URL: {e}")))?;
        match endpoint.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(TelewatchError::Config(format!(
                    "unsupported endpoint scheme: {scheme}"
                )));
            }
        }
        if self.feed.sign.is_empty() {
            return Err(TelewatchError::Config(
                "feed sign token is not set. \
                 Set it in config.toml or via TELEWATCH_FEED_SIGN environment variable."
                    .to_string(),
            ));
        }
        if self.feed.item_count == 0 {
            return Err(TelewatchError::Config(
                "feed item_count must be at least 1".to_string(),
            ));
        }
        if self.poll.interval_secs == 0 {
            return Err(TelewatchError::Config(
                "poll interval_secs must be at least 1".to_string(),
            ));
        }
        if self.feed.request_timeout_secs == 0 {
            return Err(TelewatchError::Config(
                "feed request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
