//! Telegraph feed fetcher.
//!
//! One HTTP GET per call against the telegraph list endpoint, with the
//! query-parameter set and browser-identity headers the web front end
//! sends. There is no retry inside a single call; the polling interval is
//! the sole retry mechanism.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER};
use serde::Deserialize;

use crate::config::FeedConfig;
use crate::feed::types::{TelegraphItem, TelegraphSnapshot};
use crate::TelewatchError;

/// Classified failure of a single fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection, DNS or timeout failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    /// Non-2xx response status.
    #[error("unexpected status code: {0}")]
    Protocol(u16),
    /// Response is not valid JSON or lacks the expected `data.roll_data` path.
    #[error("malformed response: {0}")]
    Parse(String),
}

/// Source of telegraph snapshots.
///
/// The polling loop only depends on this trait, so any snapshot provider
/// can drive it — the production HTTP fetcher or a scripted one in tests.
#[async_trait]
pub trait SnapshotSource {
    /// Fetch the current snapshot from the upstream feed.
    async fn fetch(&self) -> Result<TelegraphSnapshot, FetchError>;
}

/// Expected response shape: `{data: {roll_data: [...]}}`.
#[derive(Debug, Deserialize)]
struct TelegraphResponse {
    data: TelegraphData,
}

#[derive(Debug, Deserialize)]
struct TelegraphData {
    roll_data: Vec<TelegraphItem>,
}

/// HTTP fetcher for the telegraph list endpoint.
pub struct TelegraphFetcher {
    client: reqwest::Client,
    config: FeedConfig,
}

impl TelegraphFetcher {
    /// Create a new fetcher from the feed configuration.
    pub fn new(config: FeedConfig) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN,zh;q=0.9,ja;q=0.8"),
        );
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json;charset=utf-8"),
        );
        headers.insert(
            REFERER,
            HeaderValue::from_str(&config.referer)
                .map_err(|e| TelewatchError::Feed(format!("invalid referer header: {e}")))?,
        );
        headers.insert(
            ORIGIN,
            HeaderValue::from_str(&config.origin)
                .map_err(|e| TelewatchError::Feed(format!("invalid origin header: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| TelewatchError::Feed(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Fetch and parse the current telegraph snapshot.
    ///
    /// On success the upstream item ordering is returned unmodified; no
    /// deduplication happens here.
    pub async fn fetch_snapshot(&self) -> Result<TelegraphSnapshot, FetchError> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&self.query_params())
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Protocol(status.as_u16()));
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        let parsed: TelegraphResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(TelegraphSnapshot::new(parsed.data.roll_data))
    }

    fn query_params(&self) -> [(&'static str, String); 6] {
        [
            ("app", self.config.app.clone()),
            ("os", self.config.os.clone()),
            ("sv", self.config.client_version.clone()),
            ("sign", self.config.sign.clone()),
            ("rn", self.config.item_count.to_string()),
            (
                "hasFirstVipArticle",
                if self.config.include_vip_article { "1" } else { "0" }.to_string(),
            ),
        ]
    }
}

#[async_trait]
impl SnapshotSource for TelegraphFetcher {
    async fn fetch(&self) -> Result<TelegraphSnapshot, FetchError> {
        self.fetch_snapshot().await
    }
}
