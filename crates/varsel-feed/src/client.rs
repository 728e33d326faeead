//! HTTP client for the shop's variation feed endpoint.

use std::time::Duration;

use reqwest::Client;

use crate::error::FeedError;
use crate::types::FeedDocument;

/// HTTP client for the JSON variation feed.
///
/// Handles not-found (404) and other non-2xx responses as typed errors. One
/// budget covers the whole fetch: `timeout_secs` spans connect through body
/// read, so a slow upstream cannot stall a page render past it.
pub struct FeedClient {
    client: Client,
    url: String,
}

impl FeedClient {
    /// Creates a `FeedClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        url: impl Into<String>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Fetches and parses the variation feed.
    ///
    /// # Errors
    ///
    /// - [`FeedError::NotFound`] — HTTP 404.
    /// - [`FeedError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`FeedError::Http`] — network, TLS, or timeout failure.
    /// - [`FeedError::Deserialize`] — response body is not a valid feed document.
    pub async fn fetch(&self) -> Result<FeedDocument, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FeedError::NotFound {
                url: self.url.clone(),
            });
        }

        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<FeedDocument>(&body).map_err(|e| FeedError::Deserialize {
            context: format!("variation feed from {}", self.url),
            source: e,
        })
    }

    /// The configured feed URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}
