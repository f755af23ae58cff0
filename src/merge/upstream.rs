//! Remote document fetch.

use axum::http::HeaderValue;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::config::schema::UpstreamConfig;
use crate::error::UpstreamError;

/// Body and content type of the remote document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDocument {
    pub body: String,
    pub content_type: Option<HeaderValue>,
}

/// HTTP client bound to the configured remote URL.
#[derive(Debug, Clone)]
pub struct Upstream {
    client: reqwest::Client,
    url: Url,
}

impl Upstream {
    /// Build a client for `config`. A configured timeout bounds the whole fetch.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(UpstreamError::Request)?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Fetch the remote document.
    ///
    /// Non-success statuses are not errors; their body is relayed as-is.
    pub async fn fetch(&self) -> Result<RemoteDocument, UpstreamError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(UpstreamError::Request)?;

        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response.text().await.map_err(UpstreamError::Body)?;

        tracing::debug!(
            url = %self.url,
            status = %status,
            bytes = body.len(),
            "Fetched remote document"
        );

        Ok(RemoteDocument { body, content_type })
    }
}
