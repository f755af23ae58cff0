//! Fetch, select, overlay.
//!
//! # Request Flow
//! ```text
//! fetch remote ─▶ route path ─▶ read local file ─▶ no sections? ─▶ raw remote
//!                     │               │                 │
//!                     ▼               ▼                 ▼
//!               Reserved/Invalid  FileNotFound    sslon+ssloff? ─▶ SslConflict
//!                                                       │
//!                                                       ▼
//!                                   banner + local, overlay each section ─▶ merged
//! ```
//!
//! The remote document is fetched on every request before the path is
//! validated, so rejected paths still cost one upstream round trip.

use std::path::Path;

use crate::config::RelayConfig;
use crate::error::{RelayError, UpstreamError};
use crate::http::response::RelayResponse;
use crate::merge::upstream::{RemoteDocument, Upstream};
use crate::routing::{QueryParams, Route, Router};
use crate::sections::{read_section, replace_section};

/// The parts of an incoming request the relay looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRequest {
    /// `Host` header value, echoed in the banner.
    pub host: String,
    /// Request path, e.g. `/mobile`.
    pub path: String,
    /// Raw query without the leading `?`.
    pub query: Option<String>,
}

impl RelayRequest {
    /// Original path and query as received.
    pub fn path_and_query(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }
}

/// Orchestrates a single relay request.
#[derive(Debug, Clone)]
pub struct MergeEngine {
    router: Router,
    upstream: Upstream,
    https: bool,
}

impl MergeEngine {
    pub fn new(router: Router, upstream: Upstream, https: bool) -> Self {
        Self {
            router,
            upstream,
            https,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self, UpstreamError> {
        Ok(Self::new(
            Router::from_config(config),
            Upstream::from_config(&config.upstream)?,
            config.https,
        ))
    }

    /// Serve `request`. Only an upstream failure is returned as an error.
    pub async fn handle(&self, request: &RelayRequest) -> Result<RelayResponse, RelayError> {
        let remote = self.upstream.fetch().await?;
        Ok(self.assemble(remote, request).await)
    }

    /// Everything after the fetch: routing, file read, query policy, overlay.
    pub async fn assemble(&self, remote: RemoteDocument, request: &RelayRequest) -> RelayResponse {
        let selection = match self.router.resolve(&request.path) {
            Route::Reserved(segment) => return RelayResponse::Reserved(segment),
            Route::Invalid(segment) => return RelayResponse::InvalidPath(segment),
            Route::File(selection) => selection,
        };

        let local = match read_local(&selection.path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(error = %e, segment = %selection.segment, "Failed to read local file");
                return RelayResponse::FileNotFound {
                    path: selection.display_path(),
                    segment: selection.segment,
                };
            }
        };

        let params = QueryParams::parse(request.query.as_deref());
        if params.is_empty() {
            return RelayResponse::Document {
                body: remote.body,
                content_type: remote.content_type,
            };
        }

        let ssl = match params.ssl_override() {
            Ok(forced) => forced.unwrap_or(self.https),
            Err(_) => return RelayResponse::SslConflict,
        };

        let sections = params.sections();
        tracing::info!(
            count = sections.len(),
            sections = %sections.join(", "),
            "Request for sections"
        );

        let banner = banner_line(ssl, &request.host, &request.path_and_query());
        let body = overlay(&remote.body, format!("{banner}{local}"), &sections);

        RelayResponse::Document {
            body,
            content_type: remote.content_type,
        }
    }
}

/// `#!MANAGED-CONFIG` line advertising where the merged document came from.
pub fn banner_line(ssl: bool, host: &str, path_and_query: &str) -> String {
    let scheme = if ssl { "https" } else { "http" };
    format!("#!MANAGED-CONFIG {scheme}://{host}{path_and_query}\n")
}

/// Copy each named section from `remote` over the same section in `local`,
/// in order.
pub fn overlay(remote: &str, local: String, sections: &[&str]) -> String {
    sections.iter().fold(local, |merged, name| {
        let block = read_section(remote, name);
        replace_section(&merged, &block, name)
    })
}

/// Read a local file; bytes that are not UTF-8 become U+FFFD.
async fn read_local(path: &Path) -> Result<String, RelayError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| RelayError::LocalFile {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
