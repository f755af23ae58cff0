//! Response assembly.
//!
//! # Responsibilities
//! - Map relay outcomes to status, headers and body
//! - Attach upstream `Content-Type` and the fixed `Content-Disposition`
//!
//! # Design Decisions
//! - Soft errors are `200 OK` with a plaintext body and no headers of their own
//!   (no `Content-Type`, no `Content-Disposition`)
//! - Only an upstream fetch failure maps to an error status (502)
//! - Missing upstream `Content-Type` is omitted rather than invented

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::routing::SslConflict;

/// Fixed `Content-Disposition` for relayed documents.
pub const CONTENT_DISPOSITION: &str = "attachment; filename=Aggregated.conf";

/// Everything a relay request can answer with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayResponse {
    /// Path segment is a reserved key.
    Reserved(String),
    /// Path segment names no configured file.
    InvalidPath(String),
    /// Selected local file could not be read.
    FileNotFound { path: String, segment: String },
    /// Both `sslon` and `ssloff` were requested.
    SslConflict,
    /// Raw or merged configuration text.
    Document {
        body: String,
        content_type: Option<HeaderValue>,
    },
    /// The remote document could not be fetched.
    UpstreamFailed,
}

impl RelayResponse {
    /// Short label for metrics and logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Reserved(_) => "reserved",
            Self::InvalidPath(_) => "invalid_path",
            Self::FileNotFound { .. } => "file_not_found",
            Self::SslConflict => "ssl_conflict",
            Self::Document { .. } => "document",
            Self::UpstreamFailed => "upstream_failed",
        }
    }

    /// Plaintext body for soft errors.
    fn message(&self) -> Option<String> {
        match self {
            Self::Reserved(segment) => Some(format!("Reserved: {segment}")),
            Self::InvalidPath(segment) => Some(format!("Invalid path: {segment}")),
            Self::FileNotFound { path, segment } => {
                Some(format!("File not found: {path}\nFor: {segment}"))
            }
            Self::SslConflict => Some(SslConflict.to_string()),
            Self::Document { .. } | Self::UpstreamFailed => None,
        }
    }
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        match self {
            Self::UpstreamFailed => {
                (StatusCode::BAD_GATEWAY, "Upstream fetch failed").into_response()
            }
            Self::Document { body, content_type } => {
                let mut response = (StatusCode::OK, body).into_response();
                let headers = response.headers_mut();
                headers.remove(header::CONTENT_TYPE);
                if let Some(content_type) = content_type {
                    headers.insert(header::CONTENT_TYPE, content_type);
                }
                headers.insert(
                    header::CONTENT_DISPOSITION,
                    HeaderValue::from_static(CONTENT_DISPOSITION),
                );
                response
            }
            other => {
                let mut response =
                    (StatusCode::OK, other.message().unwrap_or_default()).into_response();
                response.headers_mut().remove(header::CONTENT_TYPE);
                response
            }
        }
    }
}
