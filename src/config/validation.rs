//! Configuration validation.
//!
//! # Responsibilities
//! - Check that required keys (`URL`, `FILE`) are present and non-empty
//! - Validate value ranges (`PORT` fits a TCP port)
//! - Validate the remote URL is absolute http(s)
//!
//! # Design Decisions
//! - Every check is a pure function over the raw string value
//! - The loader collects all validation errors, not just first

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default listen port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// A single semantic problem with the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required but not set")]
    Missing(&'static str),

    #[error("PORT must be a port number, got {0:?}")]
    InvalidPort(String),

    #[error("URL must be an absolute http(s) URL, got {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },
}

/// Parse `PORT`, defaulting to [`DEFAULT_PORT`] when unset.
pub fn parse_port(value: Option<&str>) -> Result<u16, ValidationError> {
    match value {
        None => Ok(DEFAULT_PORT),
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ValidationError::InvalidPort(raw.to_string())),
    }
}

/// Parse the required `URL`.
pub fn parse_url(value: Option<&str>) -> Result<Url, ValidationError> {
    let raw = non_empty(value).ok_or(ValidationError::Missing("URL"))?;
    let url = Url::parse(raw).map_err(|e| ValidationError::InvalidUrl {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ValidationError::InvalidUrl {
            value: raw.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

/// Parse the required `FILE`.
pub fn parse_default_file(value: Option<&str>) -> Result<PathBuf, ValidationError> {
    non_empty(value)
        .map(PathBuf::from)
        .ok_or(ValidationError::Missing("FILE"))
}

/// `HTTPS` is on when set to any non-empty value.
pub fn parse_https(value: Option<&str>) -> bool {
    non_empty(value).is_some()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
