//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! A `RelayConfig` is built once at startup and shared read-only with every
//! request handler.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

/// Environment keys consumed by the relay itself.
///
/// These can never select a local file through the URL path.
pub const RESERVED_KEYS: [&str; 4] = ["PORT", "URL", "FILE", "HTTPS"];

/// Returns true if `key` is one of the [`RESERVED_KEYS`].
pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Root configuration for the relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Listener configuration (bind host, port).
    pub listener: ListenerConfig,

    /// Remote document source.
    pub upstream: UpstreamConfig,

    /// Advertise `https` in the managed-config banner unless overridden per request.
    pub https: bool,

    /// Local file used for requests to `/`.
    pub default_file: PathBuf,

    /// Alternate local files selectable by the first path segment.
    pub files: FileTable,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RelayConfig {
    /// Minimal configuration pointing at `url` and `default_file`.
    pub fn new(url: Url, default_file: impl Into<PathBuf>) -> Self {
        Self {
            listener: ListenerConfig::default(),
            upstream: UpstreamConfig { url, timeout: None },
            https: false,
            default_file: default_file.into(),
            files: FileTable::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Host or IP to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port (`PORT`).
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Remote document configuration.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Absolute URL of the remote document (`URL`).
    pub url: Url,

    /// Optional fetch timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// Mapping from environment key to local file path.
#[derive(Debug, Clone, Default)]
pub struct FileTable {
    entries: HashMap<String, PathBuf>,
}

impl FileTable {
    /// Look up the file configured under `key` (exact, case-sensitive).
    pub fn get(&self, key: &str) -> Option<&Path> {
        self.entries.get(key).map(PathBuf::as_path)
    }

    /// Register `path` under `key`. Reserved keys are ignored.
    pub fn insert(&mut self, key: impl Into<String>, path: impl Into<PathBuf>) {
        let key = key.into();
        if is_reserved(&key) {
            return;
        }
        self.entries.insert(key, path.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FileTable
where
    K: Into<String>,
    V: Into<PathBuf>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = FileTable::default();
        for (key, path) in iter {
            table.insert(key, path);
        }
        table
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable output for development.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Log output format.
    pub log_format: LogFormat,

    /// Prometheus exporter bind address. Disabled when `None`.
    pub metrics_address: Option<SocketAddr>,
}
