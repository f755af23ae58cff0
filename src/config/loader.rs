//! Configuration loading from the environment.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::config::schema::{
    is_reserved, FileTable, ListenerConfig, LogFormat, ObservabilityConfig, RelayConfig,
    UpstreamConfig,
};
use crate::config::validation::{
    parse_default_file, parse_https, parse_port, parse_url, ValidationError,
};
use crate::error::ConfigError;

/// Settings that come from the command line rather than the environment.
#[derive(Debug, Clone)]
pub struct Overrides {
    pub host: String,
    pub upstream_timeout: Option<Duration>,
    pub metrics_address: Option<SocketAddr>,
    pub log_format: LogFormat,
}

impl Default for Overrides {
    fn default() -> Self {
        Self {
            host: ListenerConfig::default().host,
            upstream_timeout: None,
            metrics_address: None,
            log_format: LogFormat::default(),
        }
    }
}

/// Load a dotenv file into the process environment.
///
/// Variables already present are not overridden. A missing file is not an
/// error; returns whether a file was loaded.
pub fn load_env_file(path: &Path) -> Result<bool, ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(source) => Err(ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Snapshot the process environment into a `RelayConfig`.
///
/// Entries whose key or value is not valid UTF-8 are skipped.
pub fn from_env(overrides: Overrides) -> Result<RelayConfig, ConfigError> {
    let vars = std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
    from_vars(vars, overrides)
}

/// Build a `RelayConfig` from `(key, value)` pairs.
///
/// `PORT`, `URL`, `FILE` and `HTTPS` configure the relay; every other key
/// becomes a selectable local file.
pub fn from_vars<I, K, V>(vars: I, overrides: Overrides) -> Result<RelayConfig, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars: HashMap<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    let get = |key: &str| vars.get(key).map(String::as_str);

    let mut errors: Vec<ValidationError> = Vec::new();

    let port = parse_port(get("PORT")).map_err(|e| errors.push(e)).ok();
    let url = parse_url(get("URL")).map_err(|e| errors.push(e)).ok();
    let default_file = parse_default_file(get("FILE")).map_err(|e| errors.push(e)).ok();

    let (Some(port), Some(url), Some(default_file)) = (port, url, default_file) else {
        return Err(ConfigError::Validation(errors));
    };

    let files: FileTable = vars
        .iter()
        .filter(|(k, _)| !is_reserved(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(RelayConfig {
        listener: ListenerConfig {
            host: overrides.host,
            port,
        },
        upstream: UpstreamConfig {
            url,
            timeout: overrides.upstream_timeout,
        },
        https: parse_https(get("HTTPS")),
        default_file,
        files,
        observability: ObservabilityConfig {
            log_format: overrides.log_format,
            metrics_address: overrides.metrics_address,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn load(vars: &[(&str, &str)]) -> Result<RelayConfig, ConfigError> {
        from_vars(vars.iter().copied(), Overrides::default())
    }

    #[test]
    fn minimal_environment() {
        let config = load(&[
            ("URL", "https://example.com/remote.conf"),
            ("FILE", "local.conf"),
        ])
        .unwrap();

        assert_eq!(config.listener.port, 3000);
        assert!(!config.https);
        assert_eq!(config.upstream.url.as_str(), "https://example.com/remote.conf");
        assert_eq!(config.default_file, Path::new("local.conf"));
        assert!(config.files.is_empty());
    }

    #[test]
    fn other_keys_become_selectable_files() {
        let config = load(&[
            ("URL", "http://example.com/remote.conf"),
            ("FILE", "local.conf"),
            ("PORT", "4000"),
            ("HTTPS", "yes"),
            ("tablet", "/srv/tablet.conf"),
        ])
        .unwrap();

        assert_eq!(config.listener.port, 4000);
        assert!(config.https);
        assert_eq!(config.files.len(), 1);
        assert_eq!(config.files.get("tablet"), Some(Path::new("/srv/tablet.conf")));
        assert!(config.files.get("FILE").is_none());
    }

    #[test]
    fn collects_every_validation_error() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(
                    errors,
                    vec![
                        ValidationError::InvalidPort("eighty".into()),
                        ValidationError::Missing("URL"),
                        ValidationError::Missing("FILE"),
                    ]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn overrides_are_applied() {
        let overrides = Overrides {
            host: "127.0.0.1".into(),
            upstream_timeout: Some(Duration::from_secs(5)),
            metrics_address: Some("127.0.0.1:9090".parse().unwrap()),
            log_format: LogFormat::Json,
        };
        let config = from_vars(
            [("URL", "http://example.com/"), ("FILE", "a.conf")],
            overrides,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.upstream.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert!(config.observability.metrics_address.is_some());
    }

    #[test]
    fn missing_env_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_env_file(&dir.path().join("absent.env")).unwrap();
        assert!(!loaded);
    }

    #[test]
    fn env_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "CONF_RELAY_LOADER_TEST_KEY=/srv/loaded.conf").unwrap();

        assert!(load_env_file(file.path()).unwrap());
        assert_eq!(
            std::env::var("CONF_RELAY_LOADER_TEST_KEY").as_deref(),
            Ok("/srv/loaded.conf")
        );
    }
}
