//! Path-based local file selection.
//!
//! # Responsibilities
//! - Extract the first path segment
//! - Block segments that collide with reserved keys
//! - Map the segment to a configured local file, or the default file for `/`
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Exact, case-sensitive segment lookup; no decoding of the segment
//! - Explicit `Invalid` rather than silent fallback to the default file

use std::path::PathBuf;

use crate::config::schema::{is_reserved, FileTable, RelayConfig};

/// Outcome of routing a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Segment is one of the reserved configuration keys.
    Reserved(String),
    /// Segment does not name a configured file.
    Invalid(String),
    /// A local file was selected.
    File(FileSelection),
}

/// The local file chosen for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    /// First path segment; empty for the default file.
    pub segment: String,
    /// Path to read.
    pub path: PathBuf,
    /// Whether `path` came from a named key rather than the default.
    pub named: bool,
}

impl FileSelection {
    /// Path label used in "File not found" replies.
    ///
    /// The default file is reported as `undefined`.
    pub fn display_path(&self) -> String {
        if self.named {
            self.path.display().to_string()
        } else {
            "undefined".to_string()
        }
    }
}

/// Resolves request paths to local files.
#[derive(Debug, Clone)]
pub struct Router {
    default_file: PathBuf,
    files: FileTable,
}

impl Router {
    /// Build a router from a set of named files and a default.
    pub fn new(default_file: impl Into<PathBuf>, files: FileTable) -> Self {
        Self {
            default_file: default_file.into(),
            files,
        }
    }

    /// Build a router from the relay configuration.
    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.default_file.clone(), config.files.clone())
    }

    /// Decide which local file serves `path`.
    pub fn resolve(&self, path: &str) -> Route {
        let segment = first_segment(path);

        if is_reserved(segment) {
            return Route::Reserved(segment.to_string());
        }

        if segment.is_empty() {
            return Route::File(FileSelection {
                segment: String::new(),
                path: self.default_file.clone(),
                named: false,
            });
        }

        match self.files.get(segment) {
            Some(path) => Route::File(FileSelection {
                segment: segment.to_string(),
                path: path.to_path_buf(),
                named: true,
            }),
            None => Route::Invalid(segment.to_string()),
        }
    }
}

/// Text between the leading slash and the next one.
fn first_segment(path: &str) -> &str {
    path.split('/').nth(1).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn router() -> Router {
        let files: FileTable = [("mobile", "/srv/mobile.conf"), ("HOME", "/root")]
            .into_iter()
            .collect();
        Router::new("/srv/default.conf", files)
    }

    #[test]
    fn segment_extraction() {
        assert_eq!(first_segment("/"), "");
        assert_eq!(first_segment(""), "");
        assert_eq!(first_segment("/mobile"), "mobile");
        assert_eq!(first_segment("/mobile/extra"), "mobile");
        assert_eq!(first_segment("//mobile"), "");
    }

    #[test]
    fn root_uses_default_file() {
        match router().resolve("/") {
            Route::File(selection) => {
                assert_eq!(selection.path, Path::new("/srv/default.conf"));
                assert!(!selection.named);
                assert_eq!(selection.display_path(), "undefined");
            }
            other => panic!("unexpected route: {other:?}"),
        }
    }

    #[test]
    fn named_segment_selects_file() {
        match router().resolve("/mobile") {
            Route::File(selection) => {
                assert_eq!(selection.segment, "mobile");
                assert_eq!(selection.path, Path::new("/srv/mobile.conf"));
                assert_eq!(selection.display_path(), "/srv/mobile.conf");
            }
            other => panic!("unexpected route: {other:?}"),
        }
    }

    #[test]
    fn reserved_segments_short_circuit() {
        for key in ["PORT", "URL", "FILE", "HTTPS"] {
            assert_eq!(
                router().resolve(&format!("/{key}")),
                Route::Reserved(key.to_string())
            );
        }
        // Reserved matching is case-sensitive.
        assert_eq!(router().resolve("/port"), Route::Invalid("port".into()));
    }

    #[test]
    fn unknown_segment_is_invalid() {
        assert_eq!(
            router().resolve("/unknownkey"),
            Route::Invalid("unknownkey".into())
        );
    }
}
