//! Configuration relay library.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod merge;
pub mod observability;
pub mod routing;
pub mod sections;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use merge::MergeEngine;
pub use sections::{read_section, replace_section};
