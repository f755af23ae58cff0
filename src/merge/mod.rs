//! Merge subsystem.
//!
//! # Data Flow
//! ```text
//! RelayRequest
//!     → upstream.rs (fetch remote document + Content-Type)
//!     → engine.rs (route, read local file, apply query policy)
//!     → sections (read from remote, replace in local)
//!     → RelayResponse
//! ```
//!
//! # Design Decisions
//! - No caching: every request re-fetches and re-reads
//! - Banner only prepended when the query names something
//! - Upstream failure is the only error that escapes the engine

pub mod engine;
pub mod upstream;

pub use engine::{banner_line, overlay, MergeEngine, RelayRequest};
pub use upstream::{RemoteDocument, Upstream};
