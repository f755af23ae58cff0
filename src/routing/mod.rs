//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query)
//!     → router.rs (first path segment → reserved / invalid / local file)
//!     → query.rs (tokens → section names + SSL override)
//!     → Return: Route + QueryParams for the merge engine
//! ```
//!
//! # Design Decisions
//! - Routes derived from config at startup, immutable at runtime
//! - Deterministic: same input always yields the same route
//! - No regex; exact segment lookup only

pub mod query;
pub mod router;

pub use query::{QueryParams, SslConflict};
pub use router::{FileSelection, Route, Router};
