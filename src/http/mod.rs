//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, host/path/query extraction)
//!     → [merge engine fetches, routes, overlays]
//!     → response.rs (status, headers, body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{relay_request, X_REQUEST_ID};
pub use response::{RelayResponse, CONTENT_DISPOSITION};
pub use server::HttpServer;
