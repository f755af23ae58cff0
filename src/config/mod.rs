//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional)
//!     → loader.rs (dotenv into process env, snapshot)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc to all request handlers
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never mutated
//! - Missing `URL` or `FILE` is fatal
//! - Every non-reserved environment key is a selectable local file

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::Overrides;
pub use schema::FileTable;
pub use schema::ListenerConfig;
pub use schema::LogFormat;
pub use schema::RelayConfig;
