//! Observability for the search functions service.
//!
//! - Structured logging via `tracing`, JSON or pretty output
//! - Request ID propagation through `x-request-id`
//! - HTTP middleware for request/response logging and slow request detection

pub mod init;
pub mod middleware;

pub use init::*;
pub use middleware::*;

pub use tracing::{debug, error, info, warn};
