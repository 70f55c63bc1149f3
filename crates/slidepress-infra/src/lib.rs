//! Slidepress Infrastructure Library
//!
//! Shared infrastructure for the Slidepress service:
//! - Middleware (request ID)
//! - Telemetry initialization
//! - HTTP error response body

pub mod error;
pub mod middleware;
pub mod telemetry;

// Re-export commonly used types
pub use error::ErrorResponse;
pub use middleware::{request_id_middleware, RequestId};
pub use telemetry::{init_telemetry, shutdown_telemetry, LogFormat};
