//! Greeting API with input sanitization and request statistics.
//!
//! Serves random and personalized greetings over HTTP, wraps every
//! response in a `{success, data | error}` envelope, and counts each
//! inbound request for the statistics endpoint.
//!
//! ```text
//! POST /api/hello/custom  {"name": "María", "language": "es"}
//! ──────────────────────────────────────────────────────────
//! {"success": true, "data": {"message": "¡Hola, María!", ...}}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Validation and API error types
//! - [`greeting`]: Name sanitization, language catalog, greeting operations
//! - [`stats`]: Request counter and uptime tracking
//! - [`api`]: HTTP router, handlers and middleware
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Timestamps and shutdown signal

pub mod api;
pub mod config;
pub mod error;
pub mod greeting;
pub mod metrics;
pub mod stats;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, Result, ValidationError};
