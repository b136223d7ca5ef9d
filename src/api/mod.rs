//! HTTP API module: greeting, statistics, health and documentation endpoints.

pub mod docs;
pub mod envelope;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use envelope::Envelope;
pub use handlers::AppState;
pub use routes::{create_router, AVAILABLE_ENDPOINTS};
