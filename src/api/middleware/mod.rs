//! API middleware components

pub mod auth;
pub mod logging;
pub mod metrics;

pub use auth::require_api_key;
pub use logging::logging_middleware;
pub use metrics::metrics_middleware;
