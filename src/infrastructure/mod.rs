//! Infrastructure layer - Service and storage implementations

pub mod api_key;
pub mod logging;
pub mod observability;
pub mod storage;
pub mod workspace;
