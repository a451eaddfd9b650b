//! API key infrastructure - generation, validation and listing

mod generator;
mod service;

pub use generator::{
    ApiKeyGenerator, GeneratedApiKey, DEFAULT_KEY_PREFIX, LOOKUP_PREFIX_LENGTH, MIN_KEY_LENGTH,
};
pub use service::ApiKeyService;
