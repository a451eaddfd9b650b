//! API Key generation
//!
//! Generates random API keys and the hash/prefix pair stored for them.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Keys shorter than this are never accepted
pub const MIN_KEY_LENGTH: usize = 24;

/// Number of leading key bytes used to look a key up
pub const LOOKUP_PREFIX_LENGTH: usize = 16;

pub const DEFAULT_KEY_PREFIX: &str = "wsk_";

/// Random bytes in every generated key
const KEY_BYTES: usize = 32;

/// Result of generating a new API key
#[derive(Debug, Clone)]
pub struct GeneratedApiKey {
    /// The full API key (only shown once at creation)
    pub key: String,
    /// Lookup prefix stored alongside the hash
    pub prefix: String,
    /// The hashed key for storage
    pub hash: String,
}

/// Generator for workspace API keys
#[derive(Debug, Clone)]
pub struct ApiKeyGenerator {
    /// Prefix for all generated keys (e.g., "wsk_")
    prefix: String,
}

impl ApiKeyGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Generate a new random API key
    pub fn generate(&self) -> GeneratedApiKey {
        let mut random_bytes = [0u8; KEY_BYTES];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        let key = format!("{}{}", self.prefix, URL_SAFE_NO_PAD.encode(random_bytes));
        let prefix = Self::lookup_prefix(&key).unwrap_or(&key).to_string();
        let hash = Self::hash_key(&key);

        GeneratedApiKey { key, prefix, hash }
    }

    /// Build the stored form of a key that was chosen outside the generator
    ///
    /// Returns `None` when the key is too short to be looked up safely.
    pub fn from_key(key: &str) -> Option<GeneratedApiKey> {
        let prefix = Self::lookup_prefix(key)?;

        Some(GeneratedApiKey {
            key: key.to_string(),
            prefix: prefix.to_string(),
            hash: Self::hash_key(key),
        })
    }

    /// Hash an API key for storage
    pub fn hash_key(key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let result = hasher.finalize();
        format!("sha256${}", URL_SAFE_NO_PAD.encode(result))
    }

    /// Verify an API key against a stored hash
    pub fn verify_key(key: &str, stored_hash: &str) -> bool {
        let computed_hash = Self::hash_key(key);
        constant_time_compare(&computed_hash, stored_hash)
    }

    /// Extract the lookup prefix of a presented key
    ///
    /// The prefix is cut back to the previous character boundary when byte
    /// `LOOKUP_PREFIX_LENGTH` falls inside a multi-byte character.
    pub fn lookup_prefix(key: &str) -> Option<&str> {
        if key.len() < MIN_KEY_LENGTH {
            return None;
        }

        (0..=LOOKUP_PREFIX_LENGTH)
            .rev()
            .find(|&end| key.is_char_boundary(end))
            .and_then(|end| key.get(..end))
    }
}

/// Constant-time string comparison to prevent timing attacks
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

impl Default for ApiKeyGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX)
    }
}
