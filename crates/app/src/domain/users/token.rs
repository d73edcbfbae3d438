//! API token generation and hashing.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// API token prefix.
pub const API_TOKEN_PREFIX: &str = "sf";

/// Generate a new raw API token. Only its hash is ever stored.
#[must_use]
pub fn generate_token() -> String {
    format!(
        "{API_TOKEN_PREFIX}_{}{}",
        Uuid::now_v7().simple(),
        Uuid::new_v4().simple()
    )
}

/// Hex-encoded SHA-256 of a raw token, as stored in `api_tokens.token_hash`.
#[must_use]
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
