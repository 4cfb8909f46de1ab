//! One-shot account tokens (invitation, password reset).
//!
//! The plaintext token is an opaque random string handed to the user by
//! email; only its SHA-256 hash is stored server-side so a database leak
//! does not expose live tokens.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a cryptographically random one-shot token.
///
/// Returns a tuple of `(plaintext_token, sha256_hex_hash)`. The plaintext
/// goes into the email; only the hash is persisted.
pub fn generate_one_shot_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a token.
///
/// Use this to compare an incoming token against the stored hash.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_hash_is_stable() {
        let (plaintext, hash) = generate_one_shot_token();
        assert_eq!(hash, hash_token(&plaintext));

        // Sanity: the hash should be a 64-char hex string (SHA-256).
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_tokens_are_unique() {
        let (a, _) = generate_one_shot_token();
        let (b, _) = generate_one_shot_token();
        assert_ne!(a, b);
    }
}
