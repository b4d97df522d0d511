//! Credential token generation
//!
//! Generates cryptographically strong, URL-safe tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;

use crate::domain::credential::CredentialToken;

/// Generator for credential tokens
///
/// Tokens draw 32 bytes from the thread-local CSPRNG, a 256-bit space in
/// which birthday-bound collisions are astronomically unlikely for any
/// realistic credential count.
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    /// Prefix for all generated tokens (e.g. "sk_")
    prefix: String,
    /// Number of random bytes per token
    token_bytes: usize,
}

impl TokenGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            token_bytes: 32,
        }
    }

    /// Generator with the standard "sk_" secret-key prefix
    pub fn secret_key() -> Self {
        Self::new("sk_")
    }

    /// Set the number of random bytes
    pub fn with_token_bytes(mut self, bytes: usize) -> Self {
        self.token_bytes = bytes;
        self
    }

    /// Generate a fresh token
    pub fn generate(&self) -> CredentialToken {
        let mut random_bytes = vec![0u8; self.token_bytes];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        let encoded = URL_SAFE_NO_PAD.encode(&random_bytes);

        CredentialToken::new(format!("{}{}", self.prefix, encoded))
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::secret_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_token_has_prefix() {
        let generator = TokenGenerator::secret_key();
        let token = generator.generate();

        assert!(token.as_str().starts_with("sk_"));
    }

    #[test]
    fn test_token_length() {
        let generator = TokenGenerator::secret_key();
        let token = generator.generate();

        // 32 bytes base64-encoded = 43 chars, plus prefix
        assert_eq!(token.as_str().len(), 3 + 43);
    }

    #[test]
    fn test_custom_prefix() {
        let generator = TokenGenerator::new("qk_");
        let token = generator.generate();

        assert!(token.as_str().starts_with("qk_"));
    }

    #[test]
    fn test_custom_token_bytes() {
        let generator = TokenGenerator::secret_key().with_token_bytes(64);
        let token = generator.generate();

        assert!(token.as_str().len() > 80);
    }

    #[test]
    fn test_tokens_unique() {
        let generator = TokenGenerator::secret_key();
        let tokens: HashSet<String> = (0..1000)
            .map(|_| generator.generate().as_str().to_string())
            .collect();

        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_tokens_url_safe() {
        let generator = TokenGenerator::secret_key();

        for _ in 0..50 {
            let token = generator.generate();
            assert!(token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_')));
        }
    }
}
