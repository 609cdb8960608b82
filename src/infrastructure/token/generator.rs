//! Random token generation for provisioning

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;

use crate::domain::token::Token;

const DEFAULT_TOKEN_BYTES: usize = 20;

/// Generates URL-safe random tokens with an optional prefix
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    prefix: String,
    token_bytes: usize,
}

impl TokenGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            token_bytes: DEFAULT_TOKEN_BYTES,
        }
    }

    pub fn with_token_bytes(mut self, bytes: usize) -> Self {
        self.token_bytes = bytes;
        self
    }

    pub fn generate(&self) -> Token {
        let mut random_bytes = vec![0u8; self.token_bytes];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        Token::new(format!(
            "{}{}",
            self.prefix,
            URL_SAFE_NO_PAD.encode(&random_bytes)
        ))
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new("tok_")
    }
}
