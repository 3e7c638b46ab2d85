//! Cipher error types.

use crate::{KEY_LEN, NONCE_LEN};

/// Errors from constructing a cipher.
#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    #[error("invalid key length: expected {KEY_LEN} bytes, got {actual}")]
    InvalidKeyLength { actual: usize },

    #[error("invalid nonce length: expected {NONCE_LEN} bytes, got {actual}")]
    InvalidNonceLength { actual: usize },
}
