//! Keystream encryption for ModelPort upload sockets.
//!
//! The upload channel carries ChaCha20 ciphertext with no authentication
//! tag. That is deliberate: confidentiality comes from the cipher, while
//! integrity is checked end to end by the plaintext XXH3-64 checksum the
//! client reports at completion. An AEAD tag would duplicate that check
//! and break the length-preserving framing the socket endpoint expects.
//!
//! There is exactly one encryptor abstraction, [`StreamEncryptor`], with
//! the concrete cipher pluggable through [`KeystreamCipher`].

mod encryptor;
mod error;

pub use encryptor::{ChaCha20Keystream, KeystreamCipher, StreamDecryptor, StreamEncryptor};
pub use error::CipherError;

/// ChaCha20 key size in bytes.
pub const KEY_LEN: usize = 32;

/// ChaCha20 nonce size in bytes.
pub const NONCE_LEN: usize = 12;
