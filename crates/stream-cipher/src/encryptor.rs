//! Stateful chunk-by-chunk stream encryption.

use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};

use crate::{CipherError, KEY_LEN, NONCE_LEN};

/// A sequential keystream cipher.
///
/// State advances with every call; chunks must be submitted in transfer
/// order, with no seeking or reordering.
pub trait KeystreamCipher: Send {
    /// XORs the next keystream bytes into `buf`.
    fn apply_keystream(&mut self, buf: &mut [u8]);
}

/// ChaCha20 keystream backend.
///
/// The socket endpoint derives its 16-byte ChaCha20 initialization vector
/// as a zeroed 4-byte little-endian block counter followed by the 12-byte
/// pairing nonce. The RFC 8439 construction used here, with the bare
/// 12-byte nonce and an initial counter of 0, produces the identical
/// keystream. That byte layout is a platform wire contract.
pub struct ChaCha20Keystream {
    inner: ChaCha20,
}

impl std::fmt::Debug for ChaCha20Keystream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChaCha20Keystream").finish_non_exhaustive()
    }
}

impl ChaCha20Keystream {
    /// Builds the cipher from raw pairing material.
    ///
    /// The key must be exactly [`KEY_LEN`] bytes and the nonce exactly
    /// [`NONCE_LEN`] bytes.
    pub fn new(key: &[u8], nonce: &[u8]) -> Result<Self, CipherError> {
        if key.len() != KEY_LEN {
            return Err(CipherError::InvalidKeyLength { actual: key.len() });
        }
        if nonce.len() != NONCE_LEN {
            return Err(CipherError::InvalidNonceLength {
                actual: nonce.len(),
            });
        }

        let inner = ChaCha20::new(
            chacha20::Key::from_slice(key),
            chacha20::Nonce::from_slice(nonce),
        );
        Ok(Self { inner })
    }
}

impl KeystreamCipher for ChaCha20Keystream {
    fn apply_keystream(&mut self, buf: &mut [u8]) {
        self.inner.apply_keystream(buf);
    }
}

/// Encrypts a chunk sequence under a single key and nonce.
///
/// Length-preserving: ciphertext length equals plaintext length, and chunk
/// boundaries carry no meaning. Only total byte order matters to the
/// receiver.
pub struct StreamEncryptor<C: KeystreamCipher = ChaCha20Keystream> {
    cipher: C,
}

/// Decryption is the same keystream XOR, so the decryptor is the same
/// type. Feeding ciphertext through it in order yields the plaintext.
pub type StreamDecryptor<C = ChaCha20Keystream> = StreamEncryptor<C>;

impl StreamEncryptor<ChaCha20Keystream> {
    /// Creates an encryptor from raw pairing material.
    pub fn from_pairing(key: &[u8], nonce: &[u8]) -> Result<Self, CipherError> {
        Ok(Self::with_backend(ChaCha20Keystream::new(key, nonce)?))
    }
}

impl<C: KeystreamCipher> StreamEncryptor<C> {
    /// Wraps an already-initialized cipher backend.
    pub fn with_backend(cipher: C) -> Self {
        Self { cipher }
    }

    /// Encrypts the next chunk, advancing cipher state.
    pub fn encrypt(&mut self, chunk: &[u8]) -> Vec<u8> {
        let mut out = chunk.to_vec();
        self.cipher.apply_keystream(&mut out);
        out
    }

    /// Encrypts a chunk in place.
    pub fn encrypt_in_place(&mut self, buf: &mut [u8]) {
        self.cipher.apply_keystream(buf);
    }
}
