//! Plaintext checksum accumulation alongside upload.
//!
//! The digest is XXH3-64 over the original bytes, in source order. The
//! network carries ciphertext, the checksum covers plaintext, so the
//! completion check is an end-to-end integrity check independent of the
//! encrypted transport.

use std::future::Future;
use std::pin::Pin;

use xxhash_rust::xxh3::Xxh3;

use modelport_protocol::SocketPairing;

use crate::error::UploadError;
use crate::source::ChunkSource;
use crate::uploader::SocketUploader;

/// Wraps a chunk source, hashing every chunk as it passes through.
pub struct DigestSource<S> {
    inner: S,
    hasher: Xxh3,
}

impl<S> DigestSource<S> {
    /// Wraps `inner` with a fresh hasher.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            hasher: Xxh3::new(),
        }
    }

    /// The digest of all chunks seen so far, as 16 lowercase hex chars.
    pub fn hex_digest(&self) -> String {
        format!("{:016x}", self.hasher.digest())
    }
}

impl<S: ChunkSource> ChunkSource for DigestSource<S> {
    fn next_chunk(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<Option<Vec<u8>>>> + Send + '_>> {
        Box::pin(async move {
            let chunk = self.inner.next_chunk().await?;
            if let Some(chunk) = &chunk {
                self.hasher.update(chunk);
            }
            Ok(chunk)
        })
    }
}

/// Streams `source` to the paired socket while computing its checksum.
///
/// Drives the whole transfer: connects, sends the encrypted stream and
/// closes the connection, then returns the plaintext digest for the
/// completion call. The authentication header is transmitted but not
/// hashed; the checksum covers exactly the caller's bytes.
pub async fn write_and_digest<S: ChunkSource>(
    pairing: &SocketPairing,
    source: S,
) -> Result<String, UploadError> {
    let mut uploader = SocketUploader::connect(pairing, DigestSource::new(source)).await?;
    while uploader.next_chunk().await?.is_some() {}
    Ok(uploader.into_source().hex_digest())
}
