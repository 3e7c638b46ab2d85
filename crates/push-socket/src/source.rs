//! Plaintext chunk sources.
//!
//! A source is a finite, non-restartable sequence of byte chunks pulled
//! asynchronously. The uploader consumes chunks in order; a source is
//! never rewound or shared between transfers.

use std::collections::VecDeque;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::DEFAULT_CHUNK_SIZE;

/// An asynchronous sequence of plaintext chunks.
pub trait ChunkSource: Send {
    /// Returns the next chunk, or `None` at end of stream.
    fn next_chunk(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<Option<Vec<u8>>>> + Send + '_>>;
}

/// Reads fixed-size chunks from any async reader.
pub struct ReaderSource<R> {
    reader: R,
    chunk_size: usize,
}

impl<R: AsyncRead + Unpin + Send> ReaderSource<R> {
    /// Wraps `reader`, yielding chunks of at most `chunk_size` bytes.
    ///
    /// If `chunk_size` is 0, [`DEFAULT_CHUNK_SIZE`] is used.
    pub fn new(reader: R, chunk_size: usize) -> Self {
        let chunk_size = if chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };
        Self { reader, chunk_size }
    }
}

impl ReaderSource<File> {
    /// Opens `path` for chunked reading at [`DEFAULT_CHUNK_SIZE`].
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::open(path).await?;
        Ok(Self::new(file, DEFAULT_CHUNK_SIZE))
    }
}

impl<R: AsyncRead + Unpin + Send> ChunkSource for ReaderSource<R> {
    fn next_chunk(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<Option<Vec<u8>>>> + Send + '_>> {
        Box::pin(async move {
            let mut buf = vec![0u8; self.chunk_size];
            let n = self.reader.read(&mut buf).await?;
            if n == 0 {
                return Ok(None);
            }
            buf.truncate(n);
            Ok(Some(buf))
        })
    }
}

/// In-memory chunk sequence, for small payloads and tests.
pub struct VecSource {
    chunks: VecDeque<Vec<u8>>,
}

impl VecSource {
    /// Builds a source yielding `chunks` in order.
    pub fn new(chunks: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self {
            chunks: chunks.into_iter().collect(),
        }
    }
}

impl ChunkSource for VecSource {
    fn next_chunk(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<Option<Vec<u8>>>> + Send + '_>> {
        Box::pin(async move { Ok(self.chunks.pop_front()) })
    }
}
