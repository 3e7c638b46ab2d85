//! Encrypted TCP upload channel for ModelPort file transfers.
//!
//! A pairing issued by the file-push API maps to exactly one connection,
//! one cipher stream and one uploader instance. The uploader encrypts
//! chunks in line as they arrive, applies flow control on the outbound
//! buffer, and hands the original plaintext chunks back to the caller so
//! checksums and progress can be computed without re-reading the source.
//!
//! There is no resume: a transfer that fails mid-stream is restarted from
//! a fresh pairing, because the nonce must not be reused.

pub mod digest;
pub mod error;
pub mod source;
pub mod uploader;

pub use digest::{DigestSource, write_and_digest};
pub use error::UploadError;
pub use source::{ChunkSource, ReaderSource, VecSource};
pub use uploader::SocketUploader;

use std::time::Duration;

/// Default chunk size for file sources (64 KiB).
///
/// Bounds per-iteration latency and memory; callers can pick another size
/// via [`ReaderSource::new`]. Chunk boundaries are not semantically
/// meaningful to the receiver.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Outbound high-water mark (8 MiB): flush when this many bytes have been
/// written since the last drain.
pub const FLUSH_HIGH_WATER: usize = 8 * 1024 * 1024;

/// TCP write buffer size (256 KB).
pub const SOCKET_BUFFER_SIZE: usize = 256 * 1024;

/// Timeout for the TCP connection attempt.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
