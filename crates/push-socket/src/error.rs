//! Error types for the upload channel.
//!
//! Nothing here is retried internally. Retrying a transfer needs fresh
//! cryptographic material (a new nonce), which only the pairing API can
//! issue, so retry policy belongs to the caller.

/// Errors produced by the upload channel.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Malformed pairing metadata. Raised before any network I/O.
    #[error("invalid pairing metadata: {0}")]
    Pairing(#[from] modelport_protocol::PairingError),

    /// Bad key or nonce length. Raised before any network I/O.
    #[error("invalid pairing metadata: {0}")]
    Cipher(#[from] modelport_stream_cipher::CipherError),

    /// The socket could not be established.
    #[error("connect failed: {0}")]
    Connect(std::io::Error),

    /// The connection attempt timed out.
    #[error("connection timed out")]
    Timeout,

    /// Reading from the chunk source failed.
    #[error("source read failed: {0}")]
    Source(std::io::Error),

    /// A mid-stream write, drain or close failed. The connection has
    /// already been closed; the whole transfer must be restarted from a
    /// new pairing.
    #[error("transfer failed: {0}")]
    Transfer(std::io::Error),

    /// The transfer was cancelled. Cleanup has already run.
    #[error("cancelled")]
    Cancelled,
}
