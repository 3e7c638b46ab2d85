//! Encrypted socket uploader.

use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use modelport_protocol::SocketPairing;
use modelport_stream_cipher::StreamEncryptor;

use crate::error::UploadError;
use crate::source::ChunkSource;
use crate::{CONNECT_TIMEOUT, FLUSH_HIGH_WATER, SOCKET_BUFFER_SIZE};

/// Owns one outbound TCP connection for the duration of one transfer.
///
/// The wire body is logically `authentication_header || source bytes`,
/// encrypted as a single cipher stream; the header is the first input to
/// the cipher, so it travels encrypted like everything after it.
///
/// [`SocketUploader::next_chunk`] returns each plaintext source chunk
/// after its ciphertext has been written and drained, letting the caller
/// compute a digest or report progress without buffering the file. The
/// sequence ends with `Ok(None)` exactly once, after the uploader has
/// proactively closed the connection.
///
/// Dropping the uploader mid-stream drops the socket, which closes it
/// without a graceful shutdown; no bytes beyond the last returned chunk
/// have been written at that point.
pub struct SocketUploader<S, W = BufWriter<TcpStream>> {
    writer: W,
    encryptor: StreamEncryptor,
    source: S,
    auth_header: Option<Vec<u8>>,
    high_water: usize,
    unflushed: usize,
    total_bytes: u64,
    cancel: CancellationToken,
    closed: bool,
}

impl<S, W> std::fmt::Debug for SocketUploader<S, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketUploader")
            .field("high_water", &self.high_water)
            .field("unflushed", &self.unflushed)
            .field("total_bytes", &self.total_bytes)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl<S: ChunkSource> SocketUploader<S, BufWriter<TcpStream>> {
    /// Decodes the pairing material, builds the cipher and connects.
    ///
    /// Configuration problems (malformed base64, bad key or nonce length)
    /// fail before any network I/O. The connection attempt itself is
    /// bounded by [`CONNECT_TIMEOUT`]. There is no retry here: a failed
    /// connect means re-pairing, since the nonce is single-use.
    pub async fn connect(pairing: &SocketPairing, source: S) -> Result<Self, UploadError> {
        let keys = pairing.decode()?;
        let encryptor = StreamEncryptor::from_pairing(&keys.encryption_key, &keys.nonce)?;

        let stream = match tokio::time::timeout(
            CONNECT_TIMEOUT,
            TcpStream::connect((pairing.host.as_str(), pairing.port)),
        )
        .await
        {
            Ok(Ok(s)) => s,
            Ok(Err(e)) => return Err(UploadError::Connect(e)),
            Err(_) => return Err(UploadError::Timeout),
        };
        info!(host = %pairing.host, port = pairing.port, "upload socket connected");

        let writer = BufWriter::with_capacity(SOCKET_BUFFER_SIZE, stream);
        Ok(Self::over(
            writer,
            encryptor,
            keys.authentication_header,
            source,
        ))
    }
}

impl<S: ChunkSource, W: AsyncWrite + Unpin + Send> SocketUploader<S, W> {
    /// Builds an uploader over an arbitrary transport writer.
    pub fn over(
        writer: W,
        encryptor: StreamEncryptor,
        authentication_header: Vec<u8>,
        source: S,
    ) -> Self {
        Self {
            writer,
            encryptor,
            source,
            auth_header: Some(authentication_header),
            high_water: FLUSH_HIGH_WATER,
            unflushed: 0,
            total_bytes: 0,
            cancel: CancellationToken::new(),
            closed: false,
        }
    }

    /// Attaches a cancellation token, checked at chunk boundaries.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Overrides the outbound high-water mark.
    pub fn with_high_water(mut self, high_water: usize) -> Self {
        self.high_water = high_water;
        self
    }

    /// Transmits the next source chunk and returns its plaintext.
    ///
    /// Returns `Ok(None)` once the source is exhausted and the connection
    /// has been closed. Any error closes the connection before it is
    /// returned; after an error the transfer cannot continue.
    pub async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, UploadError> {
        if self.closed {
            return Ok(None);
        }

        if self.cancel.is_cancelled() {
            self.close_quietly().await;
            return Err(UploadError::Cancelled);
        }

        if let Some(header) = self.auth_header.take() {
            if let Err(e) = self.transmit(&header).await {
                self.close_quietly().await;
                return Err(UploadError::Transfer(e));
            }
        }

        let chunk = match self.source.next_chunk().await {
            Ok(chunk) => chunk,
            Err(e) => {
                self.close_quietly().await;
                return Err(UploadError::Source(e));
            }
        };

        match chunk {
            Some(chunk) => {
                if let Err(e) = self.transmit(&chunk).await {
                    self.close_quietly().await;
                    return Err(UploadError::Transfer(e));
                }
                self.total_bytes += chunk.len() as u64;
                Ok(Some(chunk))
            }
            None => {
                self.close().await?;
                Ok(None)
            }
        }
    }

    /// Total plaintext source bytes transmitted so far.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Consumes the uploader, returning the source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Consumes the uploader, returning the transport writer and source.
    pub fn into_parts(self) -> (W, S) {
        (self.writer, self.source)
    }

    async fn transmit(&mut self, chunk: &[u8]) -> std::io::Result<()> {
        let encrypted = self.encryptor.encrypt(chunk);
        self.writer.write_all(&encrypted).await?;
        self.unflushed += encrypted.len();

        if self.unflushed >= self.high_water {
            self.writer.flush().await?;
            self.unflushed = 0;
        }

        // Drain after every chunk, not only past the high-water mark.
        // Outbound buffering stays bounded by a single chunk.
        self.writer.flush().await?;
        self.unflushed = 0;

        debug!(bytes = chunk.len(), "chunk transmitted");
        Ok(())
    }

    async fn close(&mut self) -> Result<(), UploadError> {
        self.closed = true;
        match self.shutdown_writer().await {
            Ok(()) => {
                info!(total_bytes = self.total_bytes, "upload stream complete");
                Ok(())
            }
            // A reset while closing means the peer already released the
            // connection; the stream itself completed.
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionReset => {
                debug!("peer reset during close");
                info!(total_bytes = self.total_bytes, "upload stream complete");
                Ok(())
            }
            Err(e) => Err(UploadError::Transfer(e)),
        }
    }

    async fn close_quietly(&mut self) {
        self.closed = true;
        let _ = self.shutdown_writer().await;
    }

    async fn shutdown_writer(&mut self) -> std::io::Result<()> {
        self.writer.flush().await?;
        self.writer.shutdown().await
    }
}
