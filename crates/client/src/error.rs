//! Client flow error types.

/// Errors from high-level transfer flows.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("API error: {0}")]
    Api(#[from] modelport_api_client::ApiError),

    #[error("upload error: {0}")]
    Upload(#[from] modelport_push_socket::UploadError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
