//! Streaming response bodies.

use reqwest::header::HeaderMap;

use crate::error::ApiError;

/// A lazily consumed response body.
///
/// Yields non-empty byte chunks as they arrive on the wire; empty
/// transport chunks are filtered out. The underlying connection is
/// released when the stream ends or when the value is dropped, whichever
/// comes first, so abandoning the stream early never leaks a connection.
#[derive(Debug)]
pub struct DownloadStream {
    headers: HeaderMap,
    response: Option<reqwest::Response>,
}

impl DownloadStream {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self {
            headers: response.headers().clone(),
            response: Some(response),
        }
    }

    /// Response headers, available before the body is consumed.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the next non-empty chunk, or `None` once the body ends.
    ///
    /// After the first `None` the response has been released; further
    /// calls keep returning `None`.
    pub async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, ApiError> {
        let Some(response) = self.response.as_mut() else {
            return Ok(None);
        };
        loop {
            match response.chunk().await? {
                Some(chunk) if chunk.is_empty() => continue,
                Some(chunk) => return Ok(Some(chunk.to_vec())),
                None => {
                    self.response = None;
                    return Ok(None);
                }
            }
        }
    }
}
