//! Upload flows: pair, stream, complete.

use std::path::Path;

use chrono::Utc;
use tracing::info;

use modelport_api_client::ApiClient;
use modelport_protocol::{
    AssetPairingRequest, ChecksumRequest, InputPairingRequest, SocketPairing,
};
use modelport_push_socket::{ReaderSource, write_and_digest};

use crate::error::ClientError;

/// Uploads a model asset from `path`.
///
/// Streams the file through an encrypted upload socket, then finalizes
/// the transfer with the plaintext checksum. Returns the checksum.
pub async fn upload_model_asset(
    api: &ApiClient,
    token: &str,
    model_id: &str,
    asset_name: &str,
    path: impl AsRef<Path>,
) -> Result<String, ClientError> {
    let path = path.as_ref();
    let size_bytes = tokio::fs::metadata(path).await?.len();

    let request = AssetPairingRequest {
        model_id: model_id.to_string(),
        asset_name: asset_name.to_string(),
        size_bytes,
        checksum: None,
    };
    let pairing = api.pair_asset(token, &request).await?;

    stream_and_complete(api, token, &pairing, path, size_bytes).await
}

/// Uploads an invocation input from `path`.
pub async fn upload_invocation_input(
    api: &ApiClient,
    token: &str,
    invocation_id: &str,
    input_name: &str,
    path: impl AsRef<Path>,
) -> Result<String, ClientError> {
    let path = path.as_ref();
    let size_bytes = tokio::fs::metadata(path).await?.len();

    let request = InputPairingRequest {
        invocation_id: invocation_id.to_string(),
        input_name: input_name.to_string(),
        size_bytes,
        checksum: None,
    };
    let pairing = api.pair_input(token, &request).await?;

    stream_and_complete(api, token, &pairing, path, size_bytes).await
}

async fn stream_and_complete(
    api: &ApiClient,
    token: &str,
    pairing: &SocketPairing,
    path: &Path,
    size_bytes: u64,
) -> Result<String, ClientError> {
    let source = ReaderSource::open(path).await?;
    let checksum = write_and_digest(pairing, source).await?;

    let request = ChecksumRequest {
        upload_id: pairing.upload_id.clone(),
        checksum: checksum.clone(),
        size_bytes,
        completed_at: Utc::now(),
    };
    api.complete_transfer(token, &request).await?;

    info!(upload_id = %pairing.upload_id, size_bytes, checksum = %checksum, "upload finished");
    Ok(checksum)
}
