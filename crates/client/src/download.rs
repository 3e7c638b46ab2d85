//! Download flows: stream a retrieval response to disk.

use std::path::Path;

use tokio::io::AsyncWriteExt;
use tracing::info;

use modelport_api_client::{ApiClient, DownloadStream};

use crate::error::ClientError;

/// Downloads a stored model asset to `dest`. Returns bytes written.
pub async fn download_model_asset(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    model_id: &str,
    asset_id: &str,
    dest: impl AsRef<Path>,
) -> Result<u64, ClientError> {
    let stream = api.model_asset(token, account_id, model_id, asset_id).await?;
    save_stream(stream, dest.as_ref()).await
}

/// Downloads an invocation input to `dest`. Returns bytes written.
pub async fn download_invocation_input(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    model_id: &str,
    invocation_id: &str,
    input_id: &str,
    dest: impl AsRef<Path>,
) -> Result<u64, ClientError> {
    let stream = api
        .invocation_input(token, account_id, model_id, invocation_id, input_id)
        .await?;
    save_stream(stream, dest.as_ref()).await
}

/// Downloads an invocation output to `dest`. Returns bytes written.
pub async fn download_invocation_output(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    model_id: &str,
    invocation_id: &str,
    output_id: &str,
    dest: impl AsRef<Path>,
) -> Result<u64, ClientError> {
    let stream = api
        .invocation_output(token, account_id, model_id, invocation_id, output_id)
        .await?;
    save_stream(stream, dest.as_ref()).await
}

async fn save_stream(mut stream: DownloadStream, dest: &Path) -> Result<u64, ClientError> {
    let mut file = tokio::fs::File::create(dest).await?;
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next_chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    info!(bytes = written, dest = %dest.display(), "download finished");
    Ok(written)
}
