//! Request bodies for the file-push endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Requests an upload socket for a model asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPairingRequest {
    pub model_id: String,
    pub asset_name: String,
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

/// Requests an upload socket for an invocation input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputPairingRequest {
    pub invocation_id: String,
    pub input_name: String,
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

/// Finalizes an upload with the plaintext checksum.
///
/// The checksum is XXH3-64 of the uploaded bytes before encryption,
/// rendered as 16 lowercase hex characters. The server verifies it
/// independently of the encrypted transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecksumRequest {
    pub upload_id: String,
    pub checksum: String,
    pub size_bytes: u64,
    pub completed_at: DateTime<Utc>,
}
