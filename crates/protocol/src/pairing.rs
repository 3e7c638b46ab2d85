//! Socket pairing metadata.
//!
//! A pairing is issued by `POST file-push/socket/pair/{asset|input}` and is
//! valid for exactly one transfer: one connection, one cipher stream. The
//! key and nonce are never reused or rotated mid-stream; a failed transfer
//! requires a fresh pairing.

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors from decoding pairing metadata.
#[derive(Debug, thiserror::Error)]
pub enum PairingError {
    #[error("invalid base64 in {field}: {source}")]
    Base64 {
        field: &'static str,
        source: base64::DecodeError,
    },
}

/// Pairing metadata for an allocated upload socket.
///
/// Binary fields (`encryption_key`, `nonce`, `authentication_header`) are
/// base64 strings as received on the wire; call [`SocketPairing::decode`]
/// to get raw bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocketPairing {
    pub host: String,
    pub port: u16,
    pub encryption_key: String,
    pub nonce: String,
    pub authentication_header: String,
    pub upload_id: String,
    pub expires_at: DateTime<Utc>,
}

/// Decoded binary pairing material.
#[derive(Clone, Debug)]
pub struct PairingKeys {
    pub encryption_key: Vec<u8>,
    pub nonce: Vec<u8>,
    pub authentication_header: Vec<u8>,
}

impl SocketPairing {
    /// Decodes the base64 fields into raw bytes.
    ///
    /// Fails on malformed base64 before any socket I/O happens. Length
    /// validation of key and nonce is the cipher layer's job.
    pub fn decode(&self) -> Result<PairingKeys, PairingError> {
        Ok(PairingKeys {
            encryption_key: decode_field("encryptionKey", &self.encryption_key)?,
            nonce: decode_field("nonce", &self.nonce)?,
            authentication_header: decode_field(
                "authenticationHeader",
                &self.authentication_header,
            )?,
        })
    }
}

fn decode_field(field: &'static str, value: &str) -> Result<Vec<u8>, PairingError> {
    STANDARD
        .decode(value)
        .map_err(|source| PairingError::Base64 { field, source })
}
