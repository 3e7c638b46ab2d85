//! High-level upload and download flows.
//!
//! Ties the REST client and the encrypted upload channel together: pair,
//! stream, complete. Each function drives one whole transfer; there is no
//! partial resume. If an upload fails mid-stream the caller runs the same
//! function again, which obtains a fresh pairing (and with it a fresh
//! nonce) before any bytes move.

mod download;
mod error;
mod upload;

pub use download::{download_invocation_input, download_invocation_output, download_model_asset};
pub use error::ClientError;
pub use upload::{upload_invocation_input, upload_model_asset};
