//! Wire types for the ModelPort file-push and retrieval APIs.
//!
//! The platform transports binary pairing material (encryption key, nonce,
//! authentication header) as base64 strings inside JSON. Types here carry
//! the strings as received; [`SocketPairing::decode`] turns them into raw
//! bytes before any socket work starts.

pub mod pairing;
pub mod requests;

pub use pairing::{PairingError, PairingKeys, SocketPairing};
pub use requests::{AssetPairingRequest, ChecksumRequest, InputPairingRequest};
