//! REST client for the ModelPort pairing, completion and retrieval APIs.
//!
//! [`ApiClient`] is a cheap-to-clone handle over a shared connection pool;
//! clones share the pool and the pool is released when the last clone
//! drops. Callers own their handles explicitly; there is no process-wide
//! client state.
//!
//! Only the endpoints the transfer core needs live here: socket pairing,
//! transfer completion and streaming retrieval. The platform's wider CRUD
//! surface is not this crate's concern.

pub mod client;
pub mod download;
pub mod error;

mod file_push;
mod retrieve;

pub use client::{ApiClient, ClientConfig};
pub use download::DownloadStream;
pub use error::ApiError;
