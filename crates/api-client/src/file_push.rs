//! File-push endpoints: socket pairing and transfer completion.

use tracing::debug;

use modelport_protocol::{AssetPairingRequest, ChecksumRequest, InputPairingRequest, SocketPairing};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Allocates an upload socket for a model asset.
    ///
    /// The returned pairing is single-use: one connection, one cipher
    /// stream. A failed transfer needs a new pairing.
    pub async fn pair_asset(
        &self,
        token: &str,
        request: &AssetPairingRequest,
    ) -> Result<SocketPairing, ApiError> {
        let pairing: SocketPairing = self
            .post_json("file-push/socket/pair/asset", token, request)
            .await?;
        debug!(upload_id = %pairing.upload_id, "asset upload socket paired");
        Ok(pairing)
    }

    /// Allocates an upload socket for an invocation input.
    pub async fn pair_input(
        &self,
        token: &str,
        request: &InputPairingRequest,
    ) -> Result<SocketPairing, ApiError> {
        let pairing: SocketPairing = self
            .post_json("file-push/socket/pair/input", token, request)
            .await?;
        debug!(upload_id = %pairing.upload_id, "input upload socket paired");
        Ok(pairing)
    }

    /// Finalizes an upload by reporting the plaintext checksum.
    pub async fn complete_transfer(
        &self,
        token: &str,
        request: &ChecksumRequest,
    ) -> Result<(), ApiError> {
        self.post_no_content("file-push/socket/complete", token, request)
            .await?;
        debug!(upload_id = %request.upload_id, "transfer completed");
        Ok(())
    }
}
