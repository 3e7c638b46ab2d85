//! Retrieval endpoints, opened in streaming mode.

use crate::client::ApiClient;
use crate::download::DownloadStream;
use crate::error::ApiError;

impl ApiClient {
    /// Streams a stored model asset.
    pub async fn model_asset(
        &self,
        token: &str,
        account_id: &str,
        model_id: &str,
        asset_id: &str,
    ) -> Result<DownloadStream, ApiError> {
        self.get_stream(
            &format!("retrieve/asset/{account_id}/{model_id}/{asset_id}"),
            token,
        )
        .await
    }

    /// Streams an invocation input.
    pub async fn invocation_input(
        &self,
        token: &str,
        account_id: &str,
        model_id: &str,
        invocation_id: &str,
        input_id: &str,
    ) -> Result<DownloadStream, ApiError> {
        self.get_stream(
            &format!("retrieve/input/{account_id}/{model_id}/{invocation_id}/{input_id}"),
            token,
        )
        .await
    }

    /// Streams an invocation output.
    pub async fn invocation_output(
        &self,
        token: &str,
        account_id: &str,
        model_id: &str,
        invocation_id: &str,
        output_id: &str,
    ) -> Result<DownloadStream, ApiError> {
        self.get_stream(
            &format!("retrieve/output/{account_id}/{model_id}/{invocation_id}/{output_id}"),
            token,
        )
        .await
    }
}
