//! HTTP client with Bearer authentication.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::download::DownloadStream;
use crate::error::ApiError;

const DEFAULT_BASE_URL: &str = "https://api.modelport.dev/v0/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// ModelPort REST client.
///
/// Cloning is cheap: clones share one connection pool, released when the
/// last clone drops.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client against the default platform endpoint.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        let mut base_url = config.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { http, base_url })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        token: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .send(self.http.post(self.url(endpoint)).json(body), token)
            .await?;
        Ok(resp.json().await?)
    }

    pub(crate) async fn post_no_content<B: Serialize>(
        &self,
        endpoint: &str,
        token: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.send(self.http.post(self.url(endpoint)).json(body), token)
            .await?;
        Ok(())
    }

    pub(crate) async fn get_stream(
        &self,
        endpoint: &str,
        token: &str,
    ) -> Result<DownloadStream, ApiError> {
        let resp = self.send(self.http.get(self.url(endpoint)), token).await?;
        Ok(DownloadStream::new(resp))
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        token: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let resp = request.bearer_auth(token).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }
}
