use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use crate::client::UnredactionClient;
use crate::error::{ClientError, Result};
use crate::protocol::{UnredactionRequest, UnredactionResponse};

const USER_AGENT: &str = concat!("unredact/", env!("CARGO_PKG_VERSION"));

/// Talks to the prediction service over HTTP: `GET {endpoint}?text={masked}`
pub struct HttpUnredactionClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpUnredactionClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.trim();
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ClientError::InvalidEndpoint(format!(
                "endpoint must start with http:// or https://: {}",
                endpoint
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    fn build_request(&self, request: &UnredactionRequest) -> reqwest::Result<reqwest::Request> {
        self.client
            .get(self.endpoint.clone())
            .query(&[("text", request.text.as_str())])
            .build()
    }
}

#[async_trait]
impl UnredactionClient for HttpUnredactionClient {
    async fn unredact(&self, request: &UnredactionRequest) -> Result<UnredactionResponse> {
        let http_request = self.build_request(request)?;
        debug!(url = %http_request.url(), "requesting unredaction");

        let response = self.client.execute(http_request).await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }
}
