use crate::client::{GatewayClient, HttpOutcome};
use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::payments::types::FormParams;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// [`GatewayClient`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestGatewayClient {
    http_client: Client,
    timeout: Duration,
}

impl ReqwestGatewayClient {
    pub fn new(timeout: Duration) -> GatewayResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("oppwa-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            timeout,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> GatewayResult<Self> {
        Self::new(config.timeout())
    }

    /// Timeouts report the configured limit, whether they hit while sending
    /// or while reading the body.
    fn transport_error(&self, url: &str, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            warn!("Gateway request to {} timed out", url);
            GatewayError::timeout(self.timeout.as_secs())
        } else {
            warn!("Gateway request to {} failed: {}", url, err);
            GatewayError::from(err)
        }
    }
}

#[async_trait]
impl GatewayClient for ReqwestGatewayClient {
    async fn submit(&self, url: &str, form: &FormParams) -> GatewayResult<HttpOutcome> {
        let body = form.to_urlencoded()?;

        debug!("POST {} ({} form fields)", url, form.len());

        let response = self
            .http_client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        debug!("Gateway answered {} with {} bytes", status, body.len());

        Ok(HttpOutcome { status, body })
    }
}
