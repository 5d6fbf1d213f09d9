//! Transport seam between request builders and the network.
//!
//! Requests only ever see [`GatewayClient`]; the reqwest-backed client is one
//! implementation, tests use scripted fakes.

#[cfg(feature = "reqwest-client")]
pub mod reqwest_client;

#[cfg(feature = "reqwest-client")]
pub use reqwest_client::ReqwestGatewayClient;

use crate::error::GatewayResult;
use crate::payments::types::FormParams;
use async_trait::async_trait;

/// Raw result of one HTTP round trip that reached the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOutcome {
    pub status: u16,
    pub body: String,
}

impl HttpOutcome {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs the form-encoded POST for a request.
///
/// Implementations return `Ok` for every response the gateway sent, whatever
/// its status; `Err` is reserved for faults where no response exists
/// (connection refused, timeout). Timeouts and retries are the
/// implementation's business.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn submit(&self, url: &str, form: &FormParams) -> GatewayResult<HttpOutcome>;
}

#[async_trait]
impl<C: GatewayClient + ?Sized> GatewayClient for std::sync::Arc<C> {
    async fn submit(&self, url: &str, form: &FormParams) -> GatewayResult<HttpOutcome> {
        (**self).submit(url, form).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(HttpOutcome::new(200, "").is_success());
        assert!(HttpOutcome::new(201, "").is_success());
        assert!(HttpOutcome::new(299, "").is_success());
        assert!(!HttpOutcome::new(199, "").is_success());
        assert!(!HttpOutcome::new(302, "").is_success());
        assert!(!HttpOutcome::new(400, "").is_success());
        assert!(!HttpOutcome::new(500, "").is_success());
    }
}
