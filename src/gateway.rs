//! Entry point tying configuration, transport and card validation together.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::cards::{CardDetails, CardValidator, StandardCardValidator};
use crate::client::GatewayClient;
use crate::config::GatewayConfig;
use crate::error::GatewayResult;
use crate::payments::{PaymentRequest, ReversalRequest};

/// Shared handle from which per-call requests are built.
///
/// Cheap to share across tasks: the config is read-only and each request
/// owns its own state.
pub struct Gateway<C> {
    config: Arc<GatewayConfig>,
    client: C,
    validator: Arc<dyn CardValidator>,
}

impl<C> Gateway<C> {
    /// Replace the card validation applied before debits.
    pub fn with_validator(mut self, validator: impl CardValidator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub(crate) fn client(&self) -> &C {
        &self.client
    }

    pub(crate) fn validator(&self) -> &dyn CardValidator {
        self.validator.as_ref()
    }
}

impl<C: GatewayClient> Gateway<C> {
    pub fn new(config: GatewayConfig, client: C) -> GatewayResult<Self> {
        config.validate()?;

        info!(
            "Gateway client initialized for entity {} at {}",
            config.entity_id(),
            config.base_uri()
        );

        Ok(Self {
            config: Arc::new(config),
            client,
            validator: Arc::new(StandardCardValidator::new()),
        })
    }

    /// Start a debit (or, with `auth_only(true)`, a pre-authorization).
    pub fn debit(&self, card: CardDetails) -> PaymentRequest<'_, C> {
        PaymentRequest::new(self, card)
    }

    /// Start a full reversal of `transaction_id`.
    pub fn reverse(&self, transaction_id: impl Into<String>) -> ReversalRequest<'_, C> {
        ReversalRequest::new(self, transaction_id, None, None)
    }

    /// Start a refund of `amount` against `transaction_id`.
    ///
    /// A zero amount degrades to a full reversal.
    pub fn refund(
        &self,
        transaction_id: impl Into<String>,
        amount: Decimal,
        currency: Option<&str>,
    ) -> ReversalRequest<'_, C> {
        ReversalRequest::new(self, transaction_id, Some(amount), currency)
    }
}

#[cfg(feature = "reqwest-client")]
impl Gateway<crate::client::ReqwestGatewayClient> {
    /// Gateway over the reqwest transport, using the config's timeout.
    pub fn from_config(config: GatewayConfig) -> GatewayResult<Self> {
        let client = crate::client::ReqwestGatewayClient::from_config(&config)?;
        Self::new(config, client)
    }

    pub fn from_env() -> GatewayResult<Self> {
        Self::from_config(GatewayConfig::from_env()?)
    }
}
