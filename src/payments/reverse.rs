//! Reversal and refund of a previous transaction
//! (`POST {base}/payments/{transactionId}`).

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::client::GatewayClient;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::Gateway;
use crate::payments::response::ResponseEnvelope;
use crate::payments::types::{
    format_amount, normalize_currency, FormParams, PaymentType, DEFAULT_CURRENCY,
};

/// One-shot builder for backing out a prior transaction.
///
/// With a non-zero refund amount it becomes a refund (`RF`) of that amount;
/// otherwise a full reversal (`RV`). No card validation happens on this path.
#[must_use = "a reversal request does nothing until `process` is awaited"]
pub struct ReversalRequest<'a, C> {
    gateway: &'a Gateway<C>,
    transaction_id: String,
    refund_amount: Option<Decimal>,
    refund_currency: String,
}

impl<'a, C: GatewayClient> ReversalRequest<'a, C> {
    /// Empty refund values are ignored: a zero amount or blank currency
    /// counts as not provided.
    pub(crate) fn new(
        gateway: &'a Gateway<C>,
        transaction_id: impl Into<String>,
        refund_amount: Option<Decimal>,
        refund_currency: Option<&str>,
    ) -> Self {
        let mut request = Self {
            gateway,
            transaction_id: transaction_id.into(),
            refund_amount: None,
            refund_currency: DEFAULT_CURRENCY.to_string(),
        };

        if let Some(amount) = refund_amount.filter(|a| !a.is_zero()) {
            request.refund_amount = Some(amount);
        }

        if let Some(currency) = refund_currency.filter(|c| !c.trim().is_empty()) {
            request.refund_currency = currency.to_string();
        }

        request
    }

    /// Set or clear the refund amount.
    pub fn refund_amount(mut self, amount: Option<Decimal>) -> Self {
        self.refund_amount = amount;
        self
    }

    pub fn refund_currency(mut self, currency: impl Into<String>) -> Self {
        self.refund_currency = currency.into();
        self
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    fn refund(&self) -> Option<Decimal> {
        self.refund_amount.filter(|a| !a.is_zero())
    }

    pub fn payment_type(&self) -> PaymentType {
        match self.refund() {
            Some(_) => PaymentType::Refund,
            None => PaymentType::Reversal,
        }
    }

    pub fn url(&self) -> String {
        format!(
            "{}/payments/{}",
            self.gateway.config().base_uri(),
            self.transaction_id
        )
    }

    pub fn params(&self) -> FormParams {
        let mut params = FormParams::new();
        for (key, value) in self.gateway.config().authentication_params() {
            params.push(key, value);
        }

        params.push("paymentType", self.payment_type().code());
        if let Some(amount) = self.refund() {
            params.push("amount", format_amount(amount));
            params.push("currency", normalize_currency(&self.refund_currency));
        }

        params
    }

    /// POST the reversal or refund.
    ///
    /// Gateway error responses come back as failed envelopes; only transport
    /// faults and a missing transaction id are returned as `Err`.
    pub async fn process(self) -> GatewayResult<ResponseEnvelope> {
        if self.transaction_id.trim().is_empty() {
            return Err(GatewayError::invalid_request(
                "transaction id is required to reverse or refund a payment",
            ));
        }

        let url = self.url();
        let params = self.params();

        match self.refund() {
            Some(amount) => info!(
                "Refunding {} {} against transaction {}",
                format_amount(amount),
                normalize_currency(&self.refund_currency),
                self.transaction_id
            ),
            None => info!("Reversing transaction {}", self.transaction_id),
        }

        let outcome = self.gateway.client().submit(&url, &params).await?;
        let envelope = ResponseEnvelope::from_outcome(outcome);

        if !envelope.succeeded() {
            warn!(
                "{} for transaction {} refused by gateway (HTTP {:?})",
                self.payment_type(),
                self.transaction_id,
                envelope.status()
            );
        }

        Ok(envelope)
    }
}
