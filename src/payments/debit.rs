//! Debit and pre-authorization requests (`POST {base}/payments`).

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::cards::CardDetails;
use crate::client::GatewayClient;
use crate::error::GatewayResult;
use crate::gateway::Gateway;
use crate::payments::response::ResponseEnvelope;
use crate::payments::types::{
    format_amount, normalize_currency, FormParams, PaymentType, DEFAULT_CURRENCY,
    RECURRING_INITIAL,
};

/// One-shot builder for a card payment.
///
/// Configure with the chained setters, then consume with [`process`].
///
/// [`process`]: PaymentRequest::process
#[must_use = "a payment request does nothing until `process` is awaited"]
pub struct PaymentRequest<'a, C> {
    gateway: &'a Gateway<C>,
    card: CardDetails,
    amount: Decimal,
    currency: String,
    payment_type: PaymentType,
    create_registration: bool,
}

impl<'a, C: GatewayClient> PaymentRequest<'a, C> {
    pub(crate) fn new(gateway: &'a Gateway<C>, card: CardDetails) -> Self {
        Self {
            gateway,
            card,
            amount: Decimal::ZERO,
            currency: DEFAULT_CURRENCY.to_string(),
            payment_type: PaymentType::Debit,
            create_registration: false,
        }
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// Three-letter currency code; case is normalized when sent.
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// `true` switches the request to a pre-authorization.
    ///
    /// `false` leaves the current payment type untouched; there is no way back
    /// to a debit once auth-only has been requested.
    pub fn auth_only(mut self, auth_only: bool) -> Self {
        if auth_only {
            self.payment_type = PaymentType::PreAuthorization;
        }
        self
    }

    /// Also store the card for later recurring charges, with this payment as
    /// the initial one of the series.
    pub fn create_registration(mut self, create_registration: bool) -> Self {
        self.create_registration = create_registration;
        self
    }

    pub fn payment_type(&self) -> PaymentType {
        self.payment_type
    }

    pub fn card(&self) -> &CardDetails {
        &self.card
    }

    pub fn url(&self) -> String {
        format!("{}/payments", self.gateway.config().base_uri())
    }

    /// The form body this request would send.
    pub fn params(&self) -> FormParams {
        build_params(self, &self.card)
    }

    /// Validate the card, then POST the payment.
    ///
    /// A card that fails validation yields a failed envelope without any
    /// network call. Gateway error responses also come back as failed
    /// envelopes; only transport faults are returned as `Err`.
    pub async fn process(self) -> GatewayResult<ResponseEnvelope> {
        let card = match self.gateway.validator().validate(self.card.clone()) {
            Ok(card) => card,
            Err(e) => {
                warn!(
                    "Card {} rejected before submission: {} ({})",
                    self.card.masked_number(),
                    e,
                    e.code()
                );
                return Ok(ResponseEnvelope::from_validation_error(&e));
            }
        };

        let url = self.url();
        let params = build_params(&self, card.details());

        info!(
            "Submitting {} payment: {} {} card={} registration={}",
            self.payment_type,
            format_amount(self.amount),
            normalize_currency(&self.currency),
            card.details().masked_number(),
            self.create_registration
        );

        let outcome = self.gateway.client().submit(&url, &params).await?;
        let envelope = ResponseEnvelope::from_outcome(outcome);

        if envelope.succeeded() {
            info!("Payment accepted by gateway (HTTP {:?})", envelope.status());
        } else {
            warn!("Payment refused by gateway (HTTP {:?})", envelope.status());
        }

        Ok(envelope)
    }
}

fn build_params<C>(request: &PaymentRequest<'_, C>, card: &CardDetails) -> FormParams {
    let mut params = FormParams::new();
    for (key, value) in request.gateway.config().authentication_params() {
        params.push(key, value);
    }

    params.push("paymentBrand", card.brand().as_str());
    params.push("card.number", card.number());
    params.push("card.holder", card.holder());
    params.push("card.expiryMonth", card.expiry_month());
    params.push("card.expiryYear", card.expiry_year());
    params.push("card.cvv", card.cvv());
    params.push("paymentType", request.payment_type.code());
    params.push("amount", format_amount(request.amount));
    params.push("currency", normalize_currency(&request.currency));

    if request.create_registration {
        params.push("createRegistration", "true");
        params.push("recurringType", RECURRING_INITIAL);
    }

    params
}
