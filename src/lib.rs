//! Client for the OPPWA card-payment gateway.
//!
//! Builds form-encoded requests for debits, pre-authorizations, reversals and
//! refunds, hands them to a [`GatewayClient`], and normalizes whatever comes
//! back into a [`ResponseEnvelope`].
//!
//! ```no_run
//! use oppwa_gateway::{CardBrand, CardDetails, Gateway, GatewayConfig, GatewayMode};
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> Result<(), oppwa_gateway::GatewayError> {
//! let config = GatewayConfig::new("user-id", "password", "entity-id", GatewayMode::Test);
//! let gateway = Gateway::from_config(config)?;
//!
//! let card = CardDetails::new(CardBrand::Visa, "4200000000000000", "Jane Doe", "05", "2030", "123");
//! let envelope = gateway
//!     .debit(card)
//!     .amount(Decimal::from(100))
//!     .currency("zar")
//!     .process()
//!     .await?;
//!
//! println!("{} {}", envelope.succeeded(), envelope.raw_body());
//! # Ok(())
//! # }
//! ```

pub mod cards;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod payments;

pub use cards::{
    CardBrand, CardDetails, CardValidationError, CardValidator, StandardCardValidator,
    UnsupportedBrandError,
};
#[cfg(feature = "reqwest-client")]
pub use client::ReqwestGatewayClient;
pub use client::{GatewayClient, HttpOutcome};
pub use config::{GatewayConfig, GatewayMode};
pub use error::{GatewayError, GatewayResult};
pub use gateway::Gateway;
pub use payments::{
    FormParams, PaymentRequest, PaymentType, ResponseEnvelope, ResponseOrigin, ReversalRequest,
};
