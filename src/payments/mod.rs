//! Payment operations against the gateway
//!
//! Debits and pre-authorizations go through [`PaymentRequest`]; reversals and
//! refunds through [`ReversalRequest`]. Both answer with a [`ResponseEnvelope`].

pub mod debit;
pub mod response;
pub mod reverse;
pub mod types;

pub use debit::PaymentRequest;
pub use response::{ResponseEnvelope, ResponseOrigin};
pub use reverse::ReversalRequest;
pub use types::{FormParams, PaymentType};
