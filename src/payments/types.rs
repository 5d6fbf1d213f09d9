//! Wire-level types shared by debit and reversal requests.

use crate::error::{GatewayError, GatewayResult};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency used when the caller does not name one.
pub const DEFAULT_CURRENCY: &str = "ZAR";

/// `recurringType` sent alongside `createRegistration=true`.
pub const RECURRING_INITIAL: &str = "INITIAL";

/// Gateway `paymentType` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    /// Debit / sale
    #[serde(rename = "DB")]
    Debit,
    /// Pre-authorization only
    #[serde(rename = "PA")]
    PreAuthorization,
    /// Refund of a captured payment
    #[serde(rename = "RF")]
    Refund,
    /// Full reversal
    #[serde(rename = "RV")]
    Reversal,
}

impl PaymentType {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentType::Debit => "DB",
            PaymentType::PreAuthorization => "PA",
            PaymentType::Refund => "RF",
            PaymentType::Reversal => "RV",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Ordered form fields for one POST body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormParams(Vec<(String, String)>);

impl FormParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, replacing any earlier value under the same key.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `application/x-www-form-urlencoded` body.
    pub fn to_urlencoded(&self) -> GatewayResult<String> {
        serde_urlencoded::to_string(&self.0)
            .map_err(|e| GatewayError::invalid_request(format!("Failed to encode form: {}", e)))
    }
}

/// Gateway amount format: two fractional digits, `.` separator, no grouping.
///
/// Half-way values round away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

pub fn normalize_currency(currency: &str) -> String {
    currency.trim().to_ascii_uppercase()
}
