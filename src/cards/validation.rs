//! Card validation gate

use chrono::{Datelike, NaiveDate, Utc};
use thiserror::Error;

use super::types::CardDetails;

/// Why a card was refused before reaching the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardValidationError {
    #[error("Card number is invalid")]
    InvalidNumber,

    #[error("Card holder is required")]
    InvalidHolder,

    #[error("Expiry month must be between 1 and 12, got '{month}'")]
    InvalidExpiryMonth { month: String },

    #[error("Expiry year must be a 4-digit year, got '{year}'")]
    InvalidExpiryYear { year: String },

    #[error("Card expired at the end of {month:02}/{year}")]
    Expired { month: u32, year: i32 },

    #[error("CVV must be {expected_len} digits")]
    InvalidCvv { expected_len: usize },

    /// Raised by caller-supplied validators with their own codes.
    #[error("{message}")]
    Rejected { code: String, message: String },
}

impl CardValidationError {
    /// Stable machine-readable code, surfaced as `result.code`.
    pub fn code(&self) -> &str {
        match self {
            CardValidationError::InvalidNumber => "invalid_card_number",
            CardValidationError::InvalidHolder => "invalid_card_holder",
            CardValidationError::InvalidExpiryMonth { .. } => "invalid_expiry_month",
            CardValidationError::InvalidExpiryYear { .. } => "invalid_expiry_year",
            CardValidationError::Expired { .. } => "card_expired",
            CardValidationError::InvalidCvv { .. } => "invalid_cvv",
            CardValidationError::Rejected { code, .. } => code.as_str(),
        }
    }

    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Card details that passed a [`CardValidator`].
///
/// Only obtainable through [`CardValidator::validate`], so a debit can never
/// be built from unchecked fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCard(CardDetails);

impl ValidatedCard {
    pub fn details(&self) -> &CardDetails {
        &self.0
    }

    pub fn into_inner(self) -> CardDetails {
        self.0
    }
}

/// Capability that decides whether card details may be sent to the gateway.
pub trait CardValidator: Send + Sync {
    /// Check the fields, returning the first rule that fails.
    fn check(&self, card: &CardDetails) -> Result<(), CardValidationError>;

    fn validate(&self, card: CardDetails) -> Result<ValidatedCard, CardValidationError> {
        self.check(&card)?;
        Ok(ValidatedCard(card))
    }
}

/// Format and expiry checks: Luhn number, holder, expiry and CVV length.
#[derive(Debug, Clone, Default)]
pub struct StandardCardValidator {
    reference_date: Option<NaiveDate>,
}

impl StandardCardValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the date used for the expiry check instead of today (UTC).
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }
}

impl CardValidator for StandardCardValidator {
    fn check(&self, card: &CardDetails) -> Result<(), CardValidationError> {
        let number = card.number();
        if !(12..=19).contains(&number.len())
            || !number.chars().all(|c| c.is_ascii_digit())
            || !luhn_valid(number)
        {
            return Err(CardValidationError::InvalidNumber);
        }

        if card.holder().trim().is_empty() {
            return Err(CardValidationError::InvalidHolder);
        }

        let month = card
            .expiry_month()
            .parse::<u32>()
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| CardValidationError::InvalidExpiryMonth {
                month: card.expiry_month().to_string(),
            })?;

        let year = Some(card.expiry_year())
            .filter(|y| y.len() == 4)
            .and_then(|y| y.parse::<i32>().ok())
            .ok_or_else(|| CardValidationError::InvalidExpiryYear {
                year: card.expiry_year().to_string(),
            })?;

        let today = self.today();
        if (year, month) < (today.year(), today.month()) {
            return Err(CardValidationError::Expired { month, year });
        }

        let expected_len = card.brand().cvv_length();
        let cvv = card.cvv();
        if cvv.len() != expected_len || !cvv.chars().all(|c| c.is_ascii_digit()) {
            return Err(CardValidationError::InvalidCvv { expected_len });
        }

        Ok(())
    }
}

/// Luhn (mod 10) checksum over an all-digit string.
fn luhn_valid(number: &str) -> bool {
    let sum: u32 = number
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardBrand;

    fn validator() -> StandardCardValidator {
        StandardCardValidator::new()
            .with_reference_date(NaiveDate::from_ymd_opt(2026, 6, 15).unwrap())
    }

    fn card(number: &str, month: &str, year: &str, cvv: &str) -> CardDetails {
        CardDetails::new(CardBrand::Visa, number, "Jane Doe", month, year, cvv)
    }

    #[test]
    fn test_luhn() {
        assert!(luhn_valid("4200000000000000"));
        assert!(luhn_valid("4111111111111111"));
        assert!(luhn_valid("5454545454545454"));
        assert!(!luhn_valid("4111111111111112"));
    }

    #[test]
    fn test_valid_card_passes() {
        let validated = validator()
            .validate(card("4200000000000000", "05", "2030", "123"))
            .unwrap();
        assert_eq!(validated.details().number(), "4200000000000000");
    }

    #[test]
    fn test_invalid_number() {
        let err = validator()
            .validate(card("4111111111111112", "05", "2030", "123"))
            .unwrap_err();
        assert_eq!(err, CardValidationError::InvalidNumber);
        assert_eq!(err.code(), "invalid_card_number");

        let err = validator()
            .validate(card("42000", "05", "2030", "123"))
            .unwrap_err();
        assert_eq!(err, CardValidationError::InvalidNumber);
    }

    #[test]
    fn test_blank_holder() {
        let details =
            CardDetails::new(CardBrand::Visa, "4200000000000000", "  ", "05", "2030", "123");
        assert_eq!(
            validator().validate(details).unwrap_err(),
            CardValidationError::InvalidHolder
        );
    }

    #[test]
    fn test_expiry_month_and_year_format() {
        let err = validator()
            .validate(card("4200000000000000", "13", "2030", "123"))
            .unwrap_err();
        assert_eq!(err.code(), "invalid_expiry_month");

        let err = validator()
            .validate(card("4200000000000000", "05", "30", "123"))
            .unwrap_err();
        assert_eq!(err.code(), "invalid_expiry_year");
    }

    #[test]
    fn test_expiry_month_is_inclusive() {
        let validated = validator()
            .validate(card("4200000000000000", "6", "2026", "123"))
            .unwrap();
        assert_eq!(validated.details().expiry_month(), "06");

        let err = validator()
            .validate(card("4200000000000000", "05", "2026", "123"))
            .unwrap_err();
        assert_eq!(err, CardValidationError::Expired { month: 5, year: 2026 });
        assert_eq!(err.to_string(), "Card expired at the end of 05/2026");
    }

    #[test]
    fn test_cvv_length_depends_on_brand() {
        let err = validator()
            .validate(card("4200000000000000", "05", "2030", "1234"))
            .unwrap_err();
        assert_eq!(err, CardValidationError::InvalidCvv { expected_len: 3 });

        let amex = CardDetails::new(
            CardBrand::Amex,
            "378282246310005",
            "Jane Doe",
            "05",
            "2030",
            "1234",
        );
        assert!(validator().validate(amex).is_ok());
    }

    #[test]
    fn test_custom_validator_codes() {
        struct DenyAll;
        impl CardValidator for DenyAll {
            fn check(&self, _card: &CardDetails) -> Result<(), CardValidationError> {
                Err(CardValidationError::rejected("blocked_bin", "BIN is blocked"))
            }
        }

        let err = DenyAll
            .validate(card("4200000000000000", "05", "2030", "123"))
            .unwrap_err();
        assert_eq!(err.code(), "blocked_bin");
        assert_eq!(err.to_string(), "BIN is blocked");
    }
}
