//! Card value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A brand name that is not one of the gateway's `paymentBrand` codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported card brand: {brand}")]
pub struct UnsupportedBrandError {
    pub brand: String,
}

/// Card brands accepted by the gateway's `paymentBrand` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardBrand {
    Visa,
    Master,
    Amex,
    Diners,
    Discover,
    Jcb,
    Maestro,
}

impl CardBrand {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardBrand::Visa => "VISA",
            CardBrand::Master => "MASTER",
            CardBrand::Amex => "AMEX",
            CardBrand::Diners => "DINERS",
            CardBrand::Discover => "DISCOVER",
            CardBrand::Jcb => "JCB",
            CardBrand::Maestro => "MAESTRO",
        }
    }

    /// Expected CVV length for the brand.
    pub fn cvv_length(&self) -> usize {
        match self {
            CardBrand::Amex => 4,
            _ => 3,
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardBrand {
    type Err = UnsupportedBrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "VISA" => Ok(CardBrand::Visa),
            "MASTER" | "MASTERCARD" => Ok(CardBrand::Master),
            "AMEX" => Ok(CardBrand::Amex),
            "DINERS" => Ok(CardBrand::Diners),
            "DISCOVER" => Ok(CardBrand::Discover),
            "JCB" => Ok(CardBrand::Jcb),
            "MAESTRO" => Ok(CardBrand::Maestro),
            other => Err(UnsupportedBrandError {
                brand: other.to_string(),
            }),
        }
    }
}

/// Raw card fields as supplied by the caller.
///
/// Nothing here is checked; pass it through a [`super::CardValidator`] to
/// obtain a [`super::ValidatedCard`].
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    brand: CardBrand,
    number: String,
    holder: String,
    expiry_month: String,
    expiry_year: String,
    cvv: String,
}

impl CardDetails {
    pub fn new(
        brand: CardBrand,
        number: impl Into<String>,
        holder: impl Into<String>,
        expiry_month: impl Into<String>,
        expiry_year: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        let number: String = number
            .into()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect();

        // The gateway expects MM, so "6" goes out as "06".
        let expiry_month = expiry_month.into().trim().to_string();
        let expiry_month = if expiry_month.len() == 1
            && expiry_month.chars().all(|c| c.is_ascii_digit())
        {
            format!("0{}", expiry_month)
        } else {
            expiry_month
        };

        Self {
            brand,
            number,
            holder: holder.into(),
            expiry_month,
            expiry_year: expiry_year.into().trim().to_string(),
            cvv: cvv.into().trim().to_string(),
        }
    }

    pub fn brand(&self) -> CardBrand {
        self.brand
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn expiry_month(&self) -> &str {
        &self.expiry_month
    }

    pub fn expiry_year(&self) -> &str {
        &self.expiry_year
    }

    pub fn cvv(&self) -> &str {
        &self.cvv
    }

    /// Card number with everything but the last four digits hidden.
    pub fn masked_number(&self) -> String {
        let len = self.number.chars().count();
        if len <= 4 {
            return "*".repeat(len);
        }
        let last_four: String = self.number.chars().skip(len - 4).collect();
        format!("{}{}", "*".repeat(len - 4), last_four)
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("brand", &self.brand)
            .field("number", &self.masked_number())
            .field("holder", &self.holder)
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &"***")
            .finish()
    }
}
