//! Card details and the validation gate applied before any debit is sent.
//!
//! Validation is injectable through [`CardValidator`] so callers with their
//! own card rules (or a vault that already vetted the card) can swap it.

pub mod types;
pub mod validation;

pub use types::{CardBrand, CardDetails, UnsupportedBrandError};
pub use validation::{CardValidationError, CardValidator, StandardCardValidator, ValidatedCard};
