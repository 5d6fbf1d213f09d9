//! Uniform result shape for every processed request.

use crate::cards::CardValidationError;
use crate::client::HttpOutcome;
use serde::de::DeserializeOwned;

/// Where an envelope's body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOrigin {
    /// The gateway answered; the body is its payload verbatim.
    Gateway,
    /// The request was refused locally and never sent.
    LocalValidation,
}

/// Raw gateway payload plus whether the call succeeded.
///
/// The body is never interpreted here; result codes inside it are the
/// caller's to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    raw_body: String,
    succeeded: bool,
    status: Option<u16>,
    origin: ResponseOrigin,
}

impl ResponseEnvelope {
    pub fn new(raw_body: impl Into<String>, succeeded: bool) -> Self {
        Self {
            raw_body: raw_body.into(),
            succeeded,
            status: None,
            origin: ResponseOrigin::Gateway,
        }
    }

    /// Succeeded only for HTTP 2xx; error bodies are kept as sent.
    pub fn from_outcome(outcome: HttpOutcome) -> Self {
        let succeeded = outcome.is_success();
        Self {
            raw_body: outcome.body,
            succeeded,
            status: Some(outcome.status),
            origin: ResponseOrigin::Gateway,
        }
    }

    /// Failed envelope in the gateway's `{"result":{"code","message"}}` shape.
    pub fn from_validation_error(error: &CardValidationError) -> Self {
        let body = serde_json::json!({
            "result": {
                "code": error.code(),
                "message": error.to_string(),
            }
        });

        Self {
            raw_body: body.to_string(),
            succeeded: false,
            status: None,
            origin: ResponseOrigin::LocalValidation,
        }
    }

    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    pub fn into_raw_body(self) -> String {
        self.raw_body
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// HTTP status, when the gateway was reached.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn origin(&self) -> ResponseOrigin {
        self.origin
    }

    /// Deserialize the body on demand.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.raw_body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_outcome() {
        let envelope = ResponseEnvelope::from_outcome(HttpOutcome::new(
            200,
            r#"{"id":"8ac7a4a1","result":{"code":"000.100.110"}}"#,
        ));
        assert!(envelope.succeeded());
        assert_eq!(envelope.status(), Some(200));
        assert_eq!(envelope.origin(), ResponseOrigin::Gateway);
        assert_eq!(
            envelope.raw_body(),
            r#"{"id":"8ac7a4a1","result":{"code":"000.100.110"}}"#
        );
    }

    #[test]
    fn test_error_outcome_keeps_body_verbatim() {
        let body = r#"{"result":{"code":"800.100.100"}}"#;
        let envelope = ResponseEnvelope::from_outcome(HttpOutcome::new(400, body));
        assert!(!envelope.succeeded());
        assert_eq!(envelope.status(), Some(400));
        assert_eq!(envelope.raw_body(), body);
    }

    #[test]
    fn test_non_json_body_is_passed_through() {
        let envelope = ResponseEnvelope::from_outcome(HttpOutcome::new(502, "Bad Gateway"));
        assert!(!envelope.succeeded());
        assert_eq!(envelope.raw_body(), "Bad Gateway");
        assert!(envelope.json::<serde_json::Value>().is_err());
    }

    #[test]
    fn test_validation_failure_shape() {
        let envelope = ResponseEnvelope::from_validation_error(&CardValidationError::InvalidNumber);
        assert!(!envelope.succeeded());
        assert_eq!(envelope.origin(), ResponseOrigin::LocalValidation);
        assert_eq!(envelope.status(), None);

        let body: serde_json::Value = envelope.json().unwrap();
        assert_eq!(body["result"]["code"], "invalid_card_number");
        assert_eq!(body["result"]["message"], "Card number is invalid");
    }

    #[test]
    fn test_plain_constructor() {
        let envelope = ResponseEnvelope::new("ok", true);
        assert!(envelope.succeeded());
        assert_eq!(envelope.into_raw_body(), "ok");
    }
}
