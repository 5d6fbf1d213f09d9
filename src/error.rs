use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Faults that stop a request before the gateway could answer it.
///
/// An HTTP error response from the gateway is not one of these: it is
/// returned to the caller as a failed `ResponseEnvelope`.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Timeout error: request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },
}

impl GatewayError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    /// True for faults raised by the transport rather than by local checks.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}

#[cfg(feature = "reqwest-client")]
impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::timeout(0)
        } else {
            GatewayError::transport(format!("Request error: {}", err))
        }
    }
}

impl From<config::ConfigError> for GatewayError {
    fn from(err: config::ConfigError) -> Self {
        GatewayError::config(err.to_string())
    }
}
