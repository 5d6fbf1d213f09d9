//! Merchant credentials and gateway endpoint configuration.

use crate::error::{GatewayError, GatewayResult};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const TEST_BASE_URI: &str = "https://test.oppwa.com/v1";
pub const LIVE_BASE_URI: &str = "https://oppwa.com/v1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which gateway environment requests go to when no explicit base URI is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatewayMode {
    #[default]
    Test,
    Live,
}

impl GatewayMode {
    pub fn base_uri(&self) -> &'static str {
        match self {
            GatewayMode::Test => TEST_BASE_URI,
            GatewayMode::Live => LIVE_BASE_URI,
        }
    }
}

/// Immutable credential bundle plus the base URI all requests are built on.
///
/// Safe to share between concurrent requests; nothing mutates it after
/// construction.
#[derive(Clone)]
pub struct GatewayConfig {
    user_id: String,
    password: String,
    entity_id: String,
    base_uri: String,
    timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
struct EnvSettings {
    user_id: String,
    password: String,
    entity_id: String,
    #[serde(default)]
    base_uri: Option<String>,
    #[serde(default)]
    test_mode: Option<bool>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl GatewayConfig {
    pub fn new(
        user_id: impl Into<String>,
        password: impl Into<String>,
        entity_id: impl Into<String>,
        mode: GatewayMode,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
            entity_id: entity_id.into(),
            base_uri: mode.base_uri().to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Override the mode's base URI, e.g. to point at a mock server.
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Load from `OPPWA_*` environment variables.
    pub fn from_env() -> GatewayResult<Self> {
        Self::from_source(config::Environment::with_prefix("OPPWA"))
    }

    pub(crate) fn from_source(source: config::Environment) -> GatewayResult<Self> {
        let settings: EnvSettings = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        let mode = match settings.test_mode {
            Some(false) => GatewayMode::Live,
            _ => GatewayMode::Test,
        };

        let mut config = Self::new(
            settings.user_id,
            settings.password,
            settings.entity_id,
            mode,
        );
        if let Some(base_uri) = settings.base_uri.filter(|uri| !uri.trim().is_empty()) {
            config = config.with_base_uri(base_uri);
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            config = config.with_timeout_secs(timeout_secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GatewayResult<()> {
        if self.user_id.trim().is_empty() {
            return Err(GatewayError::config("user id cannot be empty"));
        }

        if self.password.is_empty() {
            return Err(GatewayError::config("password cannot be empty"));
        }

        if self.entity_id.trim().is_empty() {
            return Err(GatewayError::config("entity id cannot be empty"));
        }

        if self.base_uri.trim().is_empty() {
            return Err(GatewayError::config("base URI cannot be empty"));
        }

        if !(self.base_uri.starts_with("https://") || self.base_uri.starts_with("http://")) {
            return Err(GatewayError::config(format!(
                "base URI must be an http(s) URL, got {}",
                self.base_uri
            )));
        }

        if self.timeout_secs == 0 {
            return Err(GatewayError::config("timeout must be greater than 0"));
        }

        Ok(())
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The three `authentication.*` form fields every request carries.
    pub(crate) fn authentication_params(&self) -> [(&'static str, String); 3] {
        [
            ("authentication.userId", self.user_id.clone()),
            ("authentication.password", self.password.clone()),
            ("authentication.entityId", self.entity_id.clone()),
        ]
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("user_id", &self.user_id)
            .field("password", &"[REDACTED]")
            .field("entity_id", &self.entity_id)
            .field("base_uri", &self.base_uri)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_source(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("OPPWA").source(Some(map))
    }

    #[test]
    fn test_mode_selects_base_uri() {
        let test = GatewayConfig::new("user", "secret", "entity", GatewayMode::Test);
        assert_eq!(test.base_uri(), "https://test.oppwa.com/v1");

        let live = GatewayConfig::new("user", "secret", "entity", GatewayMode::Live);
        assert_eq!(live.base_uri(), "https://oppwa.com/v1");
    }

    #[test]
    fn test_explicit_base_uri_strips_trailing_slash() {
        let config = GatewayConfig::new("user", "secret", "entity", GatewayMode::Test)
            .with_base_uri("http://127.0.0.1:8080/v1/");
        assert_eq!(config.base_uri(), "http://127.0.0.1:8080/v1");
    }

    #[test]
    fn test_validate_rejects_empty_credentials() {
        let config = GatewayConfig::new("", "secret", "entity", GatewayMode::Test);
        assert!(config.validate().is_err());

        let config = GatewayConfig::new("user", "", "entity", GatewayMode::Test);
        assert!(config.validate().is_err());

        let config = GatewayConfig::new("user", "secret", "  ", GatewayMode::Test);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_base_uri_and_timeout() {
        let config = GatewayConfig::new("user", "secret", "entity", GatewayMode::Test)
            .with_base_uri("ftp://example.com");
        assert!(config.validate().is_err());

        let config = GatewayConfig::new("user", "secret", "entity", GatewayMode::Test)
            .with_timeout_secs(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = GatewayConfig::new("user", "hunter2", "entity", GatewayMode::Test);
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_from_source_reads_credentials() {
        let config = GatewayConfig::from_source(env_source(&[
            ("OPPWA_USER_ID", "8a8294174b7ecb28014b9699220015cc"),
            ("OPPWA_PASSWORD", "sy6KJsT8"),
            ("OPPWA_ENTITY_ID", "8a8294174b7ecb28014b9699220015ca"),
        ]))
        .unwrap();

        assert_eq!(config.user_id(), "8a8294174b7ecb28014b9699220015cc");
        assert_eq!(config.password(), "sy6KJsT8");
        assert_eq!(config.entity_id(), "8a8294174b7ecb28014b9699220015ca");
        assert_eq!(config.base_uri(), TEST_BASE_URI);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_from_source_keeps_numeric_looking_credentials_verbatim() {
        let config = GatewayConfig::from_source(env_source(&[
            ("OPPWA_USER_ID", "00042"),
            ("OPPWA_PASSWORD", "0123456"),
            ("OPPWA_ENTITY_ID", "1.50"),
        ]))
        .unwrap();

        assert_eq!(config.user_id(), "00042");
        assert_eq!(config.password(), "0123456");
        assert_eq!(config.entity_id(), "1.50");

        let auth = config.authentication_params();
        assert_eq!(auth[1], ("authentication.password", "0123456".to_string()));
        assert_eq!(auth[2], ("authentication.entityId", "1.50".to_string()));
    }

    #[test]
    fn test_from_source_live_mode_and_overrides() {
        let config = GatewayConfig::from_source(env_source(&[
            ("OPPWA_USER_ID", "user"),
            ("OPPWA_PASSWORD", "secret"),
            ("OPPWA_ENTITY_ID", "entity"),
            ("OPPWA_TEST_MODE", "false"),
            ("OPPWA_TIMEOUT_SECS", "10"),
        ]))
        .unwrap();
        assert_eq!(config.base_uri(), LIVE_BASE_URI);
        assert_eq!(config.timeout(), Duration::from_secs(10));

        let config = GatewayConfig::from_source(env_source(&[
            ("OPPWA_USER_ID", "user"),
            ("OPPWA_PASSWORD", "secret"),
            ("OPPWA_ENTITY_ID", "entity"),
            ("OPPWA_BASE_URI", "http://localhost:9000/"),
        ]))
        .unwrap();
        assert_eq!(config.base_uri(), "http://localhost:9000");
    }

    #[test]
    fn test_from_source_missing_user_id() {
        let result = GatewayConfig::from_source(env_source(&[
            ("OPPWA_PASSWORD", "secret"),
            ("OPPWA_ENTITY_ID", "entity"),
        ]));
        assert!(matches!(result, Err(GatewayError::Config { .. })));
    }
}
