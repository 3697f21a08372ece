//! Startup configuration — read once from the process environment.
//!
//! The API credential is mandatory; everything else has a default. A missing
//! credential is a fatal configuration error surfaced before any session
//! starts.

use tracing::debug;

/// Environment variable holding the API credential.
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Environment variable overriding the model name.
pub const MODEL_VAR: &str = "ANTHROPIC_DEFAULT_MODEL";

/// Model used when no override is set.
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

/// Configuration errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "{API_KEY_VAR} not found in the environment. \
         Set it in your shell or a .env file before starting a session."
    )]
    MissingApiKey,
}

/// Resolved startup configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// API credential for the model backend.
    pub api_key: String,
    /// Model identifier to request.
    pub model: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Keeps the resolution logic testable without mutating process-global
    /// environment state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let model = lookup(MODEL_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        debug!(model = %model, "configuration loaded");
        Ok(Config { api_key, model })
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn empty_api_key_is_fatal() {
        let result = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "")]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn default_model_applies() {
        let config = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "sk-test")])).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn model_override_applies() {
        let config = Config::from_lookup(lookup_from(&[
            (API_KEY_VAR, "sk-test"),
            (MODEL_VAR, "claude-3-opus-20240229"),
        ]))
        .unwrap();
        assert_eq!(config.model, "claude-3-opus-20240229");
    }

    #[test]
    fn error_message_is_actionable() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains(API_KEY_VAR));
    }
}
