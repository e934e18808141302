//! Configuration error types.
//!
//! Each variant keeps the detailed cause for logging and offers a short
//! `user_message()` that is safe to show in the UI.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_detail() {
        let err = ConfigError::ParseError("expected `=` at line 3".into());
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_user_message_hides_detail() {
        let err = ConfigError::Invalid("forecast.timeout_secs: must be > 0".into());
        assert_eq!(
            err.user_message(),
            "Invalid configuration. Check your settings."
        );
        assert!(!err.user_message().contains("timeout"));
    }

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = [
            ConfigError::Invalid("x".into()),
            ConfigError::ParseError("x".into()),
        ];
        for err in &errors {
            assert!(!err.user_message().is_empty());
        }
    }
}
