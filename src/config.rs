//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Settings for the chat widget and its hosts.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Name used in the greeting.
    pub brand_name: String,
    /// WhatsApp number for messaging handoffs (any formatting; digits are kept).
    pub whatsapp_number: String,
    /// Number dialled by "Call Now".
    pub phone_number: String,
    /// Pacing delay before each bot reply is shown.
    pub reply_delay: Duration,
    /// Delay before an automatic handoff link is opened.
    pub handoff_delay: Duration,
    /// Delay before the widget closes after a farewell.
    pub close_delay: Duration,
    /// A last visit older than this picks the returning-user greeting.
    pub returning_after_days: i64,
    /// Port for the HTTP widget API.
    pub http_port: u16,
    /// Run the terminal REPL alongside the HTTP API.
    pub cli_enabled: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            brand_name: "Study Abroad Advisors".to_string(),
            whatsapp_number: "+919876543210".to_string(),
            phone_number: "+919876543210".to_string(),
            reply_delay: Duration::from_millis(800),
            handoff_delay: Duration::from_millis(2000),
            close_delay: Duration::from_millis(1500),
            returning_after_days: 7,
            http_port: 8080,
            cli_enabled: true,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

impl ChatConfig {
    /// Load from `ABROAD_ASSIST_*` environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let ms = |key: &str, fallback: Duration| {
            env_parse::<u64>(key)
                .map(Duration::from_millis)
                .unwrap_or(fallback)
        };

        Self {
            brand_name: std::env::var("ABROAD_ASSIST_BRAND_NAME").unwrap_or(defaults.brand_name),
            whatsapp_number: std::env::var("ABROAD_ASSIST_WHATSAPP_NUMBER")
                .unwrap_or(defaults.whatsapp_number),
            phone_number: std::env::var("ABROAD_ASSIST_PHONE_NUMBER")
                .unwrap_or(defaults.phone_number),
            reply_delay: ms("ABROAD_ASSIST_REPLY_DELAY_MS", defaults.reply_delay),
            handoff_delay: ms("ABROAD_ASSIST_HANDOFF_DELAY_MS", defaults.handoff_delay),
            close_delay: ms("ABROAD_ASSIST_CLOSE_DELAY_MS", defaults.close_delay),
            returning_after_days: env_parse("ABROAD_ASSIST_RETURNING_AFTER_DAYS")
                .unwrap_or(defaults.returning_after_days),
            http_port: env_parse("ABROAD_ASSIST_HTTP_PORT").unwrap_or(defaults.http_port),
            cli_enabled: env_parse("ABROAD_ASSIST_CLI").unwrap_or(defaults.cli_enabled),
        }
    }

    /// Zero delays, for tests and non-interactive hosts.
    pub fn without_delays(mut self) -> Self {
        self.reply_delay = Duration::ZERO;
        self.handoff_delay = Duration::ZERO;
        self.close_delay = Duration::ZERO;
        self
    }

    /// Reject settings that would produce unusable handoff links.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.whatsapp_number.chars().any(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidValue {
                key: "ABROAD_ASSIST_WHATSAPP_NUMBER".to_string(),
                message: "must contain at least one digit".to_string(),
            });
        }
        if !self.phone_number.chars().any(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidValue {
                key: "ABROAD_ASSIST_PHONE_NUMBER".to_string(),
                message: "must contain at least one digit".to_string(),
            });
        }
        if self.returning_after_days < 0 {
            return Err(ConfigError::InvalidValue {
                key: "ABROAD_ASSIST_RETURNING_AFTER_DAYS".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ChatConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.returning_after_days, 7);
    }

    #[test]
    fn without_delays_zeroes_pacing() {
        let config = ChatConfig::default().without_delays();
        assert_eq!(config.reply_delay, Duration::ZERO);
        assert_eq!(config.handoff_delay, Duration::ZERO);
        assert_eq!(config.close_delay, Duration::ZERO);
    }

    #[test]
    fn validate_rejects_numbers_without_digits() {
        let config = ChatConfig {
            whatsapp_number: "call us".to_string(),
            ..ChatConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "ABROAD_ASSIST_WHATSAPP_NUMBER"
        ));
    }

    #[test]
    fn validate_rejects_negative_cutoff() {
        let config = ChatConfig {
            returning_after_days: -1,
            ..ChatConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
