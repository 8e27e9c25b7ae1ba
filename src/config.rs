//! Processor configuration and credential validation.
//!
//! [`ProcessorConfig`] carries the credentials the gateway expects on every
//! request (username, password, merchant id) plus the processor mode. Hosts
//! typically load it from stored settings; [`ProcessorConfig::from_toml`] and
//! [`ProcessorConfig::from_file`] cover hosts that keep settings as TOML.
//!
//! Validation is deliberately separate from parsing: a settings screen wants
//! every missing field reported at once, so [`ProcessorConfig::validate`]
//! returns the full ordered list instead of stopping at the first problem.
//! The payment path re-checks before any network call and refuses to proceed
//! on the first missing credential.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{GatewayError, Result};

/// A missing processor credential.
///
/// One variant per required field, in the order the fields are checked. The
/// `Display` text is the message a host settings screen shows the
/// administrator, so it names the field the way the settings form labels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `username` is empty or whitespace-only.
    #[error("The \"Username\" is not set in the PayWay Payment Processor settings.")]
    MissingUsername,
    /// `password` is empty or whitespace-only.
    #[error("The \"Password\" is not set in the PayWay Payment Processor settings.")]
    MissingPassword,
    /// `merchant_id` is empty or whitespace-only.
    #[error("The \"MerchantId\" is not set in the PayWay Payment Processor settings.")]
    MissingMerchantId,
}

/// Gateway environment a processor points at.
///
/// Carried as an explicit per-configuration field so two processors in the
/// same host can run against different environments without shared state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessorMode {
    /// Production gateway; real money moves.
    Live,
    /// Test gateway environment.
    #[default]
    Test,
}

impl ProcessorMode {
    /// Returns true for the test environment.
    #[must_use]
    pub const fn is_test(self) -> bool {
        matches!(self, Self::Test)
    }

    /// Stable lowercase name, as it appears in settings files and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Test => "test",
        }
    }
}

/// Credentials and environment for one configured payment processor.
///
/// Immutable once loaded. The invariant the payment path relies on is that
/// all three credential fields are non-empty; [`validate`](Self::validate)
/// checks exactly that and nothing else.
///
/// The password never appears in `Debug` output.
///
/// # Examples
///
/// ```
/// use payway_bridge::config::ProcessorConfig;
///
/// let config = ProcessorConfig::from_toml(
///     r#"
///     username = "api-user"
///     password = "api-secret"
///     merchant_id = "TEST"
///     mode = "test"
///     "#,
/// )
/// .expect("settings parse");
///
/// assert!(config.validate().is_empty());
/// assert!(config.mode.is_test());
/// ```
#[derive(Clone, Deserialize)]
pub struct ProcessorConfig {
    /// Gateway API username.
    pub username: String,
    /// Gateway API password.
    pub password: String,
    /// Merchant identifier issued by the gateway.
    pub merchant_id: String,
    /// Gateway environment; defaults to [`ProcessorMode::Test`].
    #[serde(default)]
    pub mode: ProcessorMode,
}

impl ProcessorConfig {
    /// Checks each credential for presence.
    ///
    /// Empty and whitespace-only values count as missing. Returns one
    /// [`ConfigError`] per missing field, in the order username, password,
    /// merchant id; an empty vector signals a valid configuration. No side
    /// effects, callable independently of any transaction.
    ///
    /// # Examples
    ///
    /// ```
    /// use payway_bridge::config::{ConfigError, ProcessorConfig, ProcessorMode};
    ///
    /// let config = ProcessorConfig {
    ///     username: String::new(),
    ///     password: "secret".to_owned(),
    ///     merchant_id: "  ".to_owned(),
    ///     mode: ProcessorMode::Test,
    /// };
    ///
    /// assert_eq!(
    ///     config.validate(),
    ///     vec![ConfigError::MissingUsername, ConfigError::MissingMerchantId]
    /// );
    /// ```
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.username.trim().is_empty() {
            errors.push(ConfigError::MissingUsername);
        }
        if self.password.trim().is_empty() {
            errors.push(ConfigError::MissingPassword);
        }
        if self.merchant_id.trim().is_empty() {
            errors.push(ConfigError::MissingMerchantId);
        }
        errors
    }

    /// Parses a configuration from a TOML document.
    ///
    /// Parsing does not check credential presence; call
    /// [`validate`](Self::validate) afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Settings`] if the document is not valid TOML or
    /// is missing a required key.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| GatewayError::Settings(format!("invalid TOML settings: {e}")))
    }

    /// Reads and parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Settings`] if the file cannot be read or the
    /// content is not valid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GatewayError::Settings(format!("cannot read settings file: {e}")))?;
        Self::from_toml(&content)
    }
}

impl fmt::Debug for ProcessorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("merchant_id", &self.merchant_id)
            .field("mode", &self.mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ProcessorConfig {
        ProcessorConfig {
            username: "api-user".to_owned(),
            password: "api-secret".to_owned(),
            merchant_id: "TEST".to_owned(),
            mode: ProcessorMode::Test,
        }
    }

    #[test]
    fn test_validate_passes_on_complete_config() {
        assert!(valid_config().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_all_missing_fields_in_order() {
        let config = ProcessorConfig {
            username: String::new(),
            password: String::new(),
            merchant_id: String::new(),
            mode: ProcessorMode::Test,
        };

        assert_eq!(
            config.validate(),
            vec![
                ConfigError::MissingUsername,
                ConfigError::MissingPassword,
                ConfigError::MissingMerchantId,
            ]
        );
    }

    #[test]
    fn test_validate_treats_whitespace_as_missing() {
        let config = ProcessorConfig { password: "   \t".to_owned(), ..valid_config() };
        assert_eq!(config.validate(), vec![ConfigError::MissingPassword]);
    }

    #[test]
    fn test_validate_single_missing_username() {
        let config = ProcessorConfig { username: String::new(), ..valid_config() };
        assert_eq!(config.validate(), vec![ConfigError::MissingUsername]);
    }

    #[test]
    fn test_validate_single_missing_merchant_id() {
        let config = ProcessorConfig { merchant_id: String::new(), ..valid_config() };
        assert_eq!(config.validate(), vec![ConfigError::MissingMerchantId]);
    }

    #[test]
    fn test_config_error_messages_name_the_settings_field() {
        assert_eq!(
            ConfigError::MissingUsername.to_string(),
            "The \"Username\" is not set in the PayWay Payment Processor settings."
        );
        assert_eq!(
            ConfigError::MissingPassword.to_string(),
            "The \"Password\" is not set in the PayWay Payment Processor settings."
        );
        assert_eq!(
            ConfigError::MissingMerchantId.to_string(),
            "The \"MerchantId\" is not set in the PayWay Payment Processor settings."
        );
    }

    #[test]
    fn test_from_toml_full_document() {
        let config = ProcessorConfig::from_toml(
            r#"
            username = "api-user"
            password = "api-secret"
            merchant_id = "MER123"
            mode = "live"
            "#,
        )
        .expect("should parse valid TOML");

        assert_eq!(config.username, "api-user");
        assert_eq!(config.merchant_id, "MER123");
        assert_eq!(config.mode, ProcessorMode::Live);
        assert!(!config.mode.is_test());
    }

    #[test]
    fn test_from_toml_mode_defaults_to_test() {
        let config = ProcessorConfig::from_toml(
            r#"
            username = "api-user"
            password = "api-secret"
            merchant_id = "MER123"
            "#,
        )
        .expect("should parse valid TOML");

        assert_eq!(config.mode, ProcessorMode::Test);
    }

    #[test]
    fn test_from_toml_rejects_invalid_document() {
        let result = ProcessorConfig::from_toml("not valid toml [");
        assert!(matches!(result, Err(GatewayError::Settings(_))));
    }

    #[test]
    fn test_from_toml_rejects_missing_key() {
        let result = ProcessorConfig::from_toml(r#"username = "api-user""#);
        assert!(matches!(result, Err(GatewayError::Settings(_))));
    }

    #[test]
    fn test_from_file_not_found() {
        let result = ProcessorConfig::from_file("/nonexistent/path/processor.toml");
        assert!(matches!(result, Err(GatewayError::Settings(_))));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = valid_config();
        let debug_str = format!("{config:?}");

        assert!(debug_str.contains("api-user"));
        assert!(debug_str.contains("<redacted>"));
        assert!(!debug_str.contains("api-secret"));
    }

    #[test]
    fn test_mode_as_str() {
        assert_eq!(ProcessorMode::Live.as_str(), "live");
        assert_eq!(ProcessorMode::Test.as_str(), "test");
    }
}
