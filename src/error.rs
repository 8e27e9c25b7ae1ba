//! Error types for the PayWay bridge.
//!
//! This module defines all error types that can occur during bridge operations.
//! All errors implement the standard [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Configuration errors** ([`GatewayError::Config`], [`GatewayError::Settings`]):
//!   missing credentials or malformed settings
//! - **Request errors** ([`GatewayError::InvalidAmount`]): payment input the bridge
//!   refuses to send
//! - **Network errors** ([`GatewayError::Http`], [`GatewayError::Transport`]):
//!   failures inside the external gateway client
//! - **Protocol errors** ([`GatewayError::Response`], [`GatewayError::InvalidEndpoint`]):
//!   gateway responses or endpoints the bridge cannot accept
//!
//! A gateway *decline* is not an error: a non-zero summary code becomes
//! [`PaymentResult::Declined`](crate::payment::PaymentResult::Declined) so the
//! host application decides whether to abort, escalate, or display it.
//!
//! # Examples
//!
//! ```
//! use payway_bridge::error::{GatewayError, Result};
//!
//! fn require_reference(reference: &str) -> Result<&str> {
//!     if reference.is_empty() {
//!         return Err(GatewayError::Settings("order reference is empty".to_owned()));
//!     }
//!     Ok(reference)
//! }
//! ```

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for bridge operations.
///
/// This is a convenience type that uses [`GatewayError`] as the error type.
/// All fallible functions in this crate return this type.
///
/// Results should be handled by the caller - either checked for errors,
/// propagated with `?`, or explicitly acknowledged with `.unwrap()` or
/// `.expect()` in cases where failure is impossible.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur in the PayWay bridge.
///
/// All variants include contextual information about what went wrong.
/// The error messages are designed to be user-facing and actionable.
///
/// # Error Recovery
///
/// - **Configuration errors** ([`Config`](Self::Config), [`Settings`](Self::Settings)):
///   fix the processor settings; never retried automatically
/// - **Request errors** ([`InvalidAmount`](Self::InvalidAmount)): fix the payment
///   request and resubmit
/// - **Transient errors** ([`Http`](Self::Http), [`Transport`](Self::Transport)):
///   surface to the host; the bridge itself never retries
/// - **Protocol errors** ([`Response`](Self::Response)): contact gateway support
///
/// This type implements `#[must_use]` to ensure errors are not silently ignored.
/// Always handle errors by checking, propagating, or explicitly panicking.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required processor credential is missing.
    ///
    /// This error occurs when `authorize` is invoked with a configuration that
    /// fails presence validation. It carries the first missing field; run
    /// [`ProcessorConfig::validate`](crate::config::ProcessorConfig::validate)
    /// to collect the full list for a settings screen.
    ///
    /// # Recovery
    ///
    /// An administrator must supply the missing credential in the processor
    /// settings. Never retry the payment until validation passes.
    #[error("payment processor configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Processor or client settings could not be loaded.
    ///
    /// This error occurs when a TOML settings document cannot be read or
    /// parsed, or when a settings value fails validation (for example an
    /// empty log directory).
    ///
    /// # Recovery
    ///
    /// Fix the settings source and reload. The message names the offending
    /// value.
    #[error("invalid processor settings: {0}")]
    Settings(String),

    /// The payment amount cannot be represented on the wire.
    ///
    /// This error occurs when amount normalization rejects the request.
    /// Common causes include:
    /// - Negative amounts
    /// - Amounts whose minor-unit value overflows a 64-bit integer
    ///
    /// # Recovery
    ///
    /// Fix the amount in the payment request and resubmit.
    #[error("invalid payment amount: {0}")]
    InvalidAmount(String),

    /// The gateway returned a response the bridge cannot interpret.
    ///
    /// This error occurs when the flat response mapping is missing
    /// `response.summaryCode` or carries a non-integer value there. A response
    /// without a readable outcome is never treated as an approval.
    ///
    /// # Recovery
    ///
    /// This usually indicates a gateway-side or client-side fault. Capture the
    /// raw response and contact gateway support.
    #[error("malformed gateway response: {0}")]
    Response(String),

    /// HTTP request failed.
    ///
    /// This error wraps [`reqwest::Error`] and occurs when an HTTP-backed
    /// gateway client fails to complete the network round trip. Common causes
    /// include:
    /// - Network timeouts
    /// - Connection refused
    /// - DNS resolution failures
    /// - TLS/SSL errors
    ///
    /// # Recovery
    ///
    /// Surface to the host application; the payment outcome is unknown and the
    /// bridge performs no retries of its own.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The external gateway client failed outside HTTP.
    ///
    /// This error occurs when a client implementation fails to initialise or
    /// to complete its round trip for a non-HTTP reason, such as certificate
    /// material it cannot load.
    ///
    /// # Recovery
    ///
    /// Check the client configuration (certificate paths, log directory) and
    /// the client's own logs.
    #[error("gateway transport failed: {0}")]
    Transport(String),

    /// Invalid gateway endpoint override.
    ///
    /// This error occurs when endpoint validation rejects an `api_url`
    /// override. Common causes include:
    /// - Non-HTTPS URL (HTTP is not allowed)
    /// - Localhost or loopback addresses (security restriction)
    /// - Malformed URL syntax
    ///
    /// # Examples
    ///
    /// ```
    /// use payway_bridge::error::GatewayError;
    ///
    /// // These endpoints will be rejected:
    /// let err = GatewayError::InvalidEndpoint("http://example.com".to_owned());
    /// assert!(err.to_string().contains("invalid gateway endpoint"));
    ///
    /// let err = GatewayError::InvalidEndpoint("https://localhost/api".to_owned());
    /// assert!(err.to_string().contains("invalid gateway endpoint"));
    /// ```
    #[error("invalid gateway endpoint: {0}")]
    InvalidEndpoint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = GatewayError::Transport("certificate file unreadable".into());
        assert_eq!(error.to_string(), "gateway transport failed: certificate file unreadable");
    }

    #[test]
    fn test_response_error() {
        let error = GatewayError::Response("response.summaryCode missing".into());
        assert!(error.to_string().contains("malformed gateway response"));
    }

    #[test]
    fn test_invalid_amount_error() {
        let error = GatewayError::InvalidAmount("amount must not be negative: -1".to_owned());
        assert_eq!(error.to_string(), "invalid payment amount: amount must not be negative: -1");
    }

    #[test]
    fn test_config_error_conversion() {
        let error = GatewayError::from(ConfigError::MissingUsername);
        assert!(error.to_string().contains("payment processor configuration error"));
        assert!(error.to_string().contains("Username"));
    }

    #[test]
    fn test_invalid_endpoint_error() {
        let error = GatewayError::InvalidEndpoint("http://example.com".to_owned());
        assert_eq!(error.to_string(), "invalid gateway endpoint: http://example.com");
    }
}
