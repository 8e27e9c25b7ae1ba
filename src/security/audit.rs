//! Audit logging for payment events.
//!
//! Provides structured audit logging with sensitive data redaction
//! and unique correlation IDs for tracking payments across operations.

use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Types of auditable events.
///
/// Each variant represents a payment-relevant operation that should be
/// tracked for compliance and reconciliation purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEventType {
    /// An authorization was sent to the gateway.
    AuthorizationAttempted,
    /// The gateway approved the authorization.
    AuthorizationApproved,
    /// The gateway declined the authorization.
    AuthorizationDeclined,
    /// The authorization failed before or during the gateway round trip.
    AuthorizationFailed,
    /// A zero-amount authorization was approved without contacting the
    /// gateway.
    AuthorizationSkipped,
    /// Processor settings failed validation.
    ConfigurationRejected,
}

/// Details for audit log entry.
///
/// Contains contextual information about the audited payment.
/// Fields are marked with `skip_serializing_if` to avoid logging
/// when not applicable.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuditDetails {
    /// Order reference as sent on the wire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_reference: Option<String>,
    /// Customer reference (partially redacted).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_reference: Option<String>,
    /// Merchant identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    /// Processor mode, live or test.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Amount in integer cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_cents: Option<i64>,
    /// Gateway summary code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_code: Option<i64>,
    /// Decline or failure reason (sensitive data automatically redacted).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Duration of the operation in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// Audit log entry.
///
/// Represents a single auditable payment event with timestamp, type,
/// processor identity, and contextual details.
///
/// # Examples
///
/// ```
/// use payway_bridge::security::audit::{AuditEvent, AuditEventType};
/// use uuid::Uuid;
///
/// let event = AuditEvent::new(AuditEventType::AuthorizationDeclined, "PayWay", Uuid::new_v4())
///     .with_order_reference("INV-2026-0")
///     .with_summary_code(1)
///     .with_reason("Declined");
///
/// // Log the event
/// payway_bridge::security::audit::audit_log(&event);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Event timestamp (when the event occurred).
    pub timestamp: SystemTime,
    /// Event type (what happened).
    pub event_type: AuditEventType,
    /// Processor name (which gateway handled the payment).
    pub processor: String,
    /// Request correlation ID (for tracking across operations).
    pub request_id: Uuid,
    /// Event details (contextual information).
    pub details: AuditDetails,
}

impl AuditEvent {
    /// Creates a new audit event.
    ///
    /// # Examples
    ///
    /// ```
    /// use payway_bridge::security::audit::{AuditEvent, AuditEventType};
    /// use uuid::Uuid;
    ///
    /// let event =
    ///     AuditEvent::new(AuditEventType::AuthorizationAttempted, "PayWay", Uuid::new_v4());
    /// ```
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn new(event_type: AuditEventType, processor: impl Into<String>, request_id: Uuid) -> Self {
        Self {
            timestamp: SystemTime::now(),
            event_type,
            processor: processor.into(),
            request_id,
            details: AuditDetails::default(),
        }
    }

    /// Adds the wire-level order reference to details.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn with_order_reference(mut self, reference: impl Into<String>) -> Self {
        self.details.order_reference = Some(reference.into());
        self
    }

    /// Adds the customer reference to details.
    ///
    /// Customer references should be partially redacted before logging.
    /// Use the [`redact_customer_reference`] helper.
    ///
    /// # Examples
    ///
    /// ```
    /// use payway_bridge::security::audit::{
    ///     AuditEvent, AuditEventType, redact_customer_reference,
    /// };
    /// use uuid::Uuid;
    ///
    /// let event = AuditEvent::new(AuditEventType::AuthorizationAttempted, "PayWay", Uuid::new_v4())
    ///     .with_customer_reference(redact_customer_reference("contact-1234567890"));
    /// ```
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn with_customer_reference(mut self, reference: impl Into<String>) -> Self {
        self.details.customer_reference = Some(reference.into());
        self
    }

    /// Adds the merchant identifier to details.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn with_merchant_id(mut self, merchant_id: impl Into<String>) -> Self {
        self.details.merchant_id = Some(merchant_id.into());
        self
    }

    /// Adds the processor mode to details.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.details.mode = Some(mode.into());
        self
    }

    /// Adds the amount in integer cents to details.
    #[must_use]
    pub fn with_amount_cents(mut self, cents: i64) -> Self {
        self.details.amount_cents = Some(cents);
        self
    }

    /// Adds the gateway summary code to details.
    #[must_use]
    pub fn with_summary_code(mut self, code: i64) -> Self {
        self.details.summary_code = Some(code);
        self
    }

    /// Adds a decline or failure reason to details.
    ///
    /// Automatically redacts sensitive data from the reason text.
    ///
    /// # Examples
    ///
    /// ```
    /// use payway_bridge::security::audit::{AuditEvent, AuditEventType};
    /// use uuid::Uuid;
    ///
    /// let event = AuditEvent::new(AuditEventType::AuthorizationFailed, "PayWay", Uuid::new_v4())
    ///     .with_reason("Network timeout after 30s");
    /// ```
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        let reason_text = reason.into();
        self.details.reason = Some(redact_sensitive(&reason_text));
        self
    }

    /// Adds duration to details.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use payway_bridge::security::audit::{AuditEvent, AuditEventType};
    /// use uuid::Uuid;
    ///
    /// let event = AuditEvent::new(AuditEventType::AuthorizationApproved, "PayWay", Uuid::new_v4())
    ///     .with_duration(Duration::from_millis(850));
    /// ```
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "duration in ms fits u64 for practical values"
    )]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.details.duration_ms = Some(duration.as_millis() as u64);
        self
    }
}

/// Logs audit event to tracing with target "audit".
///
/// Audit logs use a special target for easy filtering and routing
/// to separate log files or reconciliation systems.
///
/// # Examples
///
/// ```
/// use payway_bridge::security::audit::{AuditEvent, AuditEventType, audit_log};
/// use uuid::Uuid;
///
/// let event = AuditEvent::new(AuditEventType::AuthorizationApproved, "PayWay", Uuid::new_v4())
///     .with_order_reference("INV-2026-0")
///     .with_summary_code(0);
///
/// audit_log(&event);
/// ```
pub fn audit_log(event: &AuditEvent) {
    tracing::info!(
        target: "audit",
        timestamp = ?event.timestamp,
        event_type = ?event.event_type,
        processor = %event.processor,
        request_id = %event.request_id,
        details = ?event.details,
        "AUDIT"
    );
}

/// Redacts sensitive data from free text.
///
/// Removes card numbers, verification values, and passwords from decline
/// reasons, error messages, and wire dumps before they reach a log line.
///
/// # Pattern Matching
///
/// - Card numbers in 4-digit groups: `4111-1111-1111-1111` → `XXXX-XXXX-XXXX-XXXX`
/// - Unbroken card numbers (12 to 19 digits): `4111111111111111` → `****1111`
/// - Verification values after CVN/CVV keywords: `card.CVN=321` → `card.CVN=XXX`
/// - Password values: `customer.password=s3cret` → `customer.password=<redacted>`
///
/// # Examples
///
/// ```
/// use payway_bridge::security::audit::redact_sensitive;
///
/// let msg = "Payment failed for card 4111111111111111";
/// let redacted = redact_sensitive(msg);
/// assert!(redacted.contains("****1111"));
/// assert!(!redacted.contains("4111111111111111"));
/// ```
#[must_use]
pub fn redact_sensitive(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut output = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if let Some(consumed) = mask_grouped_card(&chars[i..], &mut output) {
            i += consumed;
        } else if let Some(consumed) = mask_digit_run(&chars[i..], &mut output) {
            i += consumed;
        } else if let Some(consumed) = mask_verification_value(&chars[i..], &mut output) {
            i += consumed;
        } else if let Some(consumed) = mask_password_value(&chars[i..], &mut output) {
            i += consumed;
        } else {
            output.push(chars[i]);
            i += 1;
        }
    }

    output
}

/// Masks `DDDD-DDDD-DDDD-DDDD` and `DDDD DDDD DDDD DDDD` card patterns.
fn mask_grouped_card(chars: &[char], output: &mut String) -> Option<usize> {
    if chars.len() < 19 {
        return None;
    }
    let separator = chars[4];
    if separator != '-' && separator != ' ' {
        return None;
    }
    for group in 0..4 {
        let start = group * 5;
        if !chars[start..start + 4].iter().all(char::is_ascii_digit) {
            return None;
        }
        if group < 3 && chars[start + 4] != separator {
            return None;
        }
    }
    // Next char must not extend the final group into a longer number.
    if chars.get(19).is_some_and(char::is_ascii_digit) {
        return None;
    }
    output.push_str("XXXX-XXXX-XXXX-XXXX");
    Some(19)
}

/// Masks unbroken digit runs of card-number length, keeping the last four.
///
/// Consumes any digit run whole, so the tail of a longer number is never
/// mistaken for a card.
fn mask_digit_run(chars: &[char], output: &mut String) -> Option<usize> {
    let run = chars.iter().take_while(|c| c.is_ascii_digit()).count();
    if run == 0 {
        return None;
    }
    if (12..=19).contains(&run) {
        output.push_str("****");
        output.extend(&chars[run - 4..run]);
    } else {
        output.extend(&chars[..run]);
    }
    Some(run)
}

/// Masks 3-4 digit values after CVN/CVV style keywords.
fn mask_verification_value(chars: &[char], output: &mut String) -> Option<usize> {
    let keyword_len = ["cvv2", "cvn", "cvv", "cvc", "cid"]
        .iter()
        .find_map(|keyword| starts_with_ignore_case(chars, keyword))?;

    let separator = separator_run(&chars[keyword_len..])?;
    let after = keyword_len + separator;
    let digits = chars[after..].iter().take_while(|c| c.is_ascii_digit()).count();
    if !(3..=4).contains(&digits) {
        return None;
    }

    output.extend(&chars[..after]);
    output.push_str("XXX");
    Some(after + digits)
}

/// Masks values after a `password` keyword up to the next delimiter.
fn mask_password_value(chars: &[char], output: &mut String) -> Option<usize> {
    let keyword_len = starts_with_ignore_case(chars, "password")?;
    let separator = separator_run(&chars[keyword_len..])?;
    let after = keyword_len + separator;
    let value = chars[after..]
        .iter()
        .take_while(|&&c| c != '&' && c != '"' && !c.is_whitespace())
        .count();

    output.extend(&chars[..after]);
    output.push_str("<redacted>");
    Some(after + value)
}

/// Returns the keyword length when `chars` starts with it, case-insensitively.
fn starts_with_ignore_case(chars: &[char], keyword: &str) -> Option<usize> {
    let keyword_chars: Vec<char> = keyword.chars().collect();
    if chars.len() < keyword_chars.len() {
        return None;
    }
    let matches = chars[..keyword_chars.len()]
        .iter()
        .zip(&keyword_chars)
        .all(|(c, k)| c.eq_ignore_ascii_case(k));
    matches.then_some(keyword_chars.len())
}

/// Length of the separator run (`:`, `=`, whitespace) after a keyword.
/// At least one separator char is required.
fn separator_run(chars: &[char]) -> Option<usize> {
    let run =
        chars.iter().take_while(|&&c| c == ':' || c == '=' || c.is_whitespace()).count();
    (run > 0).then_some(run)
}

/// Redacts a customer reference to show only its last 4 characters.
///
/// Provides enough information for correlation while protecting
/// user privacy.
///
/// # Examples
///
/// ```
/// use payway_bridge::security::audit::redact_customer_reference;
///
/// assert_eq!(redact_customer_reference("contact-1234567890"), "contact-******7890");
/// assert_eq!(redact_customer_reference("abc"), "abc");
/// assert_eq!(redact_customer_reference(""), "");
/// ```
#[must_use]
pub fn redact_customer_reference(reference: &str) -> String {
    let chars: Vec<char> = reference.chars().collect();
    if chars.len() <= 4 {
        return reference.to_owned();
    }

    // Keep a prefix like "contact-" intact.
    let prefix_len = chars.iter().position(|&c| c == '-').map_or(0, |pos| pos + 1);
    if prefix_len + 4 >= chars.len() {
        return reference.to_owned();
    }

    let mut redacted: String = chars[..prefix_len].iter().collect();
    redacted.push_str(&"*".repeat(chars.len() - prefix_len - 4));
    redacted.extend(&chars[chars.len() - 4..]);
    redacted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_grouped_card() {
        let inputs = [
            ("Card: 4111-1111-1111-1111", "Card: XXXX-XXXX-XXXX-XXXX"),
            ("Card: 4111 1111 1111 1111", "Card: XXXX-XXXX-XXXX-XXXX"),
        ];

        for (input, expected) in &inputs {
            let result = redact_sensitive(input);
            assert_eq!(&result, expected, "Failed to redact: {input}");
        }
    }

    #[test]
    fn test_redact_unbroken_card() {
        assert_eq!(
            redact_sensitive("declined for card 4111111111111111 at checkout"),
            "declined for card ****1111 at checkout"
        );
        // Amex length
        assert_eq!(redact_sensitive("card 340000000000009"), "card ****0009");
    }

    #[test]
    fn test_short_and_long_digit_runs_untouched() {
        assert_eq!(redact_sensitive("receipt 12345678"), "receipt 12345678");
        assert_eq!(
            redact_sensitive("trace 123456789012345678901"),
            "trace 123456789012345678901"
        );
    }

    #[test]
    fn test_redact_verification_value() {
        let inputs = ["CVV: 123", "cvv: 1234", "CVC=456", "card.CVN=321"];

        for input in &inputs {
            let result = redact_sensitive(input);
            assert!(result.contains("XXX"), "not redacted: {result}");
            assert!(!result.contains("123"), "value leaked in: {result}");
            assert!(!result.contains("456"), "value leaked in: {result}");
            assert!(!result.contains("321"), "value leaked in: {result}");
        }
    }

    #[test]
    fn test_redact_password_value() {
        assert_eq!(
            redact_sensitive("customer.password=s3cret&order.amount=1230"),
            "customer.password=<redacted>&order.amount=1230"
        );
        assert_eq!(redact_sensitive("password: hunter2 rest"), "password: <redacted> rest");
    }

    #[test]
    fn test_password_without_separator_untouched() {
        assert_eq!(redact_sensitive("password_hash=abc"), "password_hash=abc");
    }

    #[test]
    fn test_redact_wire_request() {
        let wire = "card.PAN=4111111111111111&card.CVN=321&customer.password=s3cret&order.amount=1230";
        let redacted = redact_sensitive(wire);

        assert!(redacted.contains("card.PAN=****1111"));
        assert!(redacted.contains("card.CVN=XXX"));
        assert!(redacted.contains("customer.password=<redacted>"));
        assert!(redacted.contains("order.amount=1230"));
    }

    #[test]
    fn test_redact_handles_non_ascii() {
        let result = redact_sensitive("Kärtchen 4111111111111111 abgelehnt");
        assert_eq!(result, "Kärtchen ****1111 abgelehnt");
    }

    #[test]
    fn test_redact_customer_reference() {
        assert_eq!(redact_customer_reference("contact-1234567890"), "contact-******7890");
        assert_eq!(redact_customer_reference("1234567890"), "******7890");
        assert_eq!(redact_customer_reference("abc"), "abc");
        assert_eq!(redact_customer_reference(""), "");
        assert_eq!(redact_customer_reference("a"), "a");
    }

    #[test]
    fn test_audit_event_builder() {
        let request_id = Uuid::new_v4();
        let event = AuditEvent::new(AuditEventType::AuthorizationApproved, "PayWay", request_id)
            .with_order_reference("INV-2026-0")
            .with_merchant_id("TEST")
            .with_mode("test")
            .with_amount_cents(1230)
            .with_summary_code(0)
            .with_duration(Duration::from_millis(850));

        assert_eq!(event.processor, "PayWay");
        assert_eq!(event.request_id, request_id);
        assert_eq!(event.details.order_reference.as_deref(), Some("INV-2026-0"));
        assert_eq!(event.details.merchant_id.as_deref(), Some("TEST"));
        assert_eq!(event.details.mode.as_deref(), Some("test"));
        assert_eq!(event.details.amount_cents, Some(1230));
        assert_eq!(event.details.summary_code, Some(0));
        assert_eq!(event.details.duration_ms, Some(850));
    }

    #[test]
    fn test_with_reason_redacts() {
        let event = AuditEvent::new(AuditEventType::AuthorizationFailed, "PayWay", Uuid::new_v4())
            .with_reason("declined for card 4111111111111111");

        let reason = event.details.reason.expect("reason set");
        assert!(reason.contains("****1111"));
        assert!(!reason.contains("4111111111111111"));
    }

    #[test]
    fn test_event_type_serializes_snake_case() {
        let json = serde_json::to_value(AuditEventType::AuthorizationDeclined).unwrap();
        assert_eq!(json["type"], "authorization_declined");
    }

    #[test]
    fn test_details_skip_unset_fields() {
        let event =
            AuditEvent::new(AuditEventType::AuthorizationSkipped, "PayWay", Uuid::new_v4());
        let json = serde_json::to_string(&event.details).unwrap();
        assert_eq!(json, "{}");
    }
}
