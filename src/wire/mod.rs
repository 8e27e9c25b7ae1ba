//! Wire-level field names and request assembly.
//!
//! The gateway speaks flat key-value parameter sets with dotted names
//! (`customer.username`, `card.PAN`, `order.amount`). This module owns
//! those names as constants and builds the outbound parameter set from a
//! validated processor configuration and a payment request. Nothing here
//! talks to the network; the [`client`](crate::client) seam does that.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::ProcessorConfig;
use crate::error::Result;
use crate::payment::amount::to_minor_units;
use crate::payment::request::PaymentRequest;

/// Merchant API username.
pub const CUSTOMER_USERNAME: &str = "customer.username";
/// Merchant API password.
pub const CUSTOMER_PASSWORD: &str = "customer.password";
/// Merchant identifier.
pub const CUSTOMER_MERCHANT: &str = "customer.merchant";
/// Host-side customer reference, passed through verbatim.
pub const CUSTOMER_REFERENCE_NUMBER: &str = "customer.customerReferenceNumber";
/// Host-side order number, truncated to [`ORDER_NUMBER_MAX_LEN`].
pub const CUSTOMER_ORDER_NUMBER: &str = "customer.orderNumber";
/// Primary account number.
pub const CARD_PAN: &str = "card.PAN";
/// Card verification number, sent only when the payer supplied one.
pub const CARD_CVN: &str = "card.CVN";
/// Two-digit expiry year.
pub const CARD_EXPIRY_YEAR: &str = "card.expiryYear";
/// Two-digit expiry month.
pub const CARD_EXPIRY_MONTH: &str = "card.expiryMonth";
/// ISO currency code.
pub const CARD_CURRENCY: &str = "card.currency";
/// Amount in integer cents.
pub const ORDER_AMOUNT: &str = "order.amount";
/// Transaction type.
pub const ORDER_TYPE: &str = "order.type";
/// Electronic commerce indicator.
pub const ORDER_ECI: &str = "order.ECI";

/// Gateway outcome summary: `"0"` approved, anything else declined.
pub const RESPONSE_SUMMARY_CODE: &str = "response.summaryCode";
/// Human-readable outcome text.
pub const RESPONSE_TEXT: &str = "response.text";
/// Detailed scheme response code.
pub const RESPONSE_CODE: &str = "response.responseCode";
/// Gateway receipt number for an approved payment.
pub const RESPONSE_RECEIPT_NUMBER: &str = "response.receiptNo";
/// Settlement date, `YYYYMMDD`.
pub const RESPONSE_SETTLEMENT_DATE: &str = "response.settlementDate";

/// The gateway only settles in Australian dollars.
pub const CURRENCY_AUD: &str = "AUD";
/// Single-message purchase, authorize and capture in one step.
pub const ORDER_TYPE_CAPTURE: &str = "capture";
/// Indicates a card-not-present payment over TLS.
pub const ORDER_ECI_SSL: &str = "SSL";
/// The gateway rejects order numbers longer than this.
pub const ORDER_NUMBER_MAX_LEN: usize = 10;

/// Outbound parameter set for one gateway request.
///
/// Keys are the dotted wire names above. The `Debug` output masks the
/// PAN, CVN, and password so a stray log line cannot leak card material
/// or credentials.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestParameters(BTreeMap<String, String>);

impl RequestParameters {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Sets one wire field, replacing any previous value.
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Looks up one wire field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether a wire field is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no fields are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for RequestParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.0 {
            match key.as_str() {
                CARD_PAN => {
                    map.entry(key, &mask_pan(value));
                }
                CARD_CVN => {
                    map.entry(key, &"***");
                }
                CUSTOMER_PASSWORD => {
                    map.entry(key, &"<redacted>");
                }
                _ => {
                    map.entry(key, value);
                }
            }
        }
        map.finish()
    }
}

#[allow(clippy::string_slice, reason = "card numbers are ASCII digits")]
fn mask_pan(pan: &str) -> String {
    let last_four = if pan.len() >= 4 { &pan[pan.len() - 4..] } else { pan };
    format!("****{last_four}")
}

/// Truncates an order reference to the gateway's limit.
///
/// Uniqueness within the first ten characters is the caller's problem;
/// two references sharing a prefix collide on the gateway side.
#[must_use]
pub fn truncate_order_number(reference: &str) -> String {
    reference.chars().take(ORDER_NUMBER_MAX_LEN).collect()
}

/// Builds the full outbound parameter set for a capture request.
///
/// Every credential and fixed field is always present. The CVN is set
/// exactly when the request carried one. The amount is converted to
/// integer cents before it gets anywhere near the wire.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidAmount`](crate::error::GatewayError::InvalidAmount)
/// when the amount is negative or out of range.
pub fn build_request_parameters(
    config: &ProcessorConfig,
    request: &PaymentRequest,
) -> Result<RequestParameters> {
    let cents = to_minor_units(request.amount)?;

    let mut params = RequestParameters::new();
    params.insert(CUSTOMER_USERNAME, config.username.clone());
    params.insert(CUSTOMER_PASSWORD, config.password.clone());
    params.insert(CUSTOMER_MERCHANT, config.merchant_id.clone());
    params.insert(CUSTOMER_REFERENCE_NUMBER, request.customer_reference.clone());
    params.insert(CUSTOMER_ORDER_NUMBER, truncate_order_number(&request.order_reference));
    params.insert(CARD_PAN, request.card.number.clone());
    if let Some(cvv) = &request.card.cvv {
        params.insert(CARD_CVN, cvv.clone());
    }
    params.insert(CARD_EXPIRY_YEAR, request.card.expiry_year_2digit());
    params.insert(CARD_EXPIRY_MONTH, format!("{:02}", request.card.expiry_month));
    params.insert(CARD_CURRENCY, CURRENCY_AUD);
    params.insert(ORDER_AMOUNT, cents.to_string());
    params.insert(ORDER_TYPE, ORDER_TYPE_CAPTURE);
    params.insert(ORDER_ECI, ORDER_ECI_SSL);
    Ok(params)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::payment::request::CardDetails;

    fn config() -> ProcessorConfig {
        ProcessorConfig {
            username: "merchant-api".to_owned(),
            password: "s3cret".to_owned(),
            merchant_id: "TEST".to_owned(),
            mode: crate::config::ProcessorMode::Test,
        }
    }

    fn request() -> PaymentRequest {
        PaymentRequest {
            amount: Decimal::new(1230, 2),
            order_reference: "INV-2026-0042".to_owned(),
            customer_reference: "contact-77".to_owned(),
            card: CardDetails {
                number: "4111111111111111".to_owned(),
                expiry_month: 7,
                expiry_year: "2027".to_owned(),
                cvv: Some("321".to_owned()),
            },
        }
    }

    #[test]
    fn test_full_mapping() {
        let params = build_request_parameters(&config(), &request()).expect("request maps");

        assert_eq!(params.get(CUSTOMER_USERNAME), Some("merchant-api"));
        assert_eq!(params.get(CUSTOMER_PASSWORD), Some("s3cret"));
        assert_eq!(params.get(CUSTOMER_MERCHANT), Some("TEST"));
        assert_eq!(params.get(CUSTOMER_REFERENCE_NUMBER), Some("contact-77"));
        assert_eq!(params.get(CUSTOMER_ORDER_NUMBER), Some("INV-2026-0"));
        assert_eq!(params.get(CARD_PAN), Some("4111111111111111"));
        assert_eq!(params.get(CARD_CVN), Some("321"));
        assert_eq!(params.get(CARD_EXPIRY_YEAR), Some("27"));
        assert_eq!(params.get(CARD_EXPIRY_MONTH), Some("07"));
        assert_eq!(params.get(CARD_CURRENCY), Some("AUD"));
        assert_eq!(params.get(ORDER_AMOUNT), Some("1230"));
        assert_eq!(params.get(ORDER_TYPE), Some("capture"));
        assert_eq!(params.get(ORDER_ECI), Some("SSL"));
        assert_eq!(params.len(), 13);
    }

    #[test]
    fn test_cvn_absent_when_not_collected() {
        let mut request = request();
        request.card.cvv = None;
        let params = build_request_parameters(&config(), &request).expect("request maps");

        assert!(!params.contains_key(CARD_CVN));
        assert_eq!(params.len(), 12);
    }

    #[test]
    fn test_empty_cvn_is_still_sent() {
        let mut request = request();
        request.card.cvv = Some(String::new());
        let params = build_request_parameters(&config(), &request).expect("request maps");

        assert_eq!(params.get(CARD_CVN), Some(""));
    }

    #[test]
    fn test_short_order_number_is_untouched() {
        let mut request = request();
        request.order_reference = "INV-7".to_owned();
        let params = build_request_parameters(&config(), &request).expect("request maps");

        assert_eq!(params.get(CUSTOMER_ORDER_NUMBER), Some("INV-7"));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        assert_eq!(truncate_order_number("ordernummer-42"), "ordernumme");
        assert_eq!(truncate_order_number("bestell-nr-999"), "bestell-nr");
        assert_eq!(truncate_order_number("été-commande"), "été-comman");
    }

    #[test]
    fn test_negative_amount_fails_before_mapping() {
        let mut request = request();
        request.amount = Decimal::new(-100, 2);
        assert!(build_request_parameters(&config(), &request).is_err());
    }

    #[test]
    fn test_exact_limit_order_number_is_untouched() {
        assert_eq!(truncate_order_number("0123456789"), "0123456789");
        assert_eq!(truncate_order_number("012345678901234"), "0123456789");
    }

    #[test]
    fn test_debug_masks_sensitive_fields() {
        let params = build_request_parameters(&config(), &request()).expect("request maps");
        let debug = format!("{params:?}");

        assert!(debug.contains("****1111"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("4111111111111111"));
        assert!(!debug.contains("s3cret"));
        assert!(!debug.contains("321"));
    }
}
