//! Gateway adapter driving card authorizations.
//!
//! [`PaywayGateway`] glues the pieces together: it validates processor
//! settings, converts and maps one payment request onto the wire, drives
//! the client through a gateway round trip, and turns the summary code
//! into a [`PaymentResult`]. Declines come back as values; only
//! configuration, transport, and protocol problems are errors.

use std::fmt;
use std::time::Instant;

use tracing::instrument;
use uuid::Uuid;

use crate::client::GatewayClient;
use crate::config::ProcessorConfig;
use crate::error::{GatewayError, Result};
use crate::payment::amount::to_minor_units;
use crate::payment::request::PaymentRequest;
use crate::payment::response::{GatewayResponse, PaymentResult};
use crate::registry::PROCESSOR_NAME;
use crate::security::audit::{AuditEvent, AuditEventType, audit_log};
use crate::security::redact_customer_reference;
use crate::wire;

/// One configured payment processor bound to a gateway client.
///
/// The client is generic so production code can use
/// [`HttpGatewayClient`](crate::client::HttpGatewayClient), hosts can wrap
/// a vendor library, and tests can drop in a stub.
pub struct PaywayGateway<C> {
    config: ProcessorConfig,
    client: C,
}

impl<C> PaywayGateway<C> {
    /// Binds processor settings to a gateway client.
    pub fn new(config: ProcessorConfig, client: C) -> Self {
        Self { config, client }
    }

    /// The processor settings this gateway runs with.
    #[must_use]
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// The underlying gateway client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Checks the processor settings, reporting the first missing field
    /// in field order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] naming the first missing setting.
    pub fn check_config(&self) -> Result<()> {
        match self.config.validate().into_iter().next() {
            None => Ok(()),
            Some(error) => Err(GatewayError::Config(error)),
        }
    }
}

impl<C: GatewayClient> PaywayGateway<C> {
    /// Authorizes one payment.
    ///
    /// The flow is fixed: validate settings, short-circuit zero amounts,
    /// map the request onto the wire, run one gateway round trip, and
    /// read the summary code. Summary code `0` is an approval; anything
    /// else is a decline carrying the gateway's own text. There are no
    /// retries; a declined or failed payment is final until the host
    /// submits a new request.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Config`] when a processor setting is missing
    /// - [`GatewayError::InvalidAmount`] when the amount is negative or
    ///   out of range
    /// - [`GatewayError::Transport`] or [`GatewayError::Http`] when the
    ///   gateway cannot be reached
    /// - [`GatewayError::Response`] when the reply has no readable
    ///   summary code
    #[instrument(
        skip(self, request),
        fields(
            processor = PROCESSOR_NAME,
            order_reference = %request.order_reference,
            mode = self.config.mode.as_str()
        )
    )]
    pub async fn authorize(&self, request: &PaymentRequest) -> Result<PaymentResult> {
        let request_id = Uuid::new_v4();
        let started = Instant::now();

        if let Err(error) = self.check_config() {
            audit_log(
                &AuditEvent::new(AuditEventType::ConfigurationRejected, PROCESSOR_NAME, request_id)
                    .with_mode(self.config.mode.as_str())
                    .with_reason(error.to_string()),
            );
            return Err(error);
        }

        let order_reference = wire::truncate_order_number(&request.order_reference);

        // Nothing to capture; approve without a gateway round trip.
        if request.amount.is_zero() {
            tracing::debug!("zero amount, skipping gateway round trip");
            audit_log(
                &AuditEvent::new(AuditEventType::AuthorizationSkipped, PROCESSOR_NAME, request_id)
                    .with_order_reference(order_reference)
                    .with_mode(self.config.mode.as_str())
                    .with_amount_cents(0),
            );
            return Ok(PaymentResult::Approved(GatewayResponse::empty()));
        }

        let cents = to_minor_units(request.amount)?;
        let params = wire::build_request_parameters(&self.config, request)?;

        audit_log(
            &AuditEvent::new(AuditEventType::AuthorizationAttempted, PROCESSOR_NAME, request_id)
                .with_order_reference(order_reference.clone())
                .with_customer_reference(redact_customer_reference(&request.customer_reference))
                .with_merchant_id(self.config.merchant_id.clone())
                .with_mode(self.config.mode.as_str())
                .with_amount_cents(cents),
        );

        let response = match self.client.execute(&params).await {
            Ok(response) => response,
            Err(error) => {
                audit_log(
                    &AuditEvent::new(AuditEventType::AuthorizationFailed, PROCESSOR_NAME, request_id)
                        .with_order_reference(order_reference)
                        .with_reason(error.to_string())
                        .with_duration(started.elapsed()),
                );
                return Err(error);
            }
        };

        let summary_code = match response.summary_code() {
            Ok(code) => code,
            Err(error) => {
                audit_log(
                    &AuditEvent::new(AuditEventType::AuthorizationFailed, PROCESSOR_NAME, request_id)
                        .with_order_reference(order_reference)
                        .with_reason(error.to_string())
                        .with_duration(started.elapsed()),
                );
                return Err(error);
            }
        };

        if summary_code == 0 {
            tracing::info!(summary_code, "authorization approved");
            audit_log(
                &AuditEvent::new(AuditEventType::AuthorizationApproved, PROCESSOR_NAME, request_id)
                    .with_order_reference(order_reference)
                    .with_summary_code(summary_code)
                    .with_amount_cents(cents)
                    .with_duration(started.elapsed()),
            );
            return Ok(PaymentResult::Approved(response));
        }

        let reason = response.text().map_or_else(
            || format!("gateway declined with summary code {summary_code}"),
            ToOwned::to_owned,
        );
        tracing::warn!(summary_code, reason = %reason, "authorization declined");
        audit_log(
            &AuditEvent::new(AuditEventType::AuthorizationDeclined, PROCESSOR_NAME, request_id)
                .with_order_reference(order_reference)
                .with_summary_code(summary_code)
                .with_reason(reason.clone())
                .with_duration(started.elapsed()),
        );
        Ok(PaymentResult::Declined { reason, response })
    }
}

impl<C> fmt::Debug for PaywayGateway<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaywayGateway").field("config", &self.config).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rust_decimal::Decimal;
    use url::form_urlencoded;

    use super::*;
    use crate::config::ProcessorMode;
    use crate::payment::request::CardDetails;
    use crate::wire::RequestParameters;

    struct StubClient {
        response: String,
        calls: AtomicUsize,
    }

    impl StubClient {
        fn replying(response: &str) -> Self {
            Self { response: response.to_owned(), calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl GatewayClient for StubClient {
        fn format_request_parameters(&self, params: &RequestParameters) -> Result<String> {
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            for (key, value) in params.iter() {
                serializer.append_pair(key, value);
            }
            Ok(serializer.finish())
        }

        async fn process_transaction<'a>(&'a self, _request: &'a str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }

        fn parse_response_parameters(&self, response: &str) -> Result<GatewayResponse> {
            let params = form_urlencoded::parse(response.as_bytes())
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect();
            Ok(GatewayResponse::from_params(params))
        }
    }

    fn config() -> ProcessorConfig {
        ProcessorConfig {
            username: "merchant-api".to_owned(),
            password: "s3cret".to_owned(),
            merchant_id: "TEST".to_owned(),
            mode: ProcessorMode::Test,
        }
    }

    fn request(amount: Decimal) -> PaymentRequest {
        PaymentRequest {
            amount,
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

    #[tokio::test]
    async fn test_approved_payment_carries_response() {
        let gateway = PaywayGateway::new(
            config(),
            StubClient::replying("response.summaryCode=0&response.text=Approved&response.receiptNo=772882"),
        );

        let result = gateway.authorize(&request(Decimal::new(1230, 2))).await.unwrap();

        assert!(result.is_approved());
        assert_eq!(result.response().get("response.receiptNo"), Some("772882"));
        assert_eq!(gateway.client().calls(), 1);
    }

    #[tokio::test]
    async fn test_declined_payment_is_a_value() {
        let gateway = PaywayGateway::new(
            config(),
            StubClient::replying("response.summaryCode=1&response.text=Declined"),
        );

        let result = gateway.authorize(&request(Decimal::new(1230, 2))).await.unwrap();

        assert!(!result.is_approved());
        assert_eq!(result.reason(), Some("Declined"));
    }

    #[tokio::test]
    async fn test_decline_without_text_names_summary_code() {
        let gateway =
            PaywayGateway::new(config(), StubClient::replying("response.summaryCode=5"));

        let result = gateway.authorize(&request(Decimal::new(1230, 2))).await.unwrap();

        assert_eq!(result.reason(), Some("gateway declined with summary code 5"));
    }

    #[tokio::test]
    async fn test_zero_amount_skips_gateway() {
        let gateway = PaywayGateway::new(
            config(),
            StubClient::replying("response.summaryCode=1&response.text=Declined"),
        );

        let result = gateway.authorize(&request(Decimal::ZERO)).await.unwrap();

        assert!(result.is_approved());
        assert!(result.response().is_empty());
        assert_eq!(gateway.client().calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_settings_fail_before_gateway() {
        let mut config = config();
        config.password = "   ".to_owned();
        let gateway = PaywayGateway::new(config, StubClient::replying("response.summaryCode=0"));

        let error = gateway.authorize(&request(Decimal::new(1230, 2))).await.unwrap_err();

        assert!(
            error
                .to_string()
                .contains("The \"Password\" is not set in the PayWay Payment Processor settings.")
        );
        assert_eq!(gateway.client().calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_summary_code_is_an_error() {
        let gateway =
            PaywayGateway::new(config(), StubClient::replying("response.text=Approved"));

        let error = gateway.authorize(&request(Decimal::new(1230, 2))).await.unwrap_err();

        assert!(matches!(error, GatewayError::Response(_)));
    }

    #[tokio::test]
    async fn test_negative_amount_is_rejected() {
        let gateway =
            PaywayGateway::new(config(), StubClient::replying("response.summaryCode=0"));

        let error = gateway.authorize(&request(Decimal::new(-500, 2))).await.unwrap_err();

        assert!(matches!(error, GatewayError::InvalidAmount(_)));
        assert_eq!(gateway.client().calls(), 0);
    }

    #[test]
    fn test_check_config_reports_first_missing_field() {
        let gateway = PaywayGateway::new(
            ProcessorConfig {
                username: String::new(),
                password: String::new(),
                merchant_id: "TEST".to_owned(),
                mode: ProcessorMode::Test,
            },
            StubClient::replying(""),
        );

        let error = gateway.check_config().unwrap_err();
        assert!(error.to_string().contains("Username"));
    }

    #[test]
    fn test_debug_does_not_leak_password() {
        let gateway = PaywayGateway::new(config(), StubClient::replying(""));
        let debug = format!("{gateway:?}");
        assert!(debug.contains("PaywayGateway"));
        assert!(!debug.contains("s3cret"));
    }
}
