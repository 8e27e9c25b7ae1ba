//! PayWay Bridge: Credit Card Authorization for Host Applications
//!
//! A Rust library that connects host applications such as CRMs, donation
//! platforms, and storefront backends to Westpac's PayWay credit card
//! gateway, turning a host payment request into an authorized transaction
//! over the Qvalent CCAPI.
//!
//! # What is PayWay Bridge?
//!
//! This library answers one question for its host: given a configured
//! merchant profile and a card payment, did PayWay approve it? Along the way
//! it provides:
//!
//! - **Exact amounts**: dollars-and-cents arithmetic in [`rust_decimal::Decimal`],
//!   converted to integer cents without ever passing through a float
//! - **Deterministic wire format**: every authorization carries the same
//!   fixed CCAPI field set, so requests are reproducible and auditable
//! - **Declines are data**: a declined card comes back as a
//!   [`PaymentResult::Declined`] value carrying the gateway's own reason
//!   text, not as an error
//! - **Security by default**: redacted logging, zeroized card details,
//!   HTTPS-only endpoints
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │       Host       │  CRM or storefront with its own billing form
//! └────────┬─────────┘
//!          │ PaymentRequest
//!          │
//! ┌────────▼─────────────────────────────────────┐
//! │          PayWay Bridge (this crate)          │
//! │  ┌──────────────┐      ┌─────────────────┐   │
//! │  │   Gateway    │──────│  CCAPI Client   │   │
//! │  │  (validate,  │      │  (wire format,  │   │
//! │  │   audit)     │      │   HTTPS POST)   │   │
//! │  └──────────────┘      └─────────────────┘   │
//! └────────┬─────────────────────────────────────┘
//!          │ HTTPS (form-encoded key=value pairs)
//!          │
//! ┌────────▼─────────┐
//! │  PayWay Gateway  │  Westpac Qvalent card processing service
//! └──────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## 1. Authorize a Payment
//!
//! ```rust,no_run
//! use payway_bridge::{
//!     client::HttpGatewayClient,
//!     config::{ProcessorConfig, ProcessorMode},
//!     gateway::PaywayGateway,
//!     payment::{CardDetails, PaymentRequest},
//! };
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> payway_bridge::error::Result<()> {
//! // Credentials come from the host's processor settings screen
//! let config = ProcessorConfig {
//!     username: "merchant-api".to_owned(),
//!     password: "secret".to_owned(),
//!     merchant_id: "TEST".to_owned(),
//!     mode: ProcessorMode::Test,
//! };
//!
//! let gateway = PaywayGateway::new(config, HttpGatewayClient::new()?);
//!
//! let request = PaymentRequest {
//!     amount: Decimal::new(4250, 2), // 42.50 AUD
//!     order_reference: "INV-2026-0042".to_owned(),
//!     customer_reference: "contact-7".to_owned(),
//!     card: CardDetails {
//!         number: "4111111111111111".to_owned(),
//!         expiry_month: 12,
//!         expiry_year: "2027".to_owned(),
//!         cvv: Some("321".to_owned()),
//!     },
//! };
//!
//! let result = gateway.authorize(&request).await?;
//! if result.is_approved() {
//!     println!("receipt: {:?}", result.response().receipt_number());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## 2. Validate Processor Settings
//!
//! ```rust
//! use payway_bridge::config::{ProcessorConfig, ProcessorMode};
//!
//! let config = ProcessorConfig {
//!     username: "merchant-api".to_owned(),
//!     password: String::new(),
//!     merchant_id: "TEST".to_owned(),
//!     mode: ProcessorMode::Test,
//! };
//!
//! // Reported in settings order: username, password, merchant ID
//! for error in config.validate() {
//!     eprintln!("{error}");
//! }
//! ```
//!
//! ## 3. Share Gateway Instances
//!
//! ```rust,no_run
//! use payway_bridge::{
//!     client::HttpGatewayClient,
//!     config::{ProcessorConfig, ProcessorMode},
//!     gateway::PaywayGateway,
//!     registry::{GatewayRegistry, PROCESSOR_NAME},
//! };
//!
//! # fn example() -> payway_bridge::error::Result<()> {
//! # let config = ProcessorConfig {
//! #     username: "merchant-api".to_owned(),
//! #     password: "secret".to_owned(),
//! #     merchant_id: "TEST".to_owned(),
//! #     mode: ProcessorMode::Test,
//! # };
//! let registry = GatewayRegistry::new();
//! let client = HttpGatewayClient::new()?;
//!
//! // The same name and mode always resolve to the same instance
//! let gateway = registry.get_or_create(PROCESSOR_NAME, ProcessorMode::Test, || {
//!     PaywayGateway::new(config, client)
//! });
//! println!("mode: {}", gateway.config().mode.as_str());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`gateway`]: The authorization flow (configuration checks, zero-amount
//!   handling, audit events)
//! - [`client`]: Gateway transport (CCAPI request formatting, HTTPS
//!   submission, response parsing)
//! - [`config`]: Processor credentials and live/test mode
//! - [`payment`]: Payment requests, amount conversion, gateway responses
//! - [`wire`]: CCAPI field names and the request parameter mapping
//! - [`registry`]: Processor metadata and shared gateway instances
//! - [`security`]: Audit logging and log redaction
//! - [`error`]: Error types for configuration, validation, and transport
//!   failures
//!
//! # Security Considerations
//!
//! ## Credential Handling
//!
//! - **Passwords never reach logs**: `Debug` implementations redact them and
//!   [`security::redact_sensitive`] scrubs wire text before tracing
//! - **Card details are zeroized**: PANs and CVVs are wiped from memory when
//!   a [`payment::CardDetails`] is dropped
//! - **Store credentials host-side**: This library holds them only for the
//!   lifetime of a gateway instance
//!
//! ## Input Validation
//!
//! - **Credentials checked first**: A misconfigured processor fails before
//!   any network traffic
//! - **Amounts stay exact**: Conversion to cents uses decimal arithmetic and
//!   rejects negatives and out-of-range values
//! - **Endpoints must be HTTPS**: Plain-HTTP gateway URLs are refused
//!
//! ## Network Security
//!
//! - **Timeouts by default**: 30-second request and 10-second connect limits
//! - **Optional CA pinning**: A custom certificate bundle can be supplied for
//!   the gateway's TLS chain
//!
//! # Error Handling
//!
//! All operations return [`Result<T, GatewayError>`](error::Result). A
//! declined card is not an error; it is an `Ok` carrying
//! [`PaymentResult::Declined`]:
//!
//! ```rust,no_run
//! use payway_bridge::{GatewayError, client::HttpGatewayClient, gateway::PaywayGateway};
//! # use payway_bridge::config::{ProcessorConfig, ProcessorMode};
//! # use payway_bridge::payment::{CardDetails, PaymentRequest};
//! # use rust_decimal::Decimal;
//!
//! # async fn example() -> payway_bridge::error::Result<()> {
//! # let config = ProcessorConfig {
//! #     username: "merchant-api".to_owned(),
//! #     password: "secret".to_owned(),
//! #     merchant_id: "TEST".to_owned(),
//! #     mode: ProcessorMode::Test,
//! # };
//! # let request = PaymentRequest {
//! #     amount: Decimal::new(4250, 2),
//! #     order_reference: "INV-2026-0042".to_owned(),
//! #     customer_reference: "contact-7".to_owned(),
//! #     card: CardDetails {
//! #         number: "4111111111111111".to_owned(),
//! #         expiry_month: 12,
//! #         expiry_year: "2027".to_owned(),
//! #         cvv: None,
//! #     },
//! # };
//! let gateway = PaywayGateway::new(config, HttpGatewayClient::new()?);
//!
//! match gateway.authorize(&request).await {
//!     Ok(result) if result.is_approved() => {
//!         println!("receipt: {:?}", result.response().receipt_number());
//!     }
//!     Ok(result) => {
//!         // Declines are final; show the gateway's reason to the card holder
//!         println!("declined: {:?}", result.reason());
//!     }
//!     Err(GatewayError::Config(e)) => {
//!         eprintln!("fix the processor settings: {e}");
//!     }
//!     Err(GatewayError::InvalidAmount(msg)) => {
//!         eprintln!("unprocessable amount: {msg}");
//!     }
//!     Err(GatewayError::Http(e)) => {
//!         eprintln!("could not reach the gateway: {e}");
//!     }
//!     Err(e) => eprintln!("gateway failure: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest"
)]

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod payment;
pub mod registry;
pub mod security;
pub mod wire;

pub use error::{GatewayError, Result};
pub use gateway::PaywayGateway;
pub use payment::PaymentResult;
