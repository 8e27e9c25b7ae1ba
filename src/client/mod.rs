//! Client seam for the gateway's card API.
//!
//! The gateway's native flow is three steps: serialize the parameter set
//! into wire text, send that text over TLS, parse the reply text back into
//! parameters. [`GatewayClient`] is that seam as a trait, so the bridge
//! never cares whether the other side is the bundled HTTP client, a
//! vendor library wrapper, or a test stub.
//!
//! # Examples
//!
//! ```rust,no_run
//! use payway_bridge::client::{ClientConfig, GatewayClient, HttpGatewayClient};
//!
//! # async fn example() -> payway_bridge::error::Result<()> {
//! let config = ClientConfig::default();
//! let client = HttpGatewayClient::with_config(&config)?;
//!
//! let mut params = payway_bridge::wire::RequestParameters::new();
//! params.insert("order.type", "capture");
//!
//! let response = client.execute(&params).await?;
//! println!("summary code: {}", response.summary_code()?);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{GatewayError, Result};
use crate::payment::response::GatewayResponse;
use crate::security::redact_sensitive;
use crate::wire::RequestParameters;

pub mod http;

pub use http::HttpGatewayClient;

/// Production endpoint of the gateway's card API.
pub const DEFAULT_API_URL: &str = "https://ccapi.client.qvalent.com/payway/ccapi";

/// Client configuration from TOML.
///
/// Every field has a default, so an empty `[client]` table gives a client
/// pointed at the production endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Gateway endpoint. HTTPS only.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Directory vendor-library clients write their transaction logs to.
    #[serde(default = "default_log_directory")]
    pub log_directory: String,

    /// Extra CA bundle (PEM) to trust beyond the system roots.
    #[serde(default)]
    pub ca_file: Option<PathBuf>,

    /// Client certificate for vendor-library clients that do mutual TLS.
    /// The bundled HTTP client authenticates through the credential fields
    /// the request itself carries and ignores this.
    #[serde(default)]
    pub certificate_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            log_directory: default_log_directory(),
            ca_file: None,
            certificate_file: None,
        }
    }
}

impl ClientConfig {
    /// Validates configuration values are within acceptable bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidEndpoint`] when `api_url` does not
    /// parse, is not HTTPS, or points at a loopback host, and
    /// [`GatewayError::Transport`] when a timeout is outside its valid
    /// range:
    /// - `timeout_secs`: must be 1-300 seconds
    /// - `connect_timeout_secs`: must be 1-60 seconds
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_url)
            .map_err(|e| GatewayError::InvalidEndpoint(format!("invalid api_url: {e}")))?;
        if url.scheme() != "https" {
            return Err(GatewayError::InvalidEndpoint(
                "only HTTPS gateway endpoints are allowed".to_owned(),
            ));
        }
        if let Some(host) = url.host_str()
            && (host == "localhost" || host == "127.0.0.1" || host == "::1" || host == "[::1]")
        {
            return Err(GatewayError::InvalidEndpoint(
                "loopback gateway endpoints are not allowed".to_owned(),
            ));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(GatewayError::Transport(
                "timeout_secs must be between 1 and 300".to_owned(),
            ));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 60 {
            return Err(GatewayError::Transport(
                "connect_timeout_secs must be between 1 and 60".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns timeout as Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns connect timeout as Duration.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Renders the settings string vendor-library clients take at startup.
    ///
    /// The format is ampersand-joined `key=value` pairs. Optional paths
    /// are appended only when set and non-empty.
    #[must_use]
    pub fn init_string(&self) -> String {
        let mut init = format!("logDirectory={}", self.log_directory);
        if let Some(ca_file) = &self.ca_file
            && !ca_file.as_os_str().is_empty()
        {
            init.push_str("&caFile=");
            init.push_str(&ca_file.to_string_lossy());
        }
        if let Some(certificate_file) = &self.certificate_file
            && !certificate_file.as_os_str().is_empty()
        {
            init.push_str("&certificateFile=");
            init.push_str(&certificate_file.to_string_lossy());
        }
        init
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_directory() -> String {
    "logs".to_owned()
}

/// One gateway transaction, as three operations plus a driver.
///
/// Implementations own the protocol mechanics; the bridge only ever calls
/// [`execute`](GatewayClient::execute). Implement the three steps and the
/// driver comes for free, together with redacted wire-level tracing.
pub trait GatewayClient: Send + Sync {
    /// Serializes a parameter set into the gateway's wire text.
    ///
    /// # Errors
    ///
    /// Returns an error when the parameter set cannot be represented in
    /// the wire format.
    fn format_request_parameters(&self, params: &RequestParameters) -> Result<String>;

    /// Sends one formatted request and returns the raw response text.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] or [`GatewayError::Http`] when
    /// the gateway cannot be reached or answers outside the protocol.
    fn process_transaction<'a>(
        &'a self,
        request: &'a str,
    ) -> impl Future<Output = Result<String>> + Send + 'a;

    /// Parses raw response text into response parameters.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Response`] when the text is not a response
    /// at all.
    fn parse_response_parameters(&self, response: &str) -> Result<GatewayResponse>;

    /// Formats, sends, and parses one transaction.
    ///
    /// # Errors
    ///
    /// Propagates whatever the three steps return, unchanged.
    fn execute<'a>(
        &'a self,
        params: &'a RequestParameters,
    ) -> impl Future<Output = Result<GatewayResponse>> + Send + 'a {
        async move {
            let request = self.format_request_parameters(params)?;
            tracing::trace!(request = %redact_sensitive(&request), "formatted gateway request");
            let response = self.process_transaction(&request).await?;
            tracing::trace!(response = %redact_sensitive(&response), "raw gateway response");
            self.parse_response_parameters(&response)
        }
    }
}
