//! HTTP implementation of the gateway client.
//!
//! The gateway's native protocol is plain: the parameter set serializes
//! to a form-encoded string, the string goes out as an HTTPS POST, and
//! the response body is another form-encoded string. This client speaks
//! that protocol with reqwest.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::Client;
use url::{Url, form_urlencoded};

use super::{ClientConfig, GatewayClient};
use crate::error::{GatewayError, Result};
use crate::payment::response::GatewayResponse;
use crate::wire::RequestParameters;

/// Default HTTP client with connection pooling enabled.
///
/// Using a singleton avoids recreating the client per instance,
/// preserving connection pooling benefits across all default clients.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create default HTTP client")
});

/// Form-encoded HTTPS client for the gateway's card API.
///
/// # Examples
///
/// ```rust,no_run
/// use payway_bridge::client::{ClientConfig, GatewayClient, HttpGatewayClient};
/// use payway_bridge::wire::RequestParameters;
///
/// # async fn example() -> payway_bridge::error::Result<()> {
/// let client = HttpGatewayClient::new()?;
///
/// let mut params = RequestParameters::new();
/// params.insert("order.type", "capture");
///
/// let response = client.execute(&params).await?;
/// println!("fields: {}", response.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpGatewayClient {
    client: Client,
    api_url: Url,
}

impl HttpGatewayClient {
    /// Creates a client against the production endpoint with default
    /// timeouts, on the shared pooled HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidEndpoint`] if the built-in endpoint
    /// constant fails to parse, which would be a packaging defect.
    pub fn new() -> Result<Self> {
        let api_url = Url::parse(super::DEFAULT_API_URL)
            .map_err(|e| GatewayError::InvalidEndpoint(format!("invalid api_url: {e}")))?;
        Ok(Self { client: DEFAULT_HTTP_CLIENT.clone(), api_url })
    }

    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration fails validation, the CA
    /// bundle cannot be read, or HTTP client construction fails.
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let api_url = Url::parse(&config.api_url)
            .map_err(|e| GatewayError::InvalidEndpoint(format!("invalid api_url: {e}")))?;

        let mut builder =
            Client::builder().timeout(config.timeout()).connect_timeout(config.connect_timeout());

        if let Some(ca_file) = &config.ca_file {
            let pem = std::fs::read(ca_file).map_err(|e| {
                GatewayError::Transport(format!(
                    "cannot read CA bundle {}: {e}",
                    ca_file.display()
                ))
            })?;
            for certificate in reqwest::Certificate::from_pem_bundle(&pem)? {
                builder = builder.add_root_certificate(certificate);
            }
        }

        let client = builder.build()?;
        Ok(Self { client, api_url })
    }

    /// The endpoint this client posts to.
    #[must_use]
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }
}

impl GatewayClient for HttpGatewayClient {
    fn format_request_parameters(&self, params: &RequestParameters) -> Result<String> {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in params.iter() {
            serializer.append_pair(key, value);
        }
        Ok(serializer.finish())
    }

    async fn process_transaction<'a>(&'a self, request: &'a str) -> Result<String> {
        let response = self
            .client
            .post(self.api_url.clone())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(request.to_owned())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Transport(format!("gateway returned status {status}")));
        }

        Ok(response.text().await?)
    }

    fn parse_response_parameters(&self, response: &str) -> Result<GatewayResponse> {
        let trimmed = response.trim();
        if trimmed.is_empty() {
            return Err(GatewayError::Response("empty gateway response".to_owned()));
        }
        let params = form_urlencoded::parse(trimmed.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Ok(GatewayResponse::from_params(params))
    }
}
