//! HTTP client for the ContiPay acquire and disburse endpoints

use crate::crypto::{checksum, ChecksumSigner, RsaSha256Signer};
use crate::types::*;
use crate::{ContipayError, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// HTTP transport bound to one base URL
#[derive(Debug, Clone)]
struct Transport {
    client: Client,
    base_url: String,
}

impl Transport {
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

/// Client owning the gateway credentials, environment binding and signer
///
/// A client is `Unconfigured` until [`ContipayClient::set_environment`] binds
/// it to a base URL; every later call rebinds it. Requests on one instance
/// are issued one at a time; use one client per credential/environment pair
/// when requests must run concurrently.
#[derive(Clone)]
pub struct ContipayClient {
    config: ClientConfig,
    environment: Option<Environment>,
    transport: Option<Transport>,
    payment_method: PaymentMethod,
    signer: Arc<dyn ChecksumSigner>,
    checksum: Option<String>,
}

impl std::fmt::Debug for ContipayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContipayClient")
            .field("config", &self.config)
            .field("environment", &self.environment)
            .field("base_url", &self.base_url())
            .field("payment_method", &self.payment_method)
            .field("signer", &"<signer>")
            .finish()
    }
}

impl ContipayClient {
    /// Create a client from API credentials. No network I/O happens here.
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::from_parts(ClientConfig::new(token, secret))
    }

    /// Create a client from a full configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    /// Create a client from `CONTIPAY_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    fn from_parts(config: ClientConfig) -> Self {
        Self {
            config,
            environment: None,
            transport: None,
            payment_method: PaymentMethod::default(),
            signer: Arc::new(RsaSha256Signer::new()),
            checksum: None,
        }
    }

    /// Replace the checksum signer
    pub fn with_signer(mut self, signer: impl ChecksumSigner + 'static) -> Self {
        self.signer = Arc::new(signer);
        self
    }

    /// Bind to an environment by mode: "LIVE" (any case) selects the live
    /// URL, anything else the UAT URL.
    pub fn set_environment(&mut self, mode: &str) -> Result<&mut Self> {
        self.bind(Environment::from_mode(mode))
    }

    /// Bind (or rebind) the transport to an environment's base URL
    pub fn bind(&mut self, environment: Environment) -> Result<&mut Self> {
        let base_url = self.config.base_url(environment).to_string();

        let mut client_builder = Client::builder();
        if let Some(timeout) = self.config.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        let client = client_builder
            .build()
            .map_err(|e| ContipayError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        debug!(environment = environment.as_str(), %base_url, "binding transport");

        self.environment = Some(environment);
        self.transport = Some(Transport { client, base_url });
        Ok(self)
    }

    /// Replace both base URLs. The active binding is kept until the next
    /// [`ContipayClient::set_environment`].
    pub fn override_urls(
        &mut self,
        dev_url: impl Into<String>,
        live_url: impl Into<String>,
    ) -> Result<&mut Self> {
        let dev_url = dev_url.into();
        let live_url = live_url.into();
        validate_base_url(&dev_url)?;
        validate_base_url(&live_url)?;

        self.config.dev_url = dev_url;
        self.config.live_url = live_url;
        Ok(self)
    }

    /// "direct" (any case) sends with POST, anything else with PUT
    pub fn set_payment_method(&mut self, flag: &str) -> &mut Self {
        self.payment_method = PaymentMethod::from_flag(flag);
        self
    }

    /// HTTP method used by [`ContipayClient::process`] and [`ContipayClient::disburse`]
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Environment of the active binding, `None` until one is set
    pub fn environment(&self) -> Option<Environment> {
        self.environment
    }

    /// Base URL of the active binding
    pub fn base_url(&self) -> Option<&str> {
        self.transport.as_ref().map(|t| t.base_url.as_str())
    }

    /// Credentials, base URLs and timeout
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Checksum computed by the last [`ContipayClient::compute_checksum`]
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    /// Send a payload to the acquire endpoint.
    ///
    /// Transport failures come back as [`GatewayResponse::Failed`]; gateway
    /// responses of any status are passed through as [`GatewayResponse::Body`].
    /// Fails with a configuration error when no environment is bound.
    pub async fn process(&self, payload: &Value) -> Result<GatewayResponse> {
        let transport = self.transport()?;
        Ok(self.send(transport, ACQUIRE_ENDPOINT, payload, None).await)
    }

    /// Sign a payload and send it to the disburse endpoint with the
    /// `checksum` header.
    ///
    /// A key that cannot be loaded fails with a key error before anything is
    /// sent; it is never folded into the transport envelope.
    pub async fn disburse(&mut self, payload: &Value, private_key: &str) -> Result<GatewayResponse> {
        let checksum = self.compute_checksum(payload, private_key)?.to_string();
        let transport = self.transport()?;
        Ok(self
            .send(transport, DISBURSE_ENDPOINT, payload, Some(&checksum))
            .await)
    }

    /// Compute the checksum for a payload without any network I/O and keep it
    /// for the next disbursement.
    ///
    /// Missing payload fields are signed as empty strings.
    pub fn compute_checksum(&mut self, payload: &Value, private_key: &str) -> Result<&str> {
        let data = checksum::input(self.config.credentials.token(), payload);
        debug!(
            reference = %checksum::render_scalar(payload.pointer("/transaction/reference")),
            "computing checksum"
        );

        let value = self.signer.sign(&data, private_key)?;
        Ok(self.checksum.insert(value).as_str())
    }

    fn transport(&self) -> Result<&Transport> {
        self.transport.as_ref().ok_or_else(|| {
            ContipayError::configuration("Environment not set: call set_environment before sending requests")
        })
    }

    async fn send(
        &self,
        transport: &Transport,
        endpoint: &str,
        payload: &Value,
        checksum: Option<&str>,
    ) -> GatewayResponse {
        let url = transport.endpoint_url(endpoint);
        let credentials = &self.config.credentials;

        info!(
            method = self.payment_method.as_str(),
            %url,
            "dispatching gateway request"
        );

        let mut request = transport
            .client
            .request(self.payment_method.to_http_method(), &url)
            .basic_auth(credentials.token(), Some(credentials.secret()))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(payload);

        if let Some(checksum) = checksum {
            request = request.header(CHECKSUM_HEADER, checksum);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return transport_failure(&e),
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => {
                debug!(status, "gateway responded");
                GatewayResponse::Body { status, body }
            }
            Err(e) => transport_failure(&e),
        }
    }
}

fn transport_failure(error: &reqwest::Error) -> GatewayResponse {
    let message = error.to_string();
    warn!(%message, "gateway request failed");
    GatewayResponse::Failed { message }
}
