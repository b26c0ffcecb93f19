//! Core types for the ContiPay gateway

use crate::{ContipayError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Default UAT (test) base URL
pub const DEFAULT_UAT_URL: &str = "https://api-uat.contipay.net";

/// Default live base URL
pub const DEFAULT_LIVE_URL: &str = "https://api.contipay.net";

/// Endpoint for acquiring payments
pub const ACQUIRE_ENDPOINT: &str = "acquire/payment";

/// Endpoint for disbursing payments
pub const DISBURSE_ENDPOINT: &str = "disburse/payment";

/// Header carrying the disbursement checksum
pub const CHECKSUM_HEADER: &str = "checksum";

/// Default request timeout handed to the HTTP client
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// API credentials used as the HTTP basic-auth pair
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    secret: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Gateway environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// UAT (test) environment
    #[default]
    Dev,
    /// Production environment
    Live,
}

impl Environment {
    /// Parse an environment mode. Only "LIVE" (any case) selects production;
    /// every other value falls back to UAT.
    pub fn from_mode(mode: &str) -> Self {
        if mode.eq_ignore_ascii_case("LIVE") {
            Environment::Live
        } else {
            Environment::Dev
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "DEV",
            Environment::Live => "LIVE",
        }
    }
}

/// HTTP verb used for both acquire and disburse calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Post,
    Put,
}

impl PaymentMethod {
    /// "direct" (any case) selects POST, anything else PUT
    pub fn from_flag(flag: &str) -> Self {
        if flag.eq_ignore_ascii_case("direct") {
            PaymentMethod::Post
        } else {
            PaymentMethod::Put
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Post => "POST",
            PaymentMethod::Put => "PUT",
        }
    }

    pub fn to_http_method(self) -> reqwest::Method {
        match self {
            PaymentMethod::Post => reqwest::Method::POST,
            PaymentMethod::Put => reqwest::Method::PUT,
        }
    }
}

/// Client configuration: credentials, both base URLs and transport timeout
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    /// UAT base URL
    pub dev_url: String,
    /// Live base URL
    pub live_url: String,
    /// Request timeout handed to the HTTP client
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration with the default gateway URLs
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(token, secret),
            dev_url: DEFAULT_UAT_URL.to_string(),
            live_url: DEFAULT_LIVE_URL.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }

    /// Replace both base URLs
    pub fn with_urls(mut self, dev_url: impl Into<String>, live_url: impl Into<String>) -> Self {
        self.dev_url = dev_url.into();
        self.live_url = live_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base URL bound to an environment
    pub fn base_url(&self, environment: Environment) -> &str {
        match environment {
            Environment::Dev => &self.dev_url,
            Environment::Live => &self.live_url,
        }
    }

    /// Create a configuration from environment variables
    ///
    /// `CONTIPAY_TOKEN` and `CONTIPAY_SECRET` are required; `CONTIPAY_DEV_URL`,
    /// `CONTIPAY_LIVE_URL` and `CONTIPAY_TIMEOUT_SECS` fall back to defaults.
    pub fn from_env() -> Result<Self> {
        use std::env;

        let token = env::var("CONTIPAY_TOKEN")
            .map_err(|_| ContipayError::configuration("CONTIPAY_TOKEN environment variable is required"))?;
        let secret = env::var("CONTIPAY_SECRET")
            .map_err(|_| ContipayError::configuration("CONTIPAY_SECRET environment variable is required"))?;

        let dev_url = env::var("CONTIPAY_DEV_URL").unwrap_or_else(|_| DEFAULT_UAT_URL.to_string());
        let live_url = env::var("CONTIPAY_LIVE_URL").unwrap_or_else(|_| DEFAULT_LIVE_URL.to_string());

        let timeout_secs = env::var("CONTIPAY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let config = Self::new(token, secret)
            .with_urls(dev_url, live_url)
            .with_timeout(Duration::from_secs(timeout_secs));
        config.validate()?;
        Ok(config)
    }

    /// Check that both base URLs parse
    pub fn validate(&self) -> Result<()> {
        validate_base_url(&self.dev_url)?;
        validate_base_url(&self.live_url)?;
        Ok(())
    }
}

pub(crate) fn validate_base_url(raw: &str) -> Result<()> {
    url::Url::parse(raw)
        .map(|_| ())
        .map_err(|e| ContipayError::configuration(format!("Invalid base URL '{}': {}", raw, e)))
}

/// Mobile-money or card provider the payment is routed through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    pub code: String,
}

impl Provider {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self::new("Ecocash", "EC")
    }
}

/// Payer details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub national_id: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub email: String,
    pub cell: String,
    pub country_code: String,
}

impl Customer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        cell: impl Into<String>,
    ) -> Self {
        Self {
            national_id: "-".to_string(),
            first_name: first_name.into(),
            middle_name: "-".to_string(),
            last_name: last_name.into(),
            email: String::new(),
            cell: cell.into(),
            country_code: "ZW".to_string(),
        }
    }

    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = country_code.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_middle_name(mut self, middle_name: impl Into<String>) -> Self {
        self.middle_name = middle_name.into();
        self
    }

    pub fn with_national_id(mut self, national_id: impl Into<String>) -> Self {
        self.national_id = national_id.into();
        self
    }

    /// Placeholder customer used by the one-shot payload variants
    pub(crate) fn anonymous(cell: impl Into<String>) -> Self {
        Self::new("-", "-", cell)
    }
}

/// Transaction essentials; the merchant id is added by the payload generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDetails {
    pub amount: Decimal,
    pub currency: String,
    /// Empty means "generate a 6-digit reference at emission"
    pub reference: String,
    pub description: String,
}

impl TransactionDetails {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            currency: "ZWG".to_string(),
            reference: String::new(),
            description: String::new(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Payer account (wallet number or card)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetails {
    pub account_number: String,
    pub account_name: String,
    pub account_expiry: String,
    pub cvv: String,
}

impl AccountDetails {
    pub fn new(account_number: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            account_name: "-".to_string(),
            account_expiry: "-".to_string(),
            cvv: String::new(),
        }
    }

    pub fn with_account_name(mut self, account_name: impl Into<String>) -> Self {
        self.account_name = account_name.into();
        self
    }

    pub fn with_account_expiry(mut self, account_expiry: impl Into<String>) -> Self {
        self.account_expiry = account_expiry.into();
        self
    }

    pub fn with_cvv(mut self, cvv: impl Into<String>) -> Self {
        self.cvv = cvv.into();
        self
    }
}

/// Arguments of the one-shot payload variants
///
/// `currency` left unset resolves to the variant's own default
/// (ZWG for direct, USD for redirect).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplePayment {
    pub amount: Decimal,
    pub account: String,
    pub currency: Option<String>,
    pub reference: Option<String>,
    pub description: String,
    pub cell: String,
}

impl SimplePayment {
    pub fn new(amount: Decimal, account: impl Into<String>) -> Self {
        Self {
            amount,
            account: account.into(),
            currency: None,
            reference: None,
            description: String::new(),
            cell: String::new(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cell(mut self, cell: impl Into<String>) -> Self {
        self.cell = cell.into();
        self
    }
}

/// Envelope returned in place of a transport failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub status: String,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "Error".to_string(),
            message: message.into(),
        }
    }
}

/// Outcome of a dispatched request
///
/// Every response the gateway produced is passed through as `Body`, whatever
/// its status code. `Failed` stands for a transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayResponse {
    Body { status: u16, body: String },
    Failed { message: String },
}

impl GatewayResponse {
    pub fn is_failed(&self) -> bool {
        matches!(self, GatewayResponse::Failed { .. })
    }

    /// HTTP status of a gateway response
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayResponse::Body { status, .. } => Some(*status),
            GatewayResponse::Failed { .. } => None,
        }
    }

    /// Raw body of a gateway response
    pub fn body(&self) -> Option<&str> {
        match self {
            GatewayResponse::Body { body, .. } => Some(body),
            GatewayResponse::Failed { .. } => None,
        }
    }

    pub fn envelope(&self) -> Option<ErrorEnvelope> {
        match self {
            GatewayResponse::Failed { message } => Some(ErrorEnvelope::new(message.clone())),
            GatewayResponse::Body { .. } => None,
        }
    }

    /// The raw body, or the JSON-encoded `{"status":"Error","message":..}` envelope
    pub fn into_json_string(self) -> Result<String> {
        match self {
            GatewayResponse::Body { body, .. } => Ok(body),
            GatewayResponse::Failed { message } => {
                Ok(serde_json::to_string(&ErrorEnvelope::new(message))?)
            }
        }
    }

    /// Parse the body (or the envelope) as JSON
    pub fn to_json(&self) -> Result<Value> {
        match self {
            GatewayResponse::Body { body, .. } => Ok(serde_json::from_str(body)?),
            GatewayResponse::Failed { message } => {
                Ok(serde_json::to_value(ErrorEnvelope::new(message.clone()))?)
            }
        }
    }
}
