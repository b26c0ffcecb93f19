//! Error types for the ContiPay client

use thiserror::Error;

/// Result type alias for ContiPay operations
pub type Result<T> = std::result::Result<T, ContipayError>;

/// Main error type for ContiPay operations
///
/// Transport failures never leave [`crate::ContipayClient::process`] or
/// [`crate::ContipayClient::disburse`] through this type; they are folded into
/// [`crate::GatewayResponse::Failed`] instead.
#[derive(Error, Debug)]
pub enum ContipayError {
    /// Operation invoked before the required setup
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Payload builder invoked with a missing required field
    #[error("Validation error: missing required field '{field}'")]
    Validation { field: String },

    /// Private key could not be loaded for checksum generation
    #[error("Key error: {message}")]
    Key { message: String },

    /// HTTP client error
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ContipayError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a validation error naming the missing field
    pub fn validation(field: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
        }
    }

    /// Create a key error
    pub fn key(message: impl Into<String>) -> Self {
        Self::Key {
            message: message.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_key(&self) -> bool {
        matches!(self, Self::Key { .. })
    }

    /// The missing field for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field } => Some(field),
            _ => None,
        }
    }
}
