//! # contipay - ContiPay payment gateway client
//!
//! Builds acquire and disburse payloads, signs disbursements with an
//! RSA-SHA256 checksum and dispatches them to the ContiPay API.
//!
//! ```no_run
//! use contipay::{ContipayClient, Customer, PayloadGenerator, TransactionDetails};
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> contipay::Result<()> {
//! let mut client = ContipayClient::new("token", "secret");
//! client.set_environment("DEV")?.set_payment_method("direct");
//!
//! let mut generator = PayloadGenerator::new(101, "https://merchant.example/webhook")
//!     .with_redirect_urls("https://merchant.example/ok", "https://merchant.example/cancel");
//! generator
//!     .set_up_customer(Customer::new("Jane", "Doe", "0771234567"))
//!     .set_up_transaction(TransactionDetails::new(Decimal::new(1000, 2)).with_currency("USD"));
//!
//! let response = client.process(&generator.redirect_payload(false, false)?).await?;
//! println!("{}", response.into_json_string()?);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod crypto;
pub mod error;
pub mod helpers;
pub mod payload;
pub mod reference;
pub mod types;

// Re-exports for convenience
pub use client::ContipayClient;
pub use crypto::{ChecksumSigner, RsaSha256Signer};
pub use error::{ContipayError, Result};
pub use payload::PayloadGenerator;
pub use reference::Reference;
pub use types::*;

/// Current version of the contipay library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(ACQUIRE_ENDPOINT, "acquire/payment");
        assert_eq!(DISBURSE_ENDPOINT, "disburse/payment");
        assert_eq!(DEFAULT_UAT_URL, "https://api-uat.contipay.net");
        assert_eq!(DEFAULT_LIVE_URL, "https://api.contipay.net");
    }
}
