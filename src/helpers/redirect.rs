//! Hosted-page (redirect) helpers

use crate::payload::PayloadGenerator;
use crate::types::{Customer, SimplePayment, TransactionDetails};
use crate::Result;
use serde_json::Value;

/// Redirect payload helper
#[derive(Debug, Clone)]
pub struct RedirectMethod {
    generator: PayloadGenerator,
}

impl RedirectMethod {
    pub fn new(
        merchant_code: u64,
        webhook_url: impl Into<String>,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        Self {
            generator: PayloadGenerator::new(merchant_code, webhook_url)
                .with_redirect_urls(success_url, cancel_url),
        }
    }

    pub fn set_up_customer(&mut self, customer: Customer) -> &mut Self {
        self.generator.set_up_customer(customer);
        self
    }

    pub fn set_up_transaction(&mut self, transaction: TransactionDetails) -> &mut Self {
        self.generator.set_up_transaction(transaction);
        self
    }

    /// Forwards to [`PayloadGenerator::redirect_payload`]
    pub fn prepare_payload(&self, is_coc: bool, is_cod: bool) -> Result<Value> {
        self.generator.redirect_payload(is_coc, is_cod)
    }

    pub fn generator(&self) -> &PayloadGenerator {
        &self.generator
    }
}

/// One-shot redirect payload helper
#[derive(Debug, Clone)]
pub struct SimpleRedirectMethod {
    generator: PayloadGenerator,
}

impl SimpleRedirectMethod {
    pub fn new(
        merchant_id: u64,
        webhook_url: impl Into<String>,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        Self {
            generator: PayloadGenerator::new(merchant_id, webhook_url)
                .with_redirect_urls(success_url, cancel_url),
        }
    }

    /// Forwards to [`PayloadGenerator::simple_redirect_payload`]
    pub fn prepare_payload(&self, payment: SimplePayment, is_cod: bool, is_coc: bool) -> Result<Value> {
        self.generator.simple_redirect_payload(payment, is_cod, is_coc)
    }

    pub fn generator(&self) -> &PayloadGenerator {
        &self.generator
    }
}
