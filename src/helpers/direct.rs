//! Direct-flow helpers

use crate::payload::PayloadGenerator;
use crate::types::{AccountDetails, Customer, SimplePayment, TransactionDetails};
use crate::Result;
use serde_json::Value;

/// Direct and disbursement payload helper
#[derive(Debug, Clone)]
pub struct DirectMethod {
    generator: PayloadGenerator,
}

impl DirectMethod {
    pub fn new(merchant_code: u64, webhook_url: impl Into<String>) -> Self {
        Self {
            generator: PayloadGenerator::new(merchant_code, webhook_url),
        }
    }

    pub fn set_up_providers(&mut self, name: impl Into<String>, code: impl Into<String>) -> &mut Self {
        self.generator.set_up_providers(name, code);
        self
    }

    pub fn set_up_customer(&mut self, customer: Customer) -> &mut Self {
        self.generator.set_up_customer(customer);
        self
    }

    pub fn set_up_transaction(&mut self, transaction: TransactionDetails) -> &mut Self {
        self.generator.set_up_transaction(transaction);
        self
    }

    pub fn set_up_account_details(&mut self, account: AccountDetails) -> &mut Self {
        self.generator.set_up_account_details(account);
        self
    }

    /// Forwards to [`PayloadGenerator::direct_payload`]
    pub fn prepare_payload(&self) -> Result<Value> {
        self.generator.direct_payload()
    }

    pub fn generator(&self) -> &PayloadGenerator {
        &self.generator
    }
}

/// One-shot direct payload helper
#[derive(Debug, Clone)]
pub struct SimpleDirectMethod {
    generator: PayloadGenerator,
}

impl SimpleDirectMethod {
    pub fn new(merchant_id: u64, webhook_url: impl Into<String>) -> Self {
        Self {
            generator: PayloadGenerator::new(merchant_id, webhook_url),
        }
    }

    pub fn set_up_provider(&mut self, name: impl Into<String>, code: impl Into<String>) -> &mut Self {
        self.generator.set_up_providers(name, code);
        self
    }

    /// Forwards to [`PayloadGenerator::simple_direct_payload`]
    pub fn prepare_payload(&self, payment: SimplePayment) -> Result<Value> {
        self.generator.simple_direct_payload(payment)
    }

    pub fn generator(&self) -> &PayloadGenerator {
        &self.generator
    }
}
