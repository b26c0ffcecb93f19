//! Payload assembly for acquire and disburse requests
//!
//! [`PayloadGenerator`] accumulates provider, customer, transaction and
//! account state through chainable setters and emits one of four payload
//! variants. It never touches the network.

use crate::reference::Reference;
use crate::types::*;
use crate::{ContipayError, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};

/// Default currency of the one-shot direct variant
pub const SIMPLE_DIRECT_CURRENCY: &str = "ZWG";

/// Default currency of the one-shot redirect variant
pub const SIMPLE_REDIRECT_CURRENCY: &str = "USD";

/// Builder for gateway payloads
#[derive(Debug, Clone)]
pub struct PayloadGenerator {
    merchant_id: u64,
    webhook_url: String,
    success_url: String,
    cancel_url: String,
    provider: Option<Provider>,
    customer: Option<Customer>,
    transaction: Option<TransactionDetails>,
    account: Option<AccountDetails>,
}

/// Wire form of the `transaction` section
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionSection<'a> {
    reference: String,
    merchant_id: u64,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    currency: &'a str,
    description: &'a str,
}

impl PayloadGenerator {
    /// Create a generator for a merchant
    pub fn new(merchant_id: u64, webhook_url: impl Into<String>) -> Self {
        Self {
            merchant_id,
            webhook_url: webhook_url.into(),
            success_url: String::new(),
            cancel_url: String::new(),
            provider: None,
            customer: None,
            transaction: None,
            account: None,
        }
    }

    /// Set the hosted-page callback URLs used by the redirect variants
    pub fn with_redirect_urls(
        mut self,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        self.success_url = success_url.into();
        self.cancel_url = cancel_url.into();
        self
    }

    /// Set the mobile-money or card provider by name and code
    pub fn set_up_providers(
        &mut self,
        name: impl Into<String>,
        code: impl Into<String>,
    ) -> &mut Self {
        self.provider = Some(Provider::new(name, code));
        self
    }

    /// Set the paying or receiving customer
    pub fn set_up_customer(&mut self, customer: Customer) -> &mut Self {
        self.customer = Some(customer);
        self
    }

    /// Set the amount, currency and reference. An empty reference is
    /// replaced with a generated one when the payload is built.
    pub fn set_up_transaction(&mut self, transaction: TransactionDetails) -> &mut Self {
        self.transaction = Some(transaction);
        self
    }

    /// Set the wallet or card account
    pub fn set_up_account_details(&mut self, account: AccountDetails) -> &mut Self {
        self.account = Some(account);
        self
    }

    /// Merchant identifier carried in every transaction section
    pub fn merchant_id(&self) -> u64 {
        self.merchant_id
    }

    /// URL the gateway notifies with the payment outcome
    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    /// Payload for direct acquisition: provider, customer, transaction and
    /// account must all be set.
    pub fn direct_payload(&self) -> Result<Value> {
        self.check_merchant()?;
        let provider = self.require_provider()?;
        let customer = require(self.customer.as_ref(), "customer")?;
        check_customer(customer)?;
        let transaction = require(self.transaction.as_ref(), "transaction")?;
        check_transaction(transaction.amount, &transaction.currency)?;
        let account = require(self.account.as_ref(), "accountDetails")?;
        check_account(&account.account_number)?;

        Ok(json!({
            "webhookUrl": self.webhook_url,
            "provider": provider,
            "customer": customer,
            "transaction": self.transaction_section(
                transaction.amount,
                &transaction.currency,
                &transaction.reference,
                &transaction.description,
            )?,
            "accountDetails": account,
        }))
    }

    /// Payload for the hosted-page flow. Account details are collected by
    /// the gateway and are not required.
    pub fn redirect_payload(&self, is_coc: bool, is_cod: bool) -> Result<Value> {
        self.check_merchant()?;
        self.check_redirect_urls()?;
        let customer = require(self.customer.as_ref(), "customer")?;
        check_customer(customer)?;
        let transaction = require(self.transaction.as_ref(), "transaction")?;
        check_transaction(transaction.amount, &transaction.currency)?;

        Ok(json!({
            "webhookUrl": self.webhook_url,
            "successUrl": self.success_url,
            "cancelUrl": self.cancel_url,
            "isCoc": is_coc,
            "isCod": is_cod,
            "customer": customer,
            "transaction": self.transaction_section(
                transaction.amount,
                &transaction.currency,
                &transaction.reference,
                &transaction.description,
            )?,
        }))
    }

    /// One-shot direct payload; currency defaults to ZWG and the provider to
    /// Ecocash when none was set.
    pub fn simple_direct_payload(&self, payment: SimplePayment) -> Result<Value> {
        self.check_merchant()?;
        let currency = payment
            .currency
            .as_deref()
            .unwrap_or(SIMPLE_DIRECT_CURRENCY);
        check_transaction(payment.amount, currency)?;
        check_account(&payment.account)?;

        let provider = self.provider.clone().unwrap_or_default();
        let reference = payment.reference.as_deref().unwrap_or_default();

        Ok(json!({
            "webhookUrl": self.webhook_url,
            "provider": provider,
            "customer": Customer::anonymous(cell_or_account(&payment)),
            "transaction": self.transaction_section(
                payment.amount,
                currency,
                reference,
                &payment.description,
            )?,
            "accountDetails": AccountDetails::new(payment.account.as_str()),
        }))
    }

    /// One-shot redirect payload; currency defaults to USD.
    ///
    /// Flag order follows the historical signature: cash-on-delivery first.
    pub fn simple_redirect_payload(
        &self,
        payment: SimplePayment,
        is_cod: bool,
        is_coc: bool,
    ) -> Result<Value> {
        self.check_merchant()?;
        self.check_redirect_urls()?;
        let currency = payment
            .currency
            .as_deref()
            .unwrap_or(SIMPLE_REDIRECT_CURRENCY);
        check_transaction(payment.amount, currency)?;
        check_account(&payment.account)?;

        let reference = payment.reference.as_deref().unwrap_or_default();

        Ok(json!({
            "webhookUrl": self.webhook_url,
            "successUrl": self.success_url,
            "cancelUrl": self.cancel_url,
            "isCoc": is_coc,
            "isCod": is_cod,
            "customer": Customer::anonymous(cell_or_account(&payment)),
            "transaction": self.transaction_section(
                payment.amount,
                currency,
                reference,
                &payment.description,
            )?,
            "accountDetails": { "accountNumber": payment.account },
        }))
    }

    fn transaction_section(
        &self,
        amount: Decimal,
        currency: &str,
        reference: &str,
        description: &str,
    ) -> Result<Value> {
        let reference = if reference.is_empty() {
            Reference::new().generate_default()
        } else {
            reference.to_string()
        };

        let section = TransactionSection {
            reference,
            merchant_id: self.merchant_id,
            amount,
            currency,
            description,
        };
        Ok(serde_json::to_value(section)?)
    }

    fn require_provider(&self) -> Result<&Provider> {
        let provider = require(self.provider.as_ref(), "provider")?;
        non_empty(&provider.name, "provider.name")?;
        non_empty(&provider.code, "provider.code")?;
        Ok(provider)
    }

    fn check_merchant(&self) -> Result<()> {
        if self.merchant_id == 0 {
            return Err(ContipayError::validation("merchantId"));
        }
        non_empty(&self.webhook_url, "webhookUrl")
    }

    fn check_redirect_urls(&self) -> Result<()> {
        non_empty(&self.success_url, "successUrl")?;
        non_empty(&self.cancel_url, "cancelUrl")
    }
}

fn require<'a, T>(group: Option<&'a T>, name: &str) -> Result<&'a T> {
    group.ok_or_else(|| ContipayError::validation(name))
}

fn non_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(ContipayError::validation(field))
    } else {
        Ok(())
    }
}

fn check_customer(customer: &Customer) -> Result<()> {
    non_empty(&customer.first_name, "customer.firstName")?;
    non_empty(&customer.last_name, "customer.lastName")?;
    non_empty(&customer.cell, "customer.cell")
}

fn check_transaction(amount: Decimal, currency: &str) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(ContipayError::validation("transaction.amount"));
    }
    non_empty(currency, "transaction.currency")
}

fn check_account(account_number: &str) -> Result<()> {
    non_empty(account_number, "accountDetails.accountNumber")
}

fn cell_or_account(payment: &SimplePayment) -> &str {
    if payment.cell.is_empty() {
        &payment.account
    } else {
        &payment.cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> PayloadGenerator {
        PayloadGenerator::new(42, "https://merchant.example/webhook")
            .with_redirect_urls("https://merchant.example/ok", "https://merchant.example/cancel")
    }

    fn amount(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    #[test]
    fn test_direct_payload_requires_transaction() {
        let mut generator = generator();
        generator
            .set_up_providers("Ecocash", "EC")
            .set_up_customer(Customer::new("Jane", "Doe", "0771234567"))
            .set_up_account_details(AccountDetails::new("0771234567"));

        let err = generator.direct_payload().unwrap_err();
        assert_eq!(err.field(), Some("transaction"));
    }

    #[test]
    fn test_direct_payload_succeeds_when_complete() {
        let mut generator = generator();
        generator
            .set_up_providers("Ecocash", "EC")
            .set_up_customer(Customer::new("Jane", "Doe", "0771234567").with_email("jane@example.com"))
            .set_up_transaction(
                TransactionDetails::new(amount(100))
                    .with_reference("ABC123")
                    .with_description("Order 1"),
            )
            .set_up_account_details(AccountDetails::new("0771234567"));

        let payload = generator.direct_payload().unwrap();
        assert_eq!(payload["webhookUrl"], "https://merchant.example/webhook");
        assert_eq!(payload["provider"]["name"], "Ecocash");
        assert_eq!(payload["provider"]["code"], "EC");
        assert_eq!(payload["customer"]["firstName"], "Jane");
        assert_eq!(payload["customer"]["email"], "jane@example.com");
        assert_eq!(payload["transaction"]["reference"], "ABC123");
        assert_eq!(payload["transaction"]["merchantId"], 42);
        assert_eq!(payload["transaction"]["amount"], 100.0);
        assert_eq!(payload["transaction"]["currency"], "ZWG");
        assert_eq!(payload["transaction"]["description"], "Order 1");
        assert_eq!(payload["accountDetails"]["accountNumber"], "0771234567");
        assert_eq!(payload["accountDetails"]["accountName"], "-");
        assert!(payload.get("successUrl").is_none());
    }

    #[test]
    fn test_direct_payload_requires_provider_and_account() {
        let mut generator = generator();
        generator
            .set_up_customer(Customer::new("Jane", "Doe", "0771234567"))
            .set_up_transaction(TransactionDetails::new(amount(5)));
        assert_eq!(generator.direct_payload().unwrap_err().field(), Some("provider"));

        generator.set_up_providers("Ecocash", "EC");
        assert_eq!(
            generator.direct_payload().unwrap_err().field(),
            Some("accountDetails")
        );

        generator.set_up_account_details(AccountDetails::new(""));
        assert_eq!(
            generator.direct_payload().unwrap_err().field(),
            Some("accountDetails.accountNumber")
        );
    }

    #[test]
    fn test_empty_customer_field_is_named() {
        let mut generator = generator();
        generator
            .set_up_providers("Ecocash", "EC")
            .set_up_customer(Customer::new("Jane", "", "0771234567"))
            .set_up_transaction(TransactionDetails::new(amount(5)))
            .set_up_account_details(AccountDetails::new("0771234567"));

        assert_eq!(
            generator.direct_payload().unwrap_err().field(),
            Some("customer.lastName")
        );
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let mut generator = generator();
        generator
            .set_up_customer(Customer::new("Jane", "Doe", "0771234567"))
            .set_up_transaction(TransactionDetails::new(Decimal::ZERO));

        assert_eq!(
            generator.redirect_payload(false, false).unwrap_err().field(),
            Some("transaction.amount")
        );
    }

    #[test]
    fn test_setters_overwrite() {
        let mut generator = generator();
        generator
            .set_up_customer(Customer::new("Jane", "Doe", "0771234567"))
            .set_up_transaction(TransactionDetails::new(amount(5)))
            .set_up_customer(Customer::new("John", "Roe", "0772222222"));

        let payload = generator.redirect_payload(false, false).unwrap();
        assert_eq!(payload["customer"]["firstName"], "John");
    }

    #[test]
    fn test_redirect_payload_shape() {
        let mut generator = generator();
        generator
            .set_up_customer(Customer::new("Jane", "Doe", "0771234567"))
            .set_up_transaction(TransactionDetails::new(Decimal::new(1050, 2)).with_currency("USD"));

        let payload = generator.redirect_payload(true, false).unwrap();
        assert_eq!(payload["successUrl"], "https://merchant.example/ok");
        assert_eq!(payload["cancelUrl"], "https://merchant.example/cancel");
        assert_eq!(payload["isCoc"], true);
        assert_eq!(payload["isCod"], false);
        assert_eq!(payload["transaction"]["amount"], 10.5);
        assert_eq!(payload["transaction"]["currency"], "USD");
        assert!(payload.get("accountDetails").is_none());

        let reference = payload["transaction"]["reference"].as_str().unwrap();
        assert_eq!(reference.len(), 6);
        assert!(reference.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_redirect_payload_requires_callback_urls() {
        let mut generator = PayloadGenerator::new(42, "https://merchant.example/webhook");
        generator
            .set_up_customer(Customer::new("Jane", "Doe", "0771234567"))
            .set_up_transaction(TransactionDetails::new(amount(5)));

        assert_eq!(
            generator.redirect_payload(false, false).unwrap_err().field(),
            Some("successUrl")
        );
    }

    #[test]
    fn test_simple_direct_defaults() {
        let payload = generator()
            .simple_direct_payload(SimplePayment::new(amount(100), "0771234567"))
            .unwrap();

        let reference = payload["transaction"]["reference"].as_str().unwrap();
        assert_eq!(reference.len(), 6);
        assert!(reference.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(payload["transaction"]["currency"], "ZWG");
        assert_eq!(payload["provider"]["name"], "Ecocash");
        assert_eq!(payload["customer"]["cell"], "0771234567");
        assert_eq!(payload["accountDetails"]["accountNumber"], "0771234567");
    }

    #[test]
    fn test_simple_redirect_defaults_to_usd() {
        let payload = generator()
            .simple_redirect_payload(SimplePayment::new(amount(100), "0771234567"), false, false)
            .unwrap();
        assert_eq!(payload["transaction"]["currency"], "USD");
    }

    #[test]
    fn test_simple_redirect_flag_order() {
        let payload = generator()
            .simple_redirect_payload(
                SimplePayment::new(amount(1), "0771234567").with_cell("0779999999"),
                true,
                false,
            )
            .unwrap();
        assert_eq!(payload["isCod"], true);
        assert_eq!(payload["isCoc"], false);
        assert_eq!(payload["customer"]["cell"], "0779999999");
    }

    #[test]
    fn test_simple_direct_uses_configured_provider_and_reference() {
        let mut generator = generator();
        generator.set_up_providers("InnBucks", "IB");
        let payload = generator
            .simple_direct_payload(
                SimplePayment::new(amount(3), "0771234567")
                    .with_reference("REF-9")
                    .with_currency("USD"),
            )
            .unwrap();
        assert_eq!(payload["provider"]["code"], "IB");
        assert_eq!(payload["transaction"]["reference"], "REF-9");
        assert_eq!(payload["transaction"]["currency"], "USD");
    }

    #[test]
    fn test_merchant_and_webhook_required() {
        let err = PayloadGenerator::new(0, "https://merchant.example/webhook")
            .simple_direct_payload(SimplePayment::new(amount(1), "0771234567"))
            .unwrap_err();
        assert_eq!(err.field(), Some("merchantId"));

        let err = PayloadGenerator::new(1, "")
            .simple_direct_payload(SimplePayment::new(amount(1), "0771234567"))
            .unwrap_err();
        assert_eq!(err.field(), Some("webhookUrl"));
    }
}
