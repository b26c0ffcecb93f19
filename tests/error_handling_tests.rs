//! Error handling tests for contipay

use contipay::{
    ContipayClient, ContipayError, Customer, PayloadGenerator, SimplePayment, TransactionDetails,
};
use rust_decimal::Decimal;
use serde_json::json;

#[test]
fn test_configuration_error_message() {
    let error = ContipayError::configuration("Environment not set");

    let error_msg = error.to_string();
    assert!(
        error_msg.contains("Configuration error"),
        "Error message MUST contain 'Configuration error' - actual: {}",
        error_msg
    );
    assert!(
        error_msg.contains("Environment not set"),
        "Error message MUST contain the reason - actual: {}",
        error_msg
    );
}

#[test]
fn test_validation_error_message_names_field() {
    let error = ContipayError::validation("transaction");

    let error_msg = error.to_string();
    assert!(
        error_msg.contains("transaction"),
        "Error message MUST name the missing field - actual: {}",
        error_msg
    );
}

#[test]
fn test_key_error_message() {
    let error = ContipayError::key("Failed to retrieve private key");
    assert!(error.to_string().contains("Key error"));
    assert!(error.to_string().contains("Failed to retrieve private key"));
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error: ContipayError = json_error.into();
    assert!(error.to_string().contains("JSON error"));
}

#[tokio::test]
async fn test_unconfigured_client_fails_fast() {
    let client = ContipayClient::new("token", "secret");
    let result = client.process(&json!({"transaction": {}})).await;

    match result {
        Err(ContipayError::Configuration { message }) => {
            assert!(message.contains("set_environment"));
        }
        other => panic!("expected configuration error, got {:?}", other),
    }
}

#[test]
fn test_validation_is_not_a_partial_payload() {
    let generator = PayloadGenerator::new(1, "https://merchant.example/webhook");

    let err = generator.direct_payload().unwrap_err();
    assert!(err.is_validation());

    let err = generator.redirect_payload(false, false).unwrap_err();
    assert_eq!(err.field(), Some("successUrl"));

    let err = generator
        .simple_direct_payload(SimplePayment::new(Decimal::new(1, 0), ""))
        .unwrap_err();
    assert_eq!(err.field(), Some("accountDetails.accountNumber"));
}

#[test]
fn test_empty_currency_rejected() {
    let mut generator = PayloadGenerator::new(1, "https://merchant.example/webhook")
        .with_redirect_urls("https://merchant.example/ok", "https://merchant.example/cancel");
    generator
        .set_up_customer(Customer::new("Jane", "Doe", "0771234567"))
        .set_up_transaction(TransactionDetails::new(Decimal::new(1, 0)).with_currency(""));

    let err = generator.redirect_payload(false, false).unwrap_err();
    assert_eq!(err.field(), Some("transaction.currency"));
}

#[test]
fn test_config_from_env_requires_credentials() {
    std::env::remove_var("CONTIPAY_TOKEN");
    std::env::remove_var("CONTIPAY_SECRET");

    let err = ContipayClient::from_env().unwrap_err();
    assert!(err.is_configuration());
}
