//! Checksum signing for disbursement requests

use crate::{ContipayError, Result};
use base64::Engine;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Signing primitive turning the checksum input into a checksum token
pub trait ChecksumSigner: Send + Sync {
    /// Sign `data` with a PEM-encoded private key.
    ///
    /// Fails with [`ContipayError::Key`] when the key cannot be loaded.
    fn sign(&self, data: &str, private_key: &str) -> Result<String>;
}

/// RSASSA-PKCS1-v1_5 over SHA-256, base64-encoded
///
/// Accepts PKCS#8 (`BEGIN PRIVATE KEY`) and PKCS#1 (`BEGIN RSA PRIVATE KEY`)
/// PEM keys of any size the key loader accepts. The scheme is deterministic:
/// the same key and input always produce the same checksum.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaSha256Signer;

impl RsaSha256Signer {
    pub fn new() -> Self {
        Self
    }

    fn load_private_key(private_key: &str) -> Result<RsaPrivateKey> {
        let pem = private_key.trim();
        RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| ContipayError::key(format!("Failed to retrieve private key: {}", e)))
    }
}

impl ChecksumSigner for RsaSha256Signer {
    fn sign(&self, data: &str, private_key: &str) -> Result<String> {
        let key = Self::load_private_key(private_key)?;
        let digest = Sha256::digest(data.as_bytes());

        let signature = key
            .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
            .map_err(|e| ContipayError::key(format!("RSA signing failed: {}", e)))?;

        Ok(base64::engine::general_purpose::STANDARD.encode(signature))
    }
}

/// Checksum input assembly
pub mod checksum {
    use super::*;

    /// Payload fields signed after the token, in concatenation order
    pub const SIGNED_FIELDS: [&str; 4] = [
        "/transaction/reference",
        "/transaction/merchantId",
        "/accountDetails/accountNumber",
        "/transaction/amount",
    ];

    /// Build `token + reference + merchantId + accountNumber + amount`.
    ///
    /// Absent fields contribute an empty string rather than failing.
    pub fn input(token: &str, payload: &Value) -> String {
        let mut data = String::from(token);
        for pointer in SIGNED_FIELDS {
            data.push_str(&render_scalar(payload.pointer(pointer)));
        }
        data
    }

    /// Render a JSON scalar the way the gateway stringifies it: integral
    /// numbers drop their fraction, `true` is "1", `false` and null are empty.
    pub fn render_scalar(value: Option<&Value>) -> String {
        match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(true)) => "1".to_string(),
            Some(Value::Bool(false)) => String::new(),
            Some(Value::Number(n)) => {
                if n.is_f64() {
                    let f = n.as_f64().unwrap_or_default();
                    if f.fract() == 0.0 && f.abs() < 1e15 {
                        format!("{}", f as i64)
                    } else {
                        format!("{}", f)
                    }
                } else {
                    n.to_string()
                }
            }
            Some(other) => other.to_string(),
        }
    }
}
