//! Billing webhook signatures
//!
//! Gateways sign the raw request body with HMAC-SHA256 and send the hex
//! digest in a header, optionally prefixed with `sha256=`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const PREFIX: &str = "sha256=";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Missing signature header")]
    Missing,
    #[error("Signature is not valid hex")]
    Malformed,
    #[error("Signature does not match payload")]
    Mismatch,
}

fn mac(secret: &str) -> HmacSha256 {
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size")
}

/// Hex-encoded signature with `sha256=` prefix, as gateways send it
#[cfg(test)]
pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    let mut mac = mac(secret);
    mac.update(payload);
    format!("{}{}", PREFIX, hex::encode(mac.finalize().into_bytes()))
}

/// Check a signature header value against the payload in constant time
pub fn verify_payload(
    secret: &str,
    payload: &[u8],
    signature: Option<&str>,
) -> Result<(), SignatureError> {
    let signature = signature
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(SignatureError::Missing)?;
    let digest = signature.strip_prefix(PREFIX).unwrap_or(signature);
    let expected = hex::decode(digest).map_err(|_| SignatureError::Malformed)?;

    let mut mac = mac(secret);
    mac.update(payload);
    mac.verify_slice(&expected)
        .map_err(|_| SignatureError::Mismatch)
}
