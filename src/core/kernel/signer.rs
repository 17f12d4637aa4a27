use crate::core::errors::ExchangeError;
use crate::core::kernel::request::RequestDescriptor;
use hmac::{Hmac, Mac};
use reqwest::Method;
use serde_json::Value;
use sha2::{Digest, Sha256, Sha512};

/// Result type for encoding and signing operations
pub type SignatureResult = Result<SignedRequest, ExchangeError>;

/// A fully encoded HTTP request, ready for the transport.
///
/// `url` is exactly the string that was signed (when the scheme signs it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl SignedRequest {
    /// First header with this name, case-insensitive
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Per-exchange wire protocol.
///
/// An implementation knows how to lay out public requests, how to canonicalize
/// and sign private ones, and how the exchange reports errors inside an
/// otherwise successful response.
pub trait Signer: Send + Sync {
    /// Exchange name for logging and tracing
    fn exchange_name(&self) -> &'static str;

    /// Encode an unauthenticated request. Never attaches a nonce or signature.
    fn public_request(&self, base_url: &str, descriptor: &RequestDescriptor) -> SignatureResult;

    /// Canonicalize and sign a private request
    fn sign_request(&self, base_url: &str, descriptor: &RequestDescriptor) -> SignatureResult;

    /// Recognize an error payload in a decoded response body
    fn exchange_error(&self, _status: u16, _document: &Value) -> Option<ExchangeError> {
        None
    }
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

pub fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<Vec<u8>, ExchangeError> {
    let mut mac = Hmac::<Sha512>::new_from_slice(key)
        .map_err(|e| ExchangeError::AuthError(format!("Invalid secret key: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231, test case 2
    const KEY: &[u8] = b"Jefe";
    const DATA: &[u8] = b"what do ya want for nothing?";

    #[test]
    fn test_hmac_sha512_rfc4231_vector() {
        assert_eq!(
            hex::encode(hmac_sha512(KEY, DATA).unwrap()),
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_sha256_abc() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let request = SignedRequest {
            method: Method::GET,
            url: "https://ex.test".to_string(),
            headers: vec![("apisign".to_string(), "abc".to_string())],
            body: None,
        };
        assert_eq!(request.header("APISign"), Some("abc"));
        assert_eq!(request.header("API-Key"), None);
    }
}
