use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{hmac_sha512, sha256, SignatureResult, SignedRequest, Signer};
use crate::core::kernel::RequestDescriptor;
use crate::core::params::{encode_pair, Params};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Method;
use serde_json::Value;

pub const API_KEY_HEADER: &str = "API-Key";
pub const API_SIGN_HEADER: &str = "API-Sign";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Kraken errors carry this text when a call counter is exhausted
const RATE_LIMIT_MARKER: &str = "Rate limit exceeded";

/// Kraken REST signing.
///
/// Private calls POST a form body `nonce={nonce}[&k=v...]` to
/// `/0/private/{operation}`. The signature is
/// `base64(HMAC-SHA512(base64decode(secret), path || SHA256(nonce || 0x00 || body)))`
/// and travels in `API-Sign` next to the public key in `API-Key`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KrakenSigner;

impl KrakenSigner {
    pub fn new() -> Self {
        Self
    }

    /// URL path that is both requested and signed
    pub fn private_path(operation: &str) -> String {
        format!("/0/private/{}", operation)
    }

    pub fn public_path(operation: &str) -> String {
        format!("/0/public/{}", operation)
    }

    /// Form body of a private call; the nonce always comes first
    pub fn encode_body(nonce: u64, params: &Params) -> String {
        let mut body = format!("nonce={}", nonce);
        for (key, value) in params.iter() {
            body.push('&');
            body.push_str(&encode_pair(key, value));
        }
        body
    }

    /// Base64 signature over `path` and the digest of `nonce`, NUL, `body`.
    ///
    /// `private_key` is the base64 secret exactly as issued by Kraken.
    pub fn signature(
        private_key: &str,
        path: &str,
        nonce: u64,
        body: &str,
    ) -> Result<String, ExchangeError> {
        let secret = STANDARD.decode(private_key).map_err(|e| {
            ExchangeError::AuthError(format!("Private key is not valid base64: {}", e))
        })?;

        let nonce = nonce.to_string();
        let mut inner = Vec::with_capacity(nonce.len() + 1 + body.len());
        inner.extend_from_slice(nonce.as_bytes());
        inner.push(0);
        inner.extend_from_slice(body.as_bytes());
        let digest = sha256(&inner);

        let mut message = Vec::with_capacity(path.len() + digest.len());
        message.extend_from_slice(path.as_bytes());
        message.extend_from_slice(&digest);

        Ok(STANDARD.encode(hmac_sha512(&secret, &message)?))
    }
}

impl Signer for KrakenSigner {
    fn exchange_name(&self) -> &'static str {
        "kraken"
    }

    fn public_request(&self, base_url: &str, descriptor: &RequestDescriptor) -> SignatureResult {
        let url = format!("{}{}", base_url, Self::public_path(descriptor.operation()));
        let (headers, body) = if descriptor.params().is_empty() {
            (Vec::new(), None)
        } else {
            (
                vec![("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string())],
                Some(descriptor.params().to_query_string()),
            )
        };

        Ok(SignedRequest {
            method: Method::POST,
            url,
            headers,
            body,
        })
    }

    fn sign_request(&self, base_url: &str, descriptor: &RequestDescriptor) -> SignatureResult {
        let auth = descriptor.require_authorization()?;
        let path = Self::private_path(descriptor.operation());
        let body = Self::encode_body(auth.nonce, descriptor.params());
        let signature = Self::signature(auth.credentials.private_key(), &path, auth.nonce, &body)?;

        Ok(SignedRequest {
            method: Method::POST,
            url: format!("{}{}", base_url, path),
            headers: vec![
                (API_KEY_HEADER.to_string(), auth.credentials.public_key().to_string()),
                (API_SIGN_HEADER.to_string(), signature),
                ("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()),
            ],
            body: Some(body),
        })
    }

    /// `{"error": ["EGeneral:Invalid arguments"], ...}`
    fn exchange_error(&self, status: u16, document: &Value) -> Option<ExchangeError> {
        let errors: Vec<&str> = document
            .get("error")
            .and_then(Value::as_array)?
            .iter()
            .filter_map(Value::as_str)
            .collect();

        if errors.is_empty() {
            return None;
        }

        if errors.iter().any(|e| e.contains(RATE_LIMIT_MARKER)) {
            return Some(ExchangeError::RateLimitExceeded { retry_after: None });
        }

        Some(ExchangeError::ApiError {
            status,
            message: errors.join(", "),
        })
    }
}
