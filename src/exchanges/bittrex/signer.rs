use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{hmac_sha512, SignatureResult, SignedRequest, Signer};
use crate::core::kernel::RequestDescriptor;
use crate::core::params::{encode_component, encode_pair, Params};
use reqwest::Method;
use serde_json::Value;
use url::Url;

/// Header carrying the hex signature
pub const SIGNATURE_HEADER: &str = "apisign";

/// Bittrex v1.1 signing: HMAC-SHA512 over the full request URL.
///
/// The signed URL is `{base}/{operation}?apikey={key}&nonce={nonce}` followed
/// by `&key=value` for each parameter in insertion order. The request is a
/// GET to that same URL with the lowercase hex digest in `apisign`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BittrexSigner;

impl BittrexSigner {
    pub fn new() -> Self {
        Self
    }

    /// Request URL as assembled, before `url` normalizes scheme, host and port
    pub fn canonical_url(
        base_url: &str,
        operation: &str,
        public_key: &str,
        nonce: u64,
        params: &Params,
    ) -> String {
        let mut url = format!(
            "{}/{}?apikey={}&nonce={}",
            base_url,
            operation,
            encode_component(public_key),
            nonce
        );
        for (key, value) in params.iter() {
            url.push('&');
            url.push_str(&encode_pair(key, value));
        }
        url
    }

    /// Lowercase hex HMAC-SHA512 of `canonical`, keyed by the UTF-8 secret
    pub fn signature(private_key: &str, canonical: &str) -> Result<String, ExchangeError> {
        let digest = hmac_sha512(private_key.as_bytes(), canonical.as_bytes())?;
        Ok(hex::encode(digest))
    }
}

impl Signer for BittrexSigner {
    fn exchange_name(&self) -> &'static str {
        "bittrex"
    }

    fn public_request(&self, base_url: &str, descriptor: &RequestDescriptor) -> SignatureResult {
        let mut url = format!("{}/public/{}", base_url, descriptor.operation());
        if !descriptor.params().is_empty() {
            url.push('?');
            url.push_str(&descriptor.params().to_query_string());
        }

        Ok(SignedRequest {
            method: Method::GET,
            url,
            headers: Vec::new(),
            body: None,
        })
    }

    fn sign_request(&self, base_url: &str, descriptor: &RequestDescriptor) -> SignatureResult {
        let auth = descriptor.require_authorization()?;
        let canonical = Self::canonical_url(
            base_url,
            descriptor.operation(),
            auth.credentials.public_key(),
            auth.nonce,
            descriptor.params(),
        );
        // Sign the serialized form the transport sends: lowercase host, no default port.
        let url = Url::parse(&canonical)
            .map_err(|e| {
                ExchangeError::InvalidParameters(format!("Invalid request URL: {}", e))
            })?
            .to_string();
        let signature = Self::signature(auth.credentials.private_key(), &url)?;

        Ok(SignedRequest {
            method: Method::GET,
            url,
            headers: vec![(SIGNATURE_HEADER.to_string(), signature)],
            body: None,
        })
    }

    /// `{"success": false, "message": "..."}`
    fn exchange_error(&self, status: u16, document: &Value) -> Option<ExchangeError> {
        if document.get("success").and_then(Value::as_bool) != Some(false) {
            return None;
        }

        let message = document
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or("request was not successful")
            .to_string();
        Some(ExchangeError::ApiError { status, message })
    }
}
