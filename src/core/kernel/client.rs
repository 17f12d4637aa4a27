use crate::core::config::CredentialPair;
use crate::core::errors::ExchangeError;
use crate::core::kernel::nonce::NonceGenerator;
use crate::core::kernel::request::{RequestBuilder, RequestDescriptor};
use crate::core::kernel::rest::{HttpResponse, RestClient};
use crate::core::kernel::signer::{SignedRequest, Signer};
use crate::core::params::Params;
use serde_json::{json, Value};
use tracing::{instrument, trace, warn};

/// The request/response pipeline shared by every exchange connector.
///
/// Owns the base URL, the exchange's signer, the transport, the default
/// key pair and the nonce counter. The counter is the only mutable state,
/// so one client can serve any number of concurrent calls.
pub struct ExchangeClient<S: Signer, R: RestClient> {
    base_url: String,
    signer: S,
    rest: R,
    nonce: NonceGenerator,
    default_credentials: Option<CredentialPair>,
}

impl<S: Signer, R: RestClient> ExchangeClient<S, R> {
    pub fn new(
        base_url: String,
        signer: S,
        rest: R,
        default_credentials: Option<CredentialPair>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            signer,
            rest,
            nonce: NonceGenerator::new(),
            default_credentials,
        }
    }

    /// Replace the nonce source, e.g. with a deterministic clock
    #[must_use]
    pub fn with_nonce_generator(mut self, nonce: NonceGenerator) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    pub fn rest(&self) -> &R {
        &self.rest
    }

    pub fn nonce_generator(&self) -> &NonceGenerator {
        &self.nonce
    }

    pub fn has_default_credentials(&self) -> bool {
        self.default_credentials.is_some()
    }

    pub fn request_builder(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(self.default_credentials.as_ref(), &self.nonce)
    }

    /// Resolve and encode a call without sending it
    pub fn prepare(
        &self,
        operation: &str,
        is_private: bool,
        params: Params,
        credentials: Option<&CredentialPair>,
    ) -> Result<SignedRequest, ExchangeError> {
        let descriptor = self
            .request_builder()
            .build(operation, is_private, params, credentials)?;
        self.encode(&descriptor)
    }

    pub fn encode(&self, descriptor: &RequestDescriptor) -> Result<SignedRequest, ExchangeError> {
        if descriptor.is_private() {
            self.signer.sign_request(&self.base_url, descriptor)
        } else {
            self.signer.public_request(&self.base_url, descriptor)
        }
    }

    #[instrument(skip(self, params), fields(exchange = self.signer.exchange_name()))]
    pub async fn call_public(
        &self,
        operation: &str,
        params: Params,
    ) -> Result<Value, ExchangeError> {
        let request = self.prepare(operation, false, params, None)?;
        self.invoke(request).await
    }

    #[instrument(skip(self, params, credentials), fields(exchange = self.signer.exchange_name()))]
    pub async fn call_private(
        &self,
        operation: &str,
        params: Params,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let request = self.prepare(operation, true, params, credentials)?;
        self.invoke(request).await
    }

    /// Send a request and decode the response into a JSON document.
    ///
    /// Never retries. A 429 is reported as `RateLimitExceeded`, an exchange
    /// error payload or non-2xx status as `ApiError`, anything that is not
    /// JSON as `MalformedResponse`.
    #[instrument(
        skip(self, request),
        fields(exchange = self.signer.exchange_name(), method = %request.method)
    )]
    pub async fn invoke(&self, request: SignedRequest) -> Result<Value, ExchangeError> {
        let response = self.rest.send(&request).await?;
        self.handle_response(response)
    }

    fn handle_response(&self, response: HttpResponse) -> Result<Value, ExchangeError> {
        let status = response.status;

        if status == 429 {
            let retry_after = response
                .header("Retry-After")
                .and_then(|v| v.trim().parse::<u64>().ok());
            warn!(?retry_after, "Rate limit exceeded");
            return Err(ExchangeError::RateLimitExceeded { retry_after });
        }

        let text = String::from_utf8_lossy(&response.body);
        trace!("Response body: {}", text);

        let document = match serde_json::from_slice::<Value>(&response.body) {
            Ok(value) => wrap_document(value),
            Err(e) if response.is_success() => {
                return Err(ExchangeError::MalformedResponse(format!(
                    "Failed to parse JSON response: {}",
                    e
                )));
            }
            Err(_) => {
                return Err(ExchangeError::ApiError {
                    status,
                    message: text.into_owned(),
                });
            }
        };

        if let Some(error) = self.signer.exchange_error(status, &document) {
            warn!(%error, "Exchange reported an error");
            return Err(error);
        }

        if response.is_success() {
            Ok(document)
        } else {
            Err(ExchangeError::ApiError {
                status,
                message: text.into_owned(),
            })
        }
    }
}

impl<S: Signer, R: RestClient> std::fmt::Debug for ExchangeClient<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeClient")
            .field("exchange", &self.signer.exchange_name())
            .field("base_url", &self.base_url)
            .field("has_default_credentials", &self.has_default_credentials())
            .finish_non_exhaustive()
    }
}

/// Objects and arrays pass through; a bare scalar becomes `{"value": ...}`
pub fn wrap_document(value: Value) -> Value {
    match value {
        Value::Object(_) | Value::Array(_) => value,
        scalar => json!({ "value": scalar }),
    }
}
