/// Exchange-agnostic request pipeline
///
/// Every endpoint method on every connector funnels through the same stages:
///
/// 1. [`RequestBuilder`] resolves credentials (per-call override, else the
///    connector default), drops unset optional parameters and, for private
///    operations, draws one nonce from the connector's [`NonceGenerator`].
/// 2. The exchange's [`Signer`] lays the [`RequestDescriptor`] out on the wire
///    and, for private operations, computes the signature.
/// 3. [`ExchangeClient::invoke`] sends the [`SignedRequest`] through a
///    [`RestClient`] and maps the response to a JSON document or a typed
///    [`ExchangeError`](crate::core::errors::ExchangeError).
///
/// Nothing here retries. Rate limits surface as `RateLimitExceeded` and the
/// caller decides what is safe to resend.
///
/// ```rust,no_run
/// use cryptex::core::config::ExchangeConfig;
/// use cryptex::core::params::Params;
/// use cryptex::exchanges::kraken::KrakenConnector;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExchangeConfig::from_env("KRAKEN")?;
/// let kraken = KrakenConnector::new(config)?;
///
/// // Named endpoint method
/// let balance = kraken.get_account_balance(None).await?;
///
/// // Or any operation through the generic pipeline
/// let params = Params::new().with("asset", "ZUSD");
/// let trade_balance = kraken.client().call_private("TradeBalance", params, None).await?;
/// # Ok(())
/// # }
/// ```
pub mod client;
pub mod nonce;
pub mod request;
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use client::ExchangeClient;
pub use nonce::{Clock, NonceGenerator, SystemClock};
pub use request::{Authorization, RequestBuilder, RequestDescriptor};
pub use rest::{HttpResponse, ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{SignatureResult, SignedRequest, Signer};
