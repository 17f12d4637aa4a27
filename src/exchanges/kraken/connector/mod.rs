use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ExchangeClient, NonceGenerator, ReqwestRest, RestClient};
use crate::exchanges::kraken::builder::{build_connector, resolve_base_url};
use crate::exchanges::kraken::signer::KrakenSigner;

pub mod account;
pub mod market_data;
pub mod trading;

/// Kraken REST connector.
///
/// Public market data lives in [`market_data`], private user data in
/// [`account`] and order entry in [`trading`].
pub struct KrakenConnector<R: RestClient = ReqwestRest> {
    client: ExchangeClient<KrakenSigner, R>,
}

impl KrakenConnector<ReqwestRest> {
    pub fn new(config: ExchangeConfig) -> Result<Self, ExchangeError> {
        build_connector(config)
    }
}

impl<R: RestClient> KrakenConnector<R> {
    pub fn with_rest(rest: R, config: ExchangeConfig) -> Self {
        let base_url = resolve_base_url(&config);
        Self {
            client: ExchangeClient::new(base_url, KrakenSigner::new(), rest, config.credentials),
        }
    }

    /// Replace the nonce source, e.g. with a fixed clock in tests
    #[must_use]
    pub fn with_nonce_generator(self, nonce: NonceGenerator) -> Self {
        Self {
            client: self.client.with_nonce_generator(nonce),
        }
    }

    pub fn client(&self) -> &ExchangeClient<KrakenSigner, R> {
        &self.client
    }
}

impl<R: RestClient> std::fmt::Debug for KrakenConnector<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenConnector")
            .field("client", &self.client)
            .finish()
    }
}
