use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ExchangeClient, NonceGenerator, ReqwestRest, RestClient};
use crate::exchanges::bittrex::builder::{build_connector, resolve_base_url};
use crate::exchanges::bittrex::signer::BittrexSigner;

pub mod account;
pub mod market_data;
pub mod trading;

/// Bittrex v1.1 connector.
///
/// Endpoint methods are split by API group: public market data in
/// [`market_data`], `market/` order management in [`trading`] and
/// `account/` queries in [`account`]. Every private method accepts an
/// optional key pair that takes precedence over the configured default.
pub struct BittrexConnector<R: RestClient = ReqwestRest> {
    client: ExchangeClient<BittrexSigner, R>,
}

impl BittrexConnector<ReqwestRest> {
    pub fn new(config: ExchangeConfig) -> Result<Self, ExchangeError> {
        build_connector(config)
    }
}

impl<R: RestClient> BittrexConnector<R> {
    pub fn with_rest(rest: R, config: ExchangeConfig) -> Self {
        let base_url = resolve_base_url(&config);
        Self {
            client: ExchangeClient::new(base_url, BittrexSigner::new(), rest, config.credentials),
        }
    }

    /// Replace the nonce source, e.g. with a fixed clock in tests
    #[must_use]
    pub fn with_nonce_generator(self, nonce: NonceGenerator) -> Self {
        Self {
            client: self.client.with_nonce_generator(nonce),
        }
    }

    /// Generic pipeline, for operations without a named method
    pub fn client(&self) -> &ExchangeClient<BittrexSigner, R> {
        &self.client
    }
}

impl<R: RestClient> std::fmt::Debug for BittrexConnector<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BittrexConnector")
            .field("client", &self.client)
            .finish()
    }
}
