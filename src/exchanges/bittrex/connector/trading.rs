use crate::core::config::CredentialPair;
use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::params::Params;
use crate::exchanges::bittrex::connector::BittrexConnector;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

/// `market/` endpoints
impl<R: RestClient> BittrexConnector<R> {
    /// Place a limit buy. `quantity` and `rate` are sent in plain decimal notation.
    #[instrument(skip(self, credentials))]
    pub async fn buy_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        self.client
            .call_private("market/buylimit", limit_params(market, quantity, rate), credentials)
            .await
    }

    /// Place a limit sell
    #[instrument(skip(self, credentials))]
    pub async fn sell_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        self.client
            .call_private("market/selllimit", limit_params(market, quantity, rate), credentials)
            .await
    }

    #[instrument(skip(self, credentials))]
    pub async fn cancel(
        &self,
        uuid: &str,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("uuid", uuid);
        self.client
            .call_private("market/cancel", params, credentials)
            .await
    }

    /// Open orders, optionally for a single market
    #[instrument(skip(self, credentials))]
    pub async fn get_open_orders(
        &self,
        market: Option<&str>,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("market", &market);
        self.client
            .call_private("market/getopenorders", params, credentials)
            .await
    }
}

fn limit_params(market: &str, quantity: Decimal, rate: Decimal) -> Params {
    Params::new()
        .with("market", market)
        .with("quantity", &quantity)
        .with("rate", &rate)
}
