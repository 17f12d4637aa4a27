use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::params::Params;
use crate::exchanges::bittrex::connector::BittrexConnector;
use crate::exchanges::bittrex::types::OrderBookType;
use serde_json::Value;
use tracing::instrument;

/// Public endpoints, `GET {base}/public/{operation}`
impl<R: RestClient> BittrexConnector<R> {
    /// All open and available trading markets
    #[instrument(skip(self))]
    pub async fn get_markets(&self) -> Result<Value, ExchangeError> {
        self.client.call_public("getmarkets", Params::new()).await
    }

    /// All supported currencies
    #[instrument(skip(self))]
    pub async fn get_currencies(&self) -> Result<Value, ExchangeError> {
        self.client.call_public("getcurrencies", Params::new()).await
    }

    /// Current bid/ask/last for one market, e.g. `BTC-LTC`
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, market: &str) -> Result<Value, ExchangeError> {
        let params = Params::new().with("market", market);
        self.client.call_public("getticker", params).await
    }

    #[instrument(skip(self))]
    pub async fn get_market_summaries(&self) -> Result<Value, ExchangeError> {
        self.client
            .call_public("getmarketsummaries", Params::new())
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_market_summary(&self, market: &str) -> Result<Value, ExchangeError> {
        let params = Params::new().with("market", market);
        self.client.call_public("getmarketsummary", params).await
    }

    #[instrument(skip(self))]
    pub async fn get_order_book(
        &self,
        market: &str,
        book_type: OrderBookType,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("market", market).with("type", &book_type);
        self.client.call_public("getorderbook", params).await
    }

    /// Latest trades for a market
    #[instrument(skip(self))]
    pub async fn get_market_history(&self, market: &str) -> Result<Value, ExchangeError> {
        let params = Params::new().with("market", market);
        self.client.call_public("getmarkethistory", params).await
    }
}
