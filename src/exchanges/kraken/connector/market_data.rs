use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::params::Params;
use crate::exchanges::kraken::connector::KrakenConnector;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::instrument;

/// Public market data, `POST {base}/0/public/{operation}`
impl<R: RestClient> KrakenConnector<R> {
    /// Server time, useful to estimate clock skew
    #[instrument(skip(self))]
    pub async fn get_server_time(&self) -> Result<Value, ExchangeError> {
        self.client.call_public("Time", Params::new()).await
    }

    /// Asset info. An empty `assets` slice means every asset of the class.
    #[instrument(skip(self))]
    pub async fn get_asset_info(
        &self,
        assets: &[&str],
        info: Option<&str>,
        asset_class: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("info", &info)
            .with("aclass", &asset_class)
            .with("asset", assets);
        self.client.call_public("Assets", params).await
    }

    /// `info` is one of `info`, `leverage`, `fees` or `margin`
    #[instrument(skip(self))]
    pub async fn get_tradable_asset_pairs(
        &self,
        info: Option<&str>,
        pairs: &[&str],
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("info", &info).with("pair", pairs);
        self.client.call_public("AssetPairs", params).await
    }

    #[instrument(skip(self))]
    pub async fn get_ticker(&self, pairs: &[&str]) -> Result<Value, ExchangeError> {
        let params = Params::new().with("pair", pairs);
        self.client.call_public("Ticker", params).await
    }

    /// OHLC candles; `interval` is in minutes
    #[instrument(skip(self))]
    pub async fn get_ohlc(
        &self,
        pair: &str,
        interval: Option<u32>,
        since: Option<DateTime<Utc>>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("pair", pair)
            .with("interval", &interval)
            .with("since", &since);
        self.client.call_public("OHLC", params).await
    }

    #[instrument(skip(self))]
    pub async fn get_order_book(
        &self,
        pair: &str,
        count: Option<u32>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("pair", pair).with("count", &count);
        self.client.call_public("Depth", params).await
    }

    /// Recent trades after the `since` cursor returned by a previous call
    #[instrument(skip(self))]
    pub async fn get_recent_trades(
        &self,
        pair: &str,
        since: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("pair", pair).with("since", &since);
        self.client.call_public("Trades", params).await
    }

    #[instrument(skip(self))]
    pub async fn get_recent_spread(
        &self,
        pair: &str,
        since: Option<i64>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("pair", pair).with("since", &since);
        self.client.call_public("Spread", params).await
    }
}
