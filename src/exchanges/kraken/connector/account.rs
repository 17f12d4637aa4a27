use crate::core::config::CredentialPair;
use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::params::Params;
use crate::exchanges::kraken::connector::KrakenConnector;
use crate::exchanges::kraken::types::{ClosedOrdersQuery, LedgersQuery, TradesHistoryQuery};
use serde_json::Value;
use tracing::instrument;

/// Private user data
impl<R: RestClient> KrakenConnector<R> {
    #[instrument(skip(self, credentials))]
    pub async fn get_account_balance(
        &self,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        self.client
            .call_private("Balance", Params::new(), credentials)
            .await
    }

    /// `asset` is the base used for the totals, `ZUSD` when unset
    #[instrument(skip(self, credentials))]
    pub async fn get_trade_balance(
        &self,
        asset_class: Option<&str>,
        asset: Option<&str>,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("aclass", &asset_class)
            .with("asset", &asset);
        self.client
            .call_private("TradeBalance", params, credentials)
            .await
    }

    #[instrument(skip(self, credentials))]
    pub async fn get_open_orders(
        &self,
        trades: Option<bool>,
        userref: Option<i32>,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("trades", &trades)
            .with("userref", &userref);
        self.client
            .call_private("OpenOrders", params, credentials)
            .await
    }

    #[instrument(skip(self, credentials))]
    pub async fn get_closed_orders(
        &self,
        query: &ClosedOrdersQuery,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        self.client
            .call_private("ClosedOrders", query.to_params(), credentials)
            .await
    }

    /// Up to 20 transaction ids per call
    #[instrument(skip(self, credentials))]
    pub async fn query_orders(
        &self,
        txids: &[&str],
        trades: Option<bool>,
        userref: Option<i32>,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("trades", &trades)
            .with("userref", &userref)
            .with("txid", txids);
        self.client
            .call_private("QueryOrders", params, credentials)
            .await
    }

    #[instrument(skip(self, credentials))]
    pub async fn get_trades_history(
        &self,
        query: &TradesHistoryQuery,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        self.client
            .call_private("TradesHistory", query.to_params(), credentials)
            .await
    }

    #[instrument(skip(self, credentials))]
    pub async fn query_trades(
        &self,
        txids: &[&str],
        trades: Option<bool>,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("txid", txids).with("trades", &trades);
        self.client
            .call_private("QueryTrades", params, credentials)
            .await
    }

    /// `docalcs` adds profit/loss calculations
    #[instrument(skip(self, credentials))]
    pub async fn get_open_positions(
        &self,
        txids: &[&str],
        docalcs: Option<bool>,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("txid", txids).with("docalcs", &docalcs);
        self.client
            .call_private("OpenPositions", params, credentials)
            .await
    }

    #[instrument(skip(self, credentials))]
    pub async fn get_ledgers(
        &self,
        query: &LedgersQuery,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        self.client
            .call_private("Ledgers", query.to_params(), credentials)
            .await
    }

    #[instrument(skip(self, credentials))]
    pub async fn query_ledgers(
        &self,
        ids: &[&str],
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("id", ids);
        self.client
            .call_private("QueryLedgers", params, credentials)
            .await
    }

    #[instrument(skip(self, credentials))]
    pub async fn get_trade_volume(
        &self,
        pairs: &[&str],
        fee_info: Option<bool>,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("pair", pairs).with("fee-info", &fee_info);
        self.client
            .call_private("TradeVolume", params, credentials)
            .await
    }
}
