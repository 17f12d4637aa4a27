use crate::core::config::CredentialPair;
use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::params::Params;
use crate::exchanges::kraken::connector::KrakenConnector;
use crate::exchanges::kraken::types::KrakenOrderRequest;
use serde_json::Value;
use tracing::instrument;

/// Private order entry
impl<R: RestClient> KrakenConnector<R> {
    #[instrument(
        skip(self, order, credentials),
        fields(pair = %order.pair, side = %order.side, order_type = %order.order_type)
    )]
    pub async fn add_order(
        &self,
        order: &KrakenOrderRequest,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        self.client
            .call_private("AddOrder", order.to_params(), credentials)
            .await
    }

    /// `txid` may also be a user reference id
    #[instrument(skip(self, credentials))]
    pub async fn cancel_order(
        &self,
        txid: &str,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("txid", txid);
        self.client
            .call_private("CancelOrder", params, credentials)
            .await
    }
}
