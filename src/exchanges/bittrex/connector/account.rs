use crate::core::config::CredentialPair;
use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::params::Params;
use crate::exchanges::bittrex::connector::BittrexConnector;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

/// `account/` endpoints
impl<R: RestClient> BittrexConnector<R> {
    #[instrument(skip(self, credentials))]
    pub async fn get_balances(
        &self,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        self.client
            .call_private("account/getbalances", Params::new(), credentials)
            .await
    }

    #[instrument(skip(self, credentials))]
    pub async fn get_balance(
        &self,
        currency: &str,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("currency", currency);
        self.client
            .call_private("account/getbalance", params, credentials)
            .await
    }

    #[instrument(skip(self, credentials))]
    pub async fn get_deposit_address(
        &self,
        currency: &str,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("currency", currency);
        self.client
            .call_private("account/getdepositaddress", params, credentials)
            .await
    }

    /// Withdraw to an external address. `payment_id` is the memo/tag some
    /// currencies require.
    #[instrument(skip(self, credentials))]
    pub async fn withdraw(
        &self,
        currency: &str,
        quantity: Decimal,
        address: &str,
        payment_id: Option<&str>,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("currency", currency)
            .with("quantity", &quantity)
            .with("address", address)
            .with("paymentid", &payment_id);
        self.client
            .call_private("account/withdraw", params, credentials)
            .await
    }

    #[instrument(skip(self, credentials))]
    pub async fn get_order(
        &self,
        uuid: &str,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("uuid", uuid);
        self.client
            .call_private("account/getorder", params, credentials)
            .await
    }

    #[instrument(skip(self, credentials))]
    pub async fn get_order_history(
        &self,
        market: Option<&str>,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("market", &market);
        self.client
            .call_private("account/getorderhistory", params, credentials)
            .await
    }

    #[instrument(skip(self, credentials))]
    pub async fn get_withdrawal_history(
        &self,
        currency: Option<&str>,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("currency", &currency);
        self.client
            .call_private("account/getwithdrawalhistory", params, credentials)
            .await
    }

    #[instrument(skip(self, credentials))]
    pub async fn get_deposit_history(
        &self,
        currency: Option<&str>,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new().with("currency", &currency);
        self.client
            .call_private("account/getdeposithistory", params, credentials)
            .await
    }
}
