use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::bittrex::connector::BittrexConnector;
use crate::exchanges::bittrex::DEFAULT_BASE_URL;

/// Base URL the connector will use for this configuration
pub fn resolve_base_url(config: &ExchangeConfig) -> String {
    config
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Create a Bittrex connector backed by reqwest
pub fn build_connector(
    config: ExchangeConfig,
) -> Result<BittrexConnector<ReqwestRest>, ExchangeError> {
    let rest_config = RestClientConfig::new(resolve_base_url(&config), "bittrex".to_string())
        .with_timeout(30);
    let rest = RestClientBuilder::new(rest_config).build()?;
    Ok(BittrexConnector::with_rest(rest, config))
}
