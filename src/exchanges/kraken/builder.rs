use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::kraken::connector::KrakenConnector;
use crate::exchanges::kraken::DEFAULT_BASE_URL;

pub fn resolve_base_url(config: &ExchangeConfig) -> String {
    config
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Create a Kraken connector backed by reqwest
pub fn build_connector(
    config: ExchangeConfig,
) -> Result<KrakenConnector<ReqwestRest>, ExchangeError> {
    let rest_config =
        RestClientConfig::new(resolve_base_url(&config), "kraken".to_string()).with_timeout(30);
    let rest = RestClientBuilder::new(rest_config).build()?;
    Ok(KrakenConnector::with_rest(rest, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only_connector_uses_default_endpoint() {
        let connector = build_connector(ExchangeConfig::read_only()).unwrap();
        assert_eq!(connector.client().base_url(), DEFAULT_BASE_URL);
        assert!(!connector.client().has_default_credentials());
    }
}
