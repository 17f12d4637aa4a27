use crate::core::config::{CredentialPair, ExchangeConfig};
use crate::core::errors::ExchangeError;
use crate::core::params::Params;
use crate::exchanges::bittrex::BittrexConnector;
use crate::exchanges::kraken::KrakenConnector;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Supported exchange types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeType {
    Bittrex,
    Kraken,
}

impl ExchangeType {
    pub const ALL: [Self; 2] = [Self::Bittrex, Self::Kraken];

    /// Prefix of the `{PREFIX}_API_KEY` style environment variables
    pub fn env_prefix(self) -> &'static str {
        match self {
            Self::Bittrex => "BITTREX",
            Self::Kraken => "KRAKEN",
        }
    }
}

impl fmt::Display for ExchangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bittrex => write!(f, "Bittrex"),
            Self::Kraken => write!(f, "Kraken"),
        }
    }
}

impl FromStr for ExchangeType {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bittrex" => Ok(Self::Bittrex),
            "kraken" => Ok(Self::Kraken),
            other => Err(ExchangeError::InvalidParameters(format!(
                "Unsupported exchange: {}",
                other
            ))),
        }
    }
}

/// A connector for one of the supported exchanges, chosen at runtime.
///
/// Exposes the generic call surface shared by every exchange. Named endpoint
/// methods are reached through [`ExchangeConnector::as_bittrex`] and
/// [`ExchangeConnector::as_kraken`].
#[derive(Debug)]
pub enum ExchangeConnector {
    Bittrex(BittrexConnector),
    Kraken(KrakenConnector),
}

impl ExchangeConnector {
    pub fn exchange_type(&self) -> ExchangeType {
        match self {
            Self::Bittrex(_) => ExchangeType::Bittrex,
            Self::Kraken(_) => ExchangeType::Kraken,
        }
    }

    pub fn base_url(&self) -> &str {
        match self {
            Self::Bittrex(c) => c.client().base_url(),
            Self::Kraken(c) => c.client().base_url(),
        }
    }

    pub fn has_default_credentials(&self) -> bool {
        match self {
            Self::Bittrex(c) => c.client().has_default_credentials(),
            Self::Kraken(c) => c.client().has_default_credentials(),
        }
    }

    pub async fn call_public(
        &self,
        operation: &str,
        params: Params,
    ) -> Result<Value, ExchangeError> {
        match self {
            Self::Bittrex(c) => c.client().call_public(operation, params).await,
            Self::Kraken(c) => c.client().call_public(operation, params).await,
        }
    }

    pub async fn call_private(
        &self,
        operation: &str,
        params: Params,
        credentials: Option<&CredentialPair>,
    ) -> Result<Value, ExchangeError> {
        match self {
            Self::Bittrex(c) => c.client().call_private(operation, params, credentials).await,
            Self::Kraken(c) => c.client().call_private(operation, params, credentials).await,
        }
    }

    pub fn as_bittrex(&self) -> Option<&BittrexConnector> {
        match self {
            Self::Bittrex(c) => Some(c),
            Self::Kraken(_) => None,
        }
    }

    pub fn as_kraken(&self) -> Option<&KrakenConnector> {
        match self {
            Self::Kraken(c) => Some(c),
            Self::Bittrex(_) => None,
        }
    }
}

/// Factory for creating exchange connectors
pub struct ExchangeFactory;

impl ExchangeFactory {
    /// Create a connector; without a config it is read-only against the
    /// production endpoint.
    pub fn create(
        exchange_type: ExchangeType,
        config: Option<ExchangeConfig>,
    ) -> Result<ExchangeConnector, ExchangeError> {
        let config = config.unwrap_or_else(ExchangeConfig::read_only);
        match exchange_type {
            ExchangeType::Bittrex => Ok(ExchangeConnector::Bittrex(BittrexConnector::new(config)?)),
            ExchangeType::Kraken => Ok(ExchangeConnector::Kraken(KrakenConnector::new(config)?)),
        }
    }

    /// Create a connector with default credentials from the environment
    pub fn create_from_env(
        exchange_type: ExchangeType,
    ) -> Result<ExchangeConnector, ExchangeError> {
        let config = ExchangeConfig::from_env(exchange_type.env_prefix())?;
        Self::create(exchange_type, Some(config))
    }
}
