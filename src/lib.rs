pub mod core;
pub mod exchanges;
pub mod utils;

pub use core::config::{CredentialPair, ExchangeConfig};
pub use core::errors::ExchangeError;
pub use core::params::Params;
pub use exchanges::bittrex::BittrexConnector;
pub use exchanges::kraken::KrakenConnector;
pub use utils::{ExchangeConnector, ExchangeFactory, ExchangeType};
