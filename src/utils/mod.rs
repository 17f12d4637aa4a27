pub mod exchange_factory;

pub use exchange_factory::{ExchangeConnector, ExchangeFactory, ExchangeType};
