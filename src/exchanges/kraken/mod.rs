pub mod builder;
pub mod connector;
pub mod signer;
pub mod types;

pub use builder::build_connector;
pub use connector::KrakenConnector;
pub use signer::KrakenSigner;
pub use types::{
    CloseTime, ClosedOrdersQuery, KrakenOrderRequest, LedgersQuery, OrderSide, OrderType,
    TradesHistoryQuery,
};

/// Production REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.kraken.com";
