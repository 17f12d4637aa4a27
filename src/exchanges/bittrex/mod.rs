pub mod builder;
pub mod connector;
pub mod signer;
pub mod types;

pub use builder::build_connector;
pub use connector::BittrexConnector;
pub use signer::BittrexSigner;
pub use types::OrderBookType;

/// Production REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://bittrex.com/api/v1.1";
