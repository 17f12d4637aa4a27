pub mod bittrex;
pub mod kraken;
