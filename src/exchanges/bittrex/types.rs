use crate::core::errors::ExchangeError;
use crate::core::params::ParamValue;
use std::fmt;
use std::str::FromStr;

/// Side of the book requested from `getorderbook`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBookType {
    Buy,
    Sell,
    #[default]
    Both,
}

impl OrderBookType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for OrderBookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBookType {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            "both" => Ok(Self::Both),
            other => Err(ExchangeError::InvalidParameters(format!(
                "Unknown order book type: {}",
                other
            ))),
        }
    }
}

impl ParamValue for OrderBookType {
    fn to_param(&self) -> Option<String> {
        Some(self.as_str().to_string())
    }
}
