use crate::core::errors::ExchangeError;
use crate::core::params::{ParamValue, Params};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ExchangeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(ExchangeError::InvalidParameters(format!(
                        concat!("Unknown ", stringify!($name), ": {}"),
                        other
                    ))),
                }
            }
        }

        impl ParamValue for $name {
            fn to_param(&self) -> Option<String> {
                Some(self.as_str().to_string())
            }
        }
    };
}

wire_enum!(
    /// `type` of an order
    OrderSide {
        Buy => "buy",
        Sell => "sell",
    }
);

wire_enum!(
    /// `ordertype`; which of `price`/`price2` apply depends on the variant
    OrderType {
        Market => "market",
        Limit => "limit",
        StopLoss => "stop-loss",
        TakeProfit => "take-profit",
        StopLossProfit => "stop-loss-profit",
        StopLossProfitLimit => "stop-loss-profit-limit",
        StopLossLimit => "stop-loss-limit",
        TakeProfitLimit => "take-profit-limit",
        TrailingStop => "trailing-stop",
        TrailingStopLimit => "trailing-stop-limit",
        StopLossAndLimit => "stop-loss-and-limit",
        SettlePosition => "settle-position",
    }
);

wire_enum!(
    /// Which timestamp `ClosedOrders` filters on
    CloseTime {
        Open => "open",
        Close => "close",
        Both => "both",
    }
);

/// Filters for `ClosedOrders`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosedOrdersQuery {
    pub trades: Option<bool>,
    pub userref: Option<i32>,
    /// Exclusive lower bound
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound
    pub end: Option<DateTime<Utc>>,
    pub ofs: Option<u32>,
    pub closetime: Option<CloseTime>,
}

impl ClosedOrdersQuery {
    pub fn to_params(&self) -> Params {
        Params::new()
            .with("trades", &self.trades)
            .with("userref", &self.userref)
            .with("start", &self.start)
            .with("end", &self.end)
            .with("ofs", &self.ofs)
            .with("closetime", &self.closetime)
    }
}

/// Filters for `TradesHistory`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradesHistoryQuery {
    /// `all`, `any position`, `closed position`, `closing position` or `no position`
    pub trade_type: Option<String>,
    pub trades: Option<bool>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub ofs: Option<u32>,
}

impl TradesHistoryQuery {
    pub fn to_params(&self) -> Params {
        Params::new()
            .with("type", &self.trade_type)
            .with("trades", &self.trades)
            .with("start", &self.start)
            .with("end", &self.end)
            .with("ofs", &self.ofs)
    }
}

/// Filters for `Ledgers`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgersQuery {
    pub aclass: Option<String>,
    /// Sent comma-joined; empty means all assets
    pub assets: Vec<String>,
    /// `all`, `deposit`, `withdrawal`, `trade` or `margin`
    pub ledger_type: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub ofs: Option<u32>,
}

impl LedgersQuery {
    pub fn to_params(&self) -> Params {
        Params::new()
            .with("aclass", &self.aclass)
            .with("asset", &self.assets)
            .with("type", &self.ledger_type)
            .with("start", &self.start)
            .with("end", &self.end)
            .with("ofs", &self.ofs)
    }
}

/// `AddOrder` request.
///
/// Prices are strings so relative forms such as `+5` or `#2%` can be sent;
/// [`KrakenOrderRequest::limit`] formats a `Decimal` for the common case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KrakenOrderRequest {
    pub pair: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    /// In lots
    pub volume: Decimal,
    pub price: Option<String>,
    pub price2: Option<String>,
    pub leverage: Option<String>,
    pub oflags: Vec<String>,
    /// `0`, `+<seconds>` or a unix timestamp
    pub starttm: Option<String>,
    pub expiretm: Option<String>,
    pub userref: Option<i32>,
    /// Validate inputs only, do not submit
    pub validate: Option<bool>,
    pub close_order_type: Option<OrderType>,
    pub close_price: Option<String>,
    pub close_price2: Option<String>,
}

impl KrakenOrderRequest {
    pub fn new(
        pair: impl Into<String>,
        side: OrderSide,
        order_type: OrderType,
        volume: Decimal,
    ) -> Self {
        Self {
            pair: pair.into(),
            side,
            order_type,
            volume,
            price: None,
            price2: None,
            leverage: None,
            oflags: Vec::new(),
            starttm: None,
            expiretm: None,
            userref: None,
            validate: None,
            close_order_type: None,
            close_price: None,
            close_price2: None,
        }
    }

    pub fn market(pair: impl Into<String>, side: OrderSide, volume: Decimal) -> Self {
        Self::new(pair, side, OrderType::Market, volume)
    }

    pub fn limit(
        pair: impl Into<String>,
        side: OrderSide,
        volume: Decimal,
        price: Decimal,
    ) -> Self {
        let mut order = Self::new(pair, side, OrderType::Limit, volume);
        order.price = Some(price.to_string());
        order
    }

    #[must_use]
    pub fn with_userref(mut self, userref: i32) -> Self {
        self.userref = Some(userref);
        self
    }

    #[must_use]
    pub fn with_oflags<I, S>(mut self, oflags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.oflags = oflags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn validate_only(mut self) -> Self {
        self.validate = Some(true);
        self
    }

    /// Conditional close order placed once this order fills
    #[must_use]
    pub fn with_close(
        mut self,
        order_type: OrderType,
        price: Option<String>,
        price2: Option<String>,
    ) -> Self {
        self.close_order_type = Some(order_type);
        self.close_price = price;
        self.close_price2 = price2;
        self
    }

    pub fn to_params(&self) -> Params {
        Params::new()
            .with("pair", &self.pair)
            .with("type", &self.side)
            .with("ordertype", &self.order_type)
            .with("volume", &self.volume)
            .with("price", &self.price)
            .with("price2", &self.price2)
            .with("leverage", &self.leverage)
            .with("oflags", &self.oflags)
            .with("starttm", &self.starttm)
            .with("expiretm", &self.expiretm)
            .with("userref", &self.userref)
            .with("validate", &self.validate)
            .with("close[ordertype]", &self.close_order_type)
            .with("close[price]", &self.close_price)
            .with("close[price2]", &self.close_price2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_limit_order_params_in_wire_order() {
        let order = KrakenOrderRequest::limit("XBTUSD", OrderSide::Buy, dec!(1.25), dec!(37500));
        assert_eq!(
            order.to_params().to_query_string(),
            "pair=XBTUSD&type=buy&ordertype=limit&volume=1.25&price=37500"
        );
    }

    #[test]
    fn test_full_order_uses_corrected_keys() {
        let order =
            KrakenOrderRequest::new("XBTUSD", OrderSide::Sell, OrderType::StopLossLimit, dec!(0.5))
                .with_userref(-7)
                .with_oflags(["post", "fciq"])
                .validate_only()
                .with_close(
                    OrderType::Limit,
                    Some("40000".to_string()),
                    Some("40100".to_string()),
                );
        let params = order.to_params();

        assert_eq!(params.get("type"), Some("sell"));
        assert_eq!(params.get("ordertype"), Some("stop-loss-limit"));
        assert_eq!(params.get("userref"), Some("-7"));
        assert_eq!(params.get("oflags"), Some("post,fciq"));
        assert_eq!(params.get("validate"), Some("true"));
        assert_eq!(params.get("close[ordertype]"), Some("limit"));
        assert_eq!(params.get("close[price]"), Some("40000"));
        assert_eq!(params.get("close[price2]"), Some("40100"));
        assert!(!params.contains_key("usserref"));
        assert!(!params.contains_key("price"));
    }

    #[test]
    fn test_default_queries_send_nothing() {
        assert!(ClosedOrdersQuery::default().to_params().is_empty());
        assert!(TradesHistoryQuery::default().to_params().is_empty());
        assert!(LedgersQuery::default().to_params().is_empty());
    }

    #[test]
    fn test_trades_history_sends_type_filter() {
        let query = TradesHistoryQuery {
            trade_type: Some("closed position".to_string()),
            start: Some(Utc.with_ymd_and_hms(2017, 9, 21, 11, 10, 56).unwrap()),
            ..Default::default()
        };
        assert_eq!(
            query.to_params().to_query_string(),
            "type=closed+position&start=1505992256"
        );
    }

    #[test]
    fn test_ledgers_assets_are_joined() {
        let query = LedgersQuery {
            assets: vec!["XXBT".to_string(), "ZEUR".to_string()],
            ofs: Some(50),
            ..Default::default()
        };
        let params = query.to_params();
        assert_eq!(params.get("asset"), Some("XXBT,ZEUR"));
        assert_eq!(params.get("ofs"), Some("50"));
    }

    #[test]
    fn test_closed_orders_closetime() {
        let query = ClosedOrdersQuery {
            trades: Some(true),
            closetime: Some(CloseTime::Close),
            ..Default::default()
        };
        assert_eq!(query.to_params().to_query_string(), "trades=true&closetime=close");
    }

    #[test]
    fn test_order_type_parses_wire_names() {
        assert_eq!(
            "trailing-stop-limit".parse::<OrderType>().unwrap(),
            OrderType::TrailingStopLimit
        );
        assert!("iceberg".parse::<OrderType>().is_err());
    }
}
