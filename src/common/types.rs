//! Market data and order types exchanged with the trading environment

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Instrument identifier
pub type Symbol = String;

/// Integer price in exchange ticks
pub type Price = i64;

/// Signed size: positive for bids/buys, negative for asks/sells
pub type Quantity = i64;

/// Resting liquidity for one instrument at one instant
///
/// `buy_orders` maps price to positive resting size, `sell_orders` maps price
/// to negative resting size. Iteration order is unspecified, so best prices
/// are always computed, never read from the first or last entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDepth {
    #[serde(default)]
    pub buy_orders: HashMap<Price, Quantity>,
    #[serde(default)]
    pub sell_orders: HashMap<Price, Quantity>,
}

impl OrderDepth {
    /// Create an empty ladder
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ladder from `(price, size)` pairs for each side
    pub fn from_levels(
        bids: impl IntoIterator<Item = (Price, Quantity)>,
        asks: impl IntoIterator<Item = (Price, Quantity)>,
    ) -> Self {
        Self {
            buy_orders: bids.into_iter().collect(),
            sell_orders: asks.into_iter().collect(),
        }
    }

    /// Highest bid price
    pub fn best_bid(&self) -> Option<Price> {
        self.buy_orders.keys().copied().max()
    }

    /// Lowest ask price
    pub fn best_ask(&self) -> Option<Price> {
        self.sell_orders.keys().copied().min()
    }

    /// Lowest bid price, the deepest level on the buy side
    pub fn lowest_bid(&self) -> Option<Price> {
        self.buy_orders.keys().copied().min()
    }

    /// Highest ask price, the deepest level on the sell side
    pub fn highest_ask(&self) -> Option<Price> {
        self.sell_orders.keys().copied().max()
    }

    /// Returns true if neither side has any level
    pub fn is_empty(&self) -> bool {
        self.buy_orders.is_empty() && self.sell_orders.is_empty()
    }
}

/// An order proposed to the environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub symbol: Symbol,
    pub price: Price,
    /// Positive = buy, negative = sell
    pub quantity: Quantity,
}

impl Order {
    pub fn new(symbol: impl Into<Symbol>, price: Price, quantity: Quantity) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            quantity,
        }
    }

    /// Returns true if this order buys
    pub fn is_buy(&self) -> bool {
        self.quantity > 0
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = if self.is_buy() { "BUY" } else { "SELL" };
        write!(f, "{} {} {}x{}", side, self.symbol, self.quantity.abs(), self.price)
    }
}

/// Tradable listing metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub symbol: Symbol,
    pub product: String,
    pub denomination: String,
}

/// An executed trade reported by the environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub symbol: Symbol,
    pub price: Price,
    pub quantity: Quantity,
    #[serde(default)]
    pub buyer: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub timestamp: i64,
}

/// Conversion quote for a product that can be exchanged off-book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionObservation {
    pub bid_price: f64,
    pub ask_price: f64,
    pub transport_fees: f64,
    pub export_tariff: f64,
    pub import_tariff: f64,
    #[serde(default)]
    pub sugar_price: f64,
    #[serde(default)]
    pub sunlight_index: f64,
}

/// Non-book observations attached to a tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    #[serde(default)]
    pub plain_value_observations: HashMap<String, i64>,
    #[serde(default)]
    pub conversion_observations: HashMap<String, ConversionObservation>,
}

/// Everything the environment hands over for one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradingState {
    #[serde(default)]
    pub timestamp: i64,
    /// Opaque blob produced by the previous tick's run
    #[serde(default, rename = "traderData", alias = "trader_data")]
    pub trader_data: String,
    #[serde(default)]
    pub listings: HashMap<Symbol, Listing>,
    #[serde(default)]
    pub order_depths: HashMap<Symbol, OrderDepth>,
    #[serde(default)]
    pub own_trades: HashMap<Symbol, Vec<Trade>>,
    #[serde(default)]
    pub market_trades: HashMap<Symbol, Vec<Trade>>,
    #[serde(default)]
    pub position: HashMap<Symbol, Quantity>,
    #[serde(default)]
    pub observations: Observation,
}

impl TradingState {
    /// Current signed position for a symbol, zero when absent
    pub fn position_of(&self, symbol: &str) -> Quantity {
        self.position.get(symbol).copied().unwrap_or(0)
    }

    /// Ladder for a symbol, if the environment supplied one
    pub fn order_depth(&self, symbol: &str) -> Option<&OrderDepth> {
        self.order_depths.get(symbol)
    }
}
