use serde::{Deserialize, Serialize};

use crate::common::types::{Order, OrderDepth, Price, Quantity};

/// Prices for a corrective order, captured from the ladder before any level
/// is taken
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackPrices {
    /// Lowest bid in the original ladder, used to price a corrective sell
    pub lowest_bid: Option<Price>,
    /// Highest ask in the original ladder, used to price a corrective buy
    pub highest_ask: Option<Price>,
}

impl FallbackPrices {
    pub fn from_depth(depth: &OrderDepth) -> Self {
        Self {
            lowest_bid: depth.lowest_bid(),
            highest_ask: depth.highest_ask(),
        }
    }
}

/// Result of crossing mispriced levels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TakeOutcome {
    pub orders: Vec<Order>,
    pub fallback: FallbackPrices,
}

impl TakeOutcome {
    /// Net signed quantity of the take orders
    pub fn net_quantity(&self) -> Quantity {
        self.orders.iter().map(|order| order.quantity).sum()
    }
}

/// Orders produced for one product on one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub take_orders: Vec<Order>,
    /// At most one order restoring the position limit
    pub balance_order: Option<Order>,
}

impl Evaluation {
    /// Take orders followed by the corrective order
    pub fn into_orders(self) -> Vec<Order> {
        let mut orders = self.take_orders;
        orders.extend(self.balance_order);
        orders
    }

    pub fn is_empty(&self) -> bool {
        self.take_orders.is_empty() && self.balance_order.is_none()
    }
}
