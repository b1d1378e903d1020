//! Corrective orders keeping the requested position inside its limit

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::warn;

use crate::common::types::{Order, Quantity};
use crate::strategy::types::FallbackPrices;

/// What the balancer decided for one evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Balance {
    /// Projected position already inside `[-limit, limit]`
    WithinLimit { projected: Quantity },
    /// One corrective order brings the projection back onto the limit
    Corrected { projected: Quantity, order: Order },
    /// A correction was needed but no price was available for it
    Unpriced { projected: Quantity },
}

impl Balance {
    pub fn order(&self) -> Option<&Order> {
        match self {
            Balance::Corrected { order, .. } => Some(order),
            _ => None,
        }
    }

    pub fn into_order(self) -> Option<Order> {
        match self {
            Balance::Corrected { order, .. } => Some(order),
            _ => None,
        }
    }

    /// Position before the corrective order
    pub fn projected(&self) -> Quantity {
        match self {
            Balance::WithinLimit { projected }
            | Balance::Corrected { projected, .. }
            | Balance::Unpriced { projected } => *projected,
        }
    }
}

/// Size a corrective order for `position + Σ orders`
///
/// Above `limit` a sell at the original ladder's lowest bid trims the
/// projection to exactly `limit`; below `-limit` a buy at the highest ask
/// lifts it to exactly `-limit`. The corrective order may well rest unfilled,
/// it only bounds what is requested from the environment.
///
/// When that side of the original ladder was empty the order is priced at the
/// fair value instead (rounded up for a sell, down for a buy). With neither
/// price known no order is emitted.
pub fn balance_limits(
    symbol: &str,
    position: Quantity,
    orders: &[Order],
    fallback: FallbackPrices,
    fair_value: Option<Decimal>,
    limit: Quantity,
) -> Balance {
    let projected = position + orders.iter().map(|order| order.quantity).sum::<Quantity>();

    let (price, quantity) = if projected > limit {
        let price = fallback
            .lowest_bid
            .or_else(|| fair_value.and_then(|fv| fv.ceil().to_i64()));
        (price, -(projected - limit))
    } else if projected < -limit {
        let price = fallback
            .highest_ask
            .or_else(|| fair_value.and_then(|fv| fv.floor().to_i64()));
        (price, -(projected + limit))
    } else {
        return Balance::WithinLimit { projected };
    };

    match price {
        Some(price) => Balance::Corrected {
            projected,
            order: Order::new(symbol, price, quantity),
        },
        None => {
            warn!(
                symbol,
                position,
                projected,
                limit,
                "position limit breached but no price for a corrective order"
            );
            Balance::Unpriced { projected }
        }
    }
}
