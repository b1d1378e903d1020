//! Liquidity taking against quotes mispriced relative to fair value

use rust_decimal::Decimal;
use tracing::debug;

use crate::common::types::{Order, OrderDepth, Price};
use crate::strategy::microstructure::Microstructure;
use crate::strategy::types::{FallbackPrices, TakeOutcome};

/// Cross every resting level priced through the take thresholds
///
/// A bid at or above `fair_value + take_width * filtered_spread` is sold into,
/// an ask at or below `fair_value - take_width * filtered_spread` is bought,
/// each for its full resting size. Taken levels are removed from `depth`.
///
/// Nothing is taken unless both the fair value and the filtered spread are
/// known. The fallback prices are captured from `depth` before any removal.
pub fn take_best_orders(
    symbol: &str,
    depth: &mut OrderDepth,
    microstructure: &Microstructure,
    take_width: Decimal,
) -> TakeOutcome {
    let fallback = FallbackPrices::from_depth(depth);

    let (fair_value, filtered_spread) =
        match (microstructure.fair_value, microstructure.filtered_spread) {
            (Some(fair_value), Some(filtered_spread)) => (fair_value, filtered_spread),
            _ => {
                debug!(symbol, "no reference price, skipping take");
                return TakeOutcome {
                    orders: Vec::new(),
                    fallback,
                };
            }
        };

    let edge = take_width * Decimal::from(filtered_spread);
    let sell_above = fair_value + edge;
    let buy_below = fair_value - edge;

    let mut bid_prices: Vec<Price> = depth
        .buy_orders
        .keys()
        .copied()
        .filter(|price| Decimal::from(*price) >= sell_above)
        .collect();
    bid_prices.sort_unstable_by(|a, b| b.cmp(a));

    let mut ask_prices: Vec<Price> = depth
        .sell_orders
        .keys()
        .copied()
        .filter(|price| Decimal::from(*price) <= buy_below)
        .collect();
    ask_prices.sort_unstable();

    let mut orders = Vec::with_capacity(bid_prices.len() + ask_prices.len());
    for price in bid_prices {
        if let Some(size) = depth.buy_orders.remove(&price) {
            orders.push(Order::new(symbol, price, -size));
        }
    }
    for price in ask_prices {
        if let Some(size) = depth.sell_orders.remove(&price) {
            orders.push(Order::new(symbol, price, -size));
        }
    }

    debug!(
        symbol,
        %fair_value,
        %sell_above,
        %buy_below,
        taken = orders.len(),
        "take pass complete"
    );

    TakeOutcome { orders, fallback }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pure_crossing_takes_both_sides() {
        let mut depth = OrderDepth::from_levels([(10001, 5)], [(9999, -5)]);
        let ms = Microstructure::estimate(&depth, 0, Some(dec!(10000)));

        let outcome = take_best_orders("RAINFOREST_RESIN", &mut depth, &ms, Decimal::ZERO);

        assert_eq!(
            outcome.orders,
            vec![
                Order::new("RAINFOREST_RESIN", 10001, -5),
                Order::new("RAINFOREST_RESIN", 9999, 5),
            ]
        );
        assert!(depth.is_empty());
        assert_eq!(outcome.fallback.lowest_bid, Some(10001));
        assert_eq!(outcome.fallback.highest_ask, Some(9999));
    }

    #[test]
    fn test_wide_threshold_takes_nothing() {
        let original =
            OrderDepth::from_levels([(9998, 5), (9999, 30)], [(10001, -30), (10002, -5)]);
        let mut depth = original.clone();
        let ms = Microstructure::estimate(&depth, 10, Some(dec!(10000)));

        let outcome = take_best_orders("RAINFOREST_RESIN", &mut depth, &ms, dec!(0.5));

        assert!(outcome.orders.is_empty());
        assert_eq!(depth, original);
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        // fair 100, filtered spread 4, width 0.5: sell bids >= 102, buy asks <= 98
        let mut depth = OrderDepth::from_levels(
            [(101, 3), (102, 4), (103, 5)],
            [(97, -6), (98, -7), (99, -8)],
        );
        let ms = Microstructure {
            fair_value: Some(dec!(100)),
            filtered_spread: Some(4),
            ..Microstructure::default()
        };

        let outcome = take_best_orders("KELP", &mut depth, &ms, dec!(0.5));

        assert_eq!(
            outcome.orders,
            vec![
                Order::new("KELP", 103, -5),
                Order::new("KELP", 102, -4),
                Order::new("KELP", 97, 6),
                Order::new("KELP", 98, 7),
            ]
        );
        assert_eq!(depth.buy_orders.len(), 1);
        assert!(depth.buy_orders.contains_key(&101));
        assert_eq!(depth.sell_orders.len(), 1);
        assert!(depth.sell_orders.contains_key(&99));
        assert_eq!(outcome.net_quantity(), 4);
    }

    #[test]
    fn test_fractional_fair_value() {
        // fair 100.5 with zero width: bid 101 qualifies, bid 100 does not
        let mut depth = OrderDepth::from_levels([(100, 1), (101, 2)], [(100, -3), (101, -4)]);
        let ms = Microstructure {
            fair_value: Some(dec!(100.5)),
            filtered_spread: Some(1),
            ..Microstructure::default()
        };

        let outcome = take_best_orders("KELP", &mut depth, &ms, Decimal::ZERO);

        assert_eq!(
            outcome.orders,
            vec![Order::new("KELP", 101, -2), Order::new("KELP", 100, 3)]
        );
    }

    #[test]
    fn test_missing_reference_takes_nothing() {
        let mut depth = OrderDepth::from_levels([(105, 10)], []);
        let ms = Microstructure::estimate(&depth, 0, None);

        let outcome = take_best_orders("KELP", &mut depth, &ms, Decimal::ZERO);

        assert!(outcome.orders.is_empty());
        assert_eq!(depth.buy_orders.len(), 1);
        assert_eq!(outcome.fallback.lowest_bid, Some(105));
        assert!(outcome.fallback.highest_ask.is_none());
    }

    #[test]
    fn test_forced_value_without_spread_takes_nothing() {
        let mut depth = OrderDepth::from_levels([(10005, 10)], []);
        let ms = Microstructure::estimate(&depth, 0, Some(dec!(10000)));

        let outcome = take_best_orders("RAINFOREST_RESIN", &mut depth, &ms, Decimal::ZERO);

        assert!(outcome.orders.is_empty());
    }
}
