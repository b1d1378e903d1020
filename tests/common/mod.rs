//! Common test utilities and fixtures

#![allow(dead_code)]

use ladder_taker::{OrderDepth, Price, Quantity, TradingState};

/// The resting book of Example A: thin outer levels around 10000
pub fn resin_order_depth() -> OrderDepth {
    OrderDepth::from_levels([(9998, 5), (9999, 30)], [(10001, -30), (10002, -5)])
}

/// A trading state carrying one product's ladder and position
pub fn single_product_state(symbol: &str, depth: OrderDepth, position: Quantity) -> TradingState {
    let mut state = TradingState::default();
    state.order_depths.insert(symbol.to_string(), depth);
    state.position.insert(symbol.to_string(), position);
    state
}

/// Deterministic family of ladders around `center`
///
/// Covers crossed, touching, wide, one-sided and empty books with mixed
/// level sizes, for properties that must hold over every snapshot.
pub fn ladder_family(center: Price) -> Vec<OrderDepth> {
    let mut books = vec![
        OrderDepth::new(),
        OrderDepth::from_levels([(center - 1, 10)], []),
        OrderDepth::from_levels([], [(center + 1, -10)]),
    ];

    for offset in -3..=3 {
        for (thin, thick) in [(1, 30), (5, 12), (25, 40)] {
            let bids = [
                (center - 2 + offset, thick),
                (center - 1 + offset, thin),
                (center - 4 + offset, thick * 2),
            ];
            let asks = [
                (center + 2 - offset, -thick),
                (center + 1 - offset, -thin),
                (center + 4 - offset, -thick * 2),
            ];
            books.push(OrderDepth::from_levels(bids, asks));
        }
    }
    books
}
