//! End-to-end tests of estimate → take → balance through the public API

mod common;

use common::{ladder_family, resin_order_depth, single_product_state};
use ladder_taker::config::{load_from_str, ProductParams};
use ladder_taker::{
    AppConfig, Microstructure, Order, OrderDepth, Quantity, Strategy, StrategyRunner, Trader,
    TraderContext,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const RESIN: &str = "RAINFOREST_RESIN";

fn forced_runner(take_width: Decimal, min_volume: Quantity, limit: Quantity) -> StrategyRunner {
    StrategyRunner::new(
        RESIN,
        ProductParams::new(take_width, min_volume)
            .with_forced_fair_value(dec!(10000))
            .with_position_limit(limit),
    )
}

// ============================================================================
// Worked examples
// ============================================================================

#[test]
fn test_example_a_wide_threshold_takes_nothing() {
    let depth = resin_order_depth();
    let ms = Microstructure::estimate(&depth, 10, Some(dec!(10000)));

    assert_eq!(ms.filtered_best_bid, Some(9999));
    assert_eq!(ms.filtered_best_ask, Some(10001));
    assert_eq!(ms.best_bid, Some(9999));
    assert_eq!(ms.best_ask, Some(10001));
    assert_eq!(ms.spread, Some(2));
    assert_eq!(ms.filtered_spread, Some(2));

    let mut ctx = TraderContext::new();
    let evaluation = forced_runner(dec!(0.5), 10, 50).evaluate(&depth, 0, &mut ctx);
    assert!(evaluation.is_empty());
}

#[test]
fn test_example_b_pure_crossing() {
    let depth = OrderDepth::from_levels([(10001, 5)], [(9999, -5)]);
    let mut ctx = TraderContext::new();

    let orders = forced_runner(dec!(0), 0, 50)
        .evaluate(&depth, 0, &mut ctx)
        .into_orders();

    assert_eq!(
        orders,
        vec![Order::new(RESIN, 10001, -5), Order::new(RESIN, 9999, 5)]
    );
}

#[test]
fn test_example_c_extra_bid_stays_within_limit() {
    let depth = OrderDepth::from_levels([(10001, 5), (10005, 10)], [(9999, -5)]);
    let mut ctx = TraderContext::new();

    let evaluation = forced_runner(dec!(0), 0, 50).evaluate(&depth, 48, &mut ctx);

    assert_eq!(
        evaluation.take_orders,
        vec![
            Order::new(RESIN, 10005, -10),
            Order::new(RESIN, 10001, -5),
            Order::new(RESIN, 9999, 5),
        ]
    );
    assert!(evaluation.balance_order.is_none());
}

#[test]
fn test_example_d_long_breach_is_trimmed() {
    // Two cheap asks sum to +10; the lowest bid prices the corrective sell.
    let depth = OrderDepth::from_levels([(9990, 2), (9992, 3)], [(9996, -4), (9998, -6)]);
    let mut ctx = TraderContext::new();

    let evaluation = forced_runner(dec!(0), 0, 50).evaluate(&depth, 45, &mut ctx);

    assert_eq!(
        evaluation.take_orders,
        vec![Order::new(RESIN, 9996, 4), Order::new(RESIN, 9998, 6)]
    );
    assert_eq!(evaluation.balance_order, Some(Order::new(RESIN, 9990, -5)));
}

// ============================================================================
// Properties over a family of ladders
// ============================================================================

#[test]
fn test_requested_position_never_exceeds_limit() {
    let widths = [dec!(0), dec!(0.5), dec!(1), dec!(2)];
    let positions = [-50, -45, -10, 0, 12, 48, 50];

    for depth in ladder_family(10000) {
        for forced in [Some(dec!(10000)), None] {
            for width in widths {
                for min_volume in [0, 10, 35] {
                    let mut params = ProductParams::new(width, min_volume).with_position_limit(20);
                    params.forced_fair_value = forced;
                    let runner = StrategyRunner::new(RESIN, params);

                    for position in positions.map(|p: Quantity| p.clamp(-20, 20)) {
                        let mut ctx = TraderContext::new();
                        let orders = runner.evaluate(&depth, position, &mut ctx).into_orders();
                        let requested = position + orders.iter().map(|o| o.quantity).sum::<i64>();

                        assert!(
                            (-20..=20).contains(&requested),
                            "requested {} for {:?} at position {}",
                            requested,
                            depth,
                            position
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_take_iff_priced_through_threshold() {
    for depth in ladder_family(2000) {
        for width in [dec!(0), dec!(0.5), dec!(1)] {
            let ms = Microstructure::estimate(&depth, 10, None);
            let runner = StrategyRunner::new(
                "KELP",
                ProductParams::new(width, 10).with_position_limit(1_000),
            );
            let mut ctx = TraderContext::new();
            let evaluation = runner.evaluate(&depth, 0, &mut ctx);

            let (Some(fv), Some(spread)) = (ms.fair_value, ms.filtered_spread) else {
                assert!(evaluation.take_orders.is_empty());
                continue;
            };
            let edge = width * Decimal::from(spread);

            for (&price, &size) in &depth.buy_orders {
                let taken = evaluation
                    .take_orders
                    .contains(&Order::new("KELP", price, -size));
                assert_eq!(taken, Decimal::from(price) >= fv + edge, "bid {}", price);
            }
            for (&price, &size) in &depth.sell_orders {
                let taken = evaluation
                    .take_orders
                    .contains(&Order::new("KELP", price, -size));
                assert_eq!(taken, Decimal::from(price) <= fv - edge, "ask {}", price);
            }
        }
    }
}

#[test]
fn test_filtered_bests_ignore_thin_levels() {
    for depth in ladder_family(500) {
        for min_volume in [0, 5, 12, 30, 100] {
            let ms = Microstructure::estimate(&depth, min_volume, None);

            if let Some(bid) = ms.filtered_best_bid {
                assert!(depth.buy_orders[&bid] >= min_volume);
            } else {
                assert!(depth.buy_orders.values().all(|size| *size < min_volume));
            }
            if let Some(ask) = ms.filtered_best_ask {
                assert!(depth.sell_orders[&ask].abs() >= min_volume);
            } else {
                assert!(depth.sell_orders.values().all(|size| size.abs() < min_volume));
            }
        }
    }
}

// ============================================================================
// Trader over a full trading state
// ============================================================================

#[test]
fn test_trader_uses_configured_parameters() {
    let config = load_from_str(
        r#"
        [trader]
        conversions = 7

        [products.KELP]
        take_width = 0
        min_volume = 15
        position_limit = 10
        "#,
    )
    .unwrap();
    let trader = Trader::from_config(&config);

    // filtered bests 2030/2034 put fair at 2032: the thin ask at 2029 is bought,
    // 12 against a limit of 10
    let depth = OrderDepth::from_levels([(2030, 20)], [(2029, -12), (2034, -16)]);
    let state = single_product_state("KELP", depth, 0);

    let output = trader.run(&state).unwrap();

    assert_eq!(output.conversions, 7);
    assert_eq!(
        output.orders["KELP"],
        vec![Order::new("KELP", 2029, 12), Order::new("KELP", 2030, -2)]
    );
}

#[test]
fn test_trader_recovers_from_garbage_trader_data() {
    let trader = Trader::from_config(&AppConfig::default());
    let mut state = single_product_state(RESIN, resin_order_depth(), 0);
    state.trader_data = "definitely not json".to_string();

    let output = trader.run(&state).unwrap();

    let ctx = TraderContext::decode(&output.trader_data);
    assert!(ctx.scratch.is_empty());
    assert!(output.orders[RESIN].is_empty());
}
