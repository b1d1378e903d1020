//! Compact per-tick log lines for the environment's log viewer
//!
//! Each flush produces one JSON array:
//!
//! ```text
//! [state, orders, conversions, trader_data, logs]
//! ```
//!
//! where `state` is
//! `[timestamp, trader_data, listings, order_depths, own_trades, market_trades, position, observations]`.
//! The incoming trader data, the outgoing trader data and the free-form logs
//! share whatever room is left under `max_log_length`, a third each.

use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt::Write as _;

use super::errors::Result;
use super::types::{Order, Symbol, Trade, TradingState};

const ELLIPSIS: &str = "...";

/// Accumulates free-form lines during a tick and flushes them as one record
#[derive(Debug, Clone)]
pub struct TickLogger {
    logs: String,
    max_log_length: usize,
}

impl TickLogger {
    pub fn new(max_log_length: usize) -> Self {
        Self {
            logs: String::new(),
            max_log_length,
        }
    }

    /// Append one line
    pub fn print(&mut self, line: impl AsRef<str>) {
        let _ = writeln!(self.logs, "{}", line.as_ref());
    }

    pub fn pending(&self) -> &str {
        &self.logs
    }

    /// Render the tick record and clear the accumulated lines
    pub fn flush(
        &mut self,
        state: &TradingState,
        orders: &HashMap<Symbol, Vec<Order>>,
        conversions: i64,
        trader_data: &str,
    ) -> Result<String> {
        let base = json!([
            compress_state(state, ""),
            compress_orders(orders),
            conversions,
            "",
            "",
        ]);
        let base_length = serde_json::to_string(&base)?.chars().count();
        let max_item_length = self.max_log_length.saturating_sub(base_length) / 3;

        let record = json!([
            compress_state(state, &truncate(&state.trader_data, max_item_length)),
            compress_orders(orders),
            conversions,
            truncate(trader_data, max_item_length),
            truncate(&self.logs, max_item_length),
        ]);

        self.logs.clear();
        Ok(serde_json::to_string(&record)?)
    }
}

/// Cut `value` to at most `max_length` characters, marking the cut with `...`
pub fn truncate(value: &str, max_length: usize) -> String {
    if value.chars().count() <= max_length {
        return value.to_string();
    }
    let keep = max_length.saturating_sub(ELLIPSIS.len());
    let mut out: String = value.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

fn compress_state(state: &TradingState, trader_data: &str) -> Value {
    json!([
        state.timestamp,
        trader_data,
        compress_listings(state),
        compress_order_depths(state),
        compress_trades(&state.own_trades),
        compress_trades(&state.market_trades),
        state.position,
        compress_observations(state),
    ])
}

fn compress_listings(state: &TradingState) -> Value {
    state
        .listings
        .values()
        .map(|listing| json!([listing.symbol, listing.product, listing.denomination]))
        .collect()
}

fn compress_order_depths(state: &TradingState) -> Value {
    state
        .order_depths
        .iter()
        .map(|(symbol, depth)| {
            (
                symbol.clone(),
                json!([depth.buy_orders, depth.sell_orders]),
            )
        })
        .collect::<serde_json::Map<_, _>>()
        .into()
}

fn compress_trades(trades: &HashMap<Symbol, Vec<Trade>>) -> Value {
    trades
        .values()
        .flatten()
        .map(|trade| {
            json!([
                trade.symbol,
                trade.price,
                trade.quantity,
                trade.buyer,
                trade.seller,
                trade.timestamp,
            ])
        })
        .collect()
}

fn compress_observations(state: &TradingState) -> Value {
    let conversions: serde_json::Map<String, Value> = state
        .observations
        .conversion_observations
        .iter()
        .map(|(product, obs)| {
            (
                product.clone(),
                json!([
                    obs.bid_price,
                    obs.ask_price,
                    obs.transport_fees,
                    obs.export_tariff,
                    obs.import_tariff,
                    obs.sugar_price,
                    obs.sunlight_index,
                ]),
            )
        })
        .collect();

    json!([state.observations.plain_value_observations, conversions])
}

fn compress_orders(orders: &HashMap<Symbol, Vec<Order>>) -> Value {
    orders
        .values()
        .flatten()
        .map(|order| json!([order.symbol, order.price, order.quantity]))
        .collect()
}
