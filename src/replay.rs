//! Offline replay of recorded trading states
//!
//! Stands in for the environment: feeds each recorded tick to the [`Trader`]
//! and collects one flushed log line per tick.

use tracing::{debug, info};

use crate::common::errors::{Result, TraderError};
use crate::common::logger::TickLogger;
use crate::common::types::TradingState;
use crate::strategy::Trader;

/// Parse recorded states: either one JSON array or one JSON object per line
pub fn parse_states(input: &str) -> Result<Vec<TradingState>> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    trimmed
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .map_err(|e| TraderError::InvalidInput(format!("line {}: {}", index + 1, e)))
        })
        .collect()
}

/// Run every state through the trader in order
///
/// A state recorded without trader data receives the blob produced by the
/// previous tick, as the live environment would hand it back.
pub fn replay(
    trader: &Trader,
    states: Vec<TradingState>,
    logger: &mut TickLogger,
) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(states.len());
    let mut carried = String::new();

    for mut state in states {
        if state.trader_data.is_empty() {
            state.trader_data = std::mem::take(&mut carried);
        }

        let output = trader.run(&state)?;
        let order_count: usize = output.orders.values().map(Vec::len).sum();
        debug!(timestamp = state.timestamp, order_count, "tick evaluated");
        logger.print(format!("t={} orders={}", state.timestamp, order_count));

        lines.push(logger.flush(
            &state,
            &output.orders,
            output.conversions,
            &output.trader_data,
        )?);
        carried = output.trader_data;
    }

    info!("Replayed {} ticks", lines.len());
    Ok(lines)
}
