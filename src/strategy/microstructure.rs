//! Fair value and spread estimation from a ladder snapshot

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::types::{OrderDepth, Price, Quantity};

/// Reference prices derived from one ladder snapshot
///
/// Every field is optional: an empty side or a side with no level above the
/// volume filter leaves the dependent values undefined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Microstructure {
    pub best_bid: Option<Price>,
    pub best_ask: Option<Price>,
    /// Best bid among levels with at least `min_volume` resting
    pub filtered_best_bid: Option<Price>,
    /// Best ask among levels with at least `min_volume` resting
    pub filtered_best_ask: Option<Price>,
    pub fair_value: Option<Decimal>,
    pub spread: Option<Price>,
    /// Spread between the filtered bests, or the raw spread when either
    /// filtered side is missing
    pub filtered_spread: Option<Price>,
}

impl Microstructure {
    /// Estimate reference prices for a ladder
    ///
    /// Levels thinner than `min_volume` (by absolute size) cannot set the
    /// filtered bests, so thin or spoofed quotes don't move the fair value.
    /// A `forced_fair_value` replaces the estimate unconditionally.
    pub fn estimate(
        depth: &OrderDepth,
        min_volume: Quantity,
        forced_fair_value: Option<Decimal>,
    ) -> Self {
        let best_bid = depth.best_bid();
        let best_ask = depth.best_ask();

        let filtered_best_bid = depth
            .buy_orders
            .iter()
            .filter(|(_, size)| size.abs() >= min_volume)
            .map(|(price, _)| *price)
            .max();
        let filtered_best_ask = depth
            .sell_orders
            .iter()
            .filter(|(_, size)| size.abs() >= min_volume)
            .map(|(price, _)| *price)
            .min();

        let fair_value = match forced_fair_value {
            Some(forced) => Some(forced),
            None => {
                let ask = filtered_best_ask.or(best_ask);
                let bid = filtered_best_bid.or(best_bid);
                match (ask, bid) {
                    (Some(ask), Some(bid)) => Some(mid(bid, ask)),
                    _ => None,
                }
            }
        };

        let spread = difference(best_ask, best_bid);
        let filtered_spread = difference(filtered_best_ask, filtered_best_bid).or(spread);

        Self {
            best_bid,
            best_ask,
            filtered_best_bid,
            filtered_best_ask,
            fair_value,
            spread,
            filtered_spread,
        }
    }

    /// Returns true if both the fair value and the filtered spread are known
    pub fn is_tradeable(&self) -> bool {
        self.fair_value.is_some() && self.filtered_spread.is_some()
    }
}

fn mid(bid: Price, ask: Price) -> Decimal {
    (Decimal::from(bid) + Decimal::from(ask)) / Decimal::TWO
}

fn difference(ask: Option<Price>, bid: Option<Price>) -> Option<Price> {
    match (ask, bid) {
        (Some(ask), Some(bid)) => Some(ask - bid),
        _ => None,
    }
}
