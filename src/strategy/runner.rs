//! Per-product orchestration and the multi-product trader

use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::common::errors::Result;
use crate::common::types::{Order, OrderDepth, Quantity, Symbol, TradingState};
use crate::config::types::{AppConfig, ProductParams};
use crate::strategy::balancer::{balance_limits, Balance};
use crate::strategy::context::TraderContext;
use crate::strategy::microstructure::Microstructure;
use crate::strategy::taker::take_best_orders;
use crate::strategy::traits::{BoxedStrategy, Strategy};
use crate::strategy::types::Evaluation;

/// Estimate, take and balance for one product
#[derive(Debug, Clone)]
pub struct StrategyRunner {
    symbol: Symbol,
    params: ProductParams,
}

impl StrategyRunner {
    pub fn new(symbol: impl Into<Symbol>, params: ProductParams) -> Self {
        Self {
            symbol: symbol.into(),
            params,
        }
    }

    pub fn params(&self) -> &ProductParams {
        &self.params
    }
}

impl Strategy for StrategyRunner {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn evaluate(
        &self,
        depth: &OrderDepth,
        position: Quantity,
        ctx: &mut TraderContext,
    ) -> Evaluation {
        let mut working = depth.clone();
        let params = &self.params;

        let microstructure =
            Microstructure::estimate(&working, params.min_volume, params.forced_fair_value);

        let take = take_best_orders(
            &self.symbol,
            &mut working,
            &microstructure,
            params.take_width,
        );

        let balance = balance_limits(
            &self.symbol,
            position,
            &take.orders,
            take.fallback,
            microstructure.fair_value,
            params.position_limit,
        );

        match microstructure.fair_value {
            Some(fv) => ctx.log(
                &self.symbol,
                format!(
                    "fair={} spread={:?} filtered_spread={:?} pos={} taken={}",
                    fv,
                    microstructure.spread,
                    microstructure.filtered_spread,
                    position,
                    take.orders.len()
                ),
            ),
            None => ctx.log(&self.symbol, format!("no fair value, pos={}", position)),
        }
        match &balance {
            Balance::WithinLimit { .. } => {}
            Balance::Corrected { projected, order } => ctx.log(
                &self.symbol,
                format!("projected {} outside limit, corrective {}", projected, order),
            ),
            Balance::Unpriced { projected } => ctx.log(
                &self.symbol,
                format!("projected {} outside limit, no corrective price", projected),
            ),
        }

        Evaluation {
            take_orders: take.orders,
            balance_order: balance.into_order(),
        }
    }
}

/// Everything returned to the environment for one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraderOutput {
    pub orders: HashMap<Symbol, Vec<Order>>,
    /// Auxiliary value passed through from configuration
    pub conversions: i64,
    pub trader_data: String,
}

/// Runs every configured product strategy over a trading state
pub struct Trader {
    strategies: Vec<BoxedStrategy>,
    conversions: i64,
}

impl Trader {
    /// Build one runner per configured product
    pub fn from_config(config: &AppConfig) -> Self {
        let mut symbols: Vec<&Symbol> = config.products.keys().collect();
        symbols.sort();

        let strategies = symbols
            .into_iter()
            .map(|symbol| {
                Box::new(StrategyRunner::new(symbol.clone(), config.products[symbol].clone()))
                    as BoxedStrategy
            })
            .collect();

        Self {
            strategies,
            conversions: config.trader.conversions,
        }
    }

    pub fn with_strategies(strategies: Vec<BoxedStrategy>, conversions: i64) -> Self {
        Self {
            strategies,
            conversions,
        }
    }

    /// Keep only the strategies whose symbol is listed
    pub fn retain_symbols(&mut self, symbols: &[Symbol]) {
        self.strategies
            .retain(|strategy| symbols.iter().any(|s| s == strategy.symbol()));
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.symbol()).collect()
    }

    /// Evaluate one tick
    ///
    /// Products missing from the state are evaluated against an empty ladder
    /// and a flat position, which yields no take orders.
    #[instrument(skip(self, state), fields(timestamp = state.timestamp))]
    pub fn run(&self, state: &TradingState) -> Result<TraderOutput> {
        let mut ctx = TraderContext::decode(&state.trader_data);
        let empty = OrderDepth::default();

        let mut orders = HashMap::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            let symbol = strategy.symbol();
            let depth = state.order_depth(symbol).unwrap_or(&empty);
            let position = state.position_of(symbol);

            let evaluation = strategy.evaluate(depth, position, &mut ctx);
            debug!(symbol, orders = ?evaluation, "evaluated");
            orders.insert(symbol.to_string(), evaluation.into_orders());
        }

        Ok(TraderOutput {
            orders,
            conversions: self.conversions,
            trader_data: ctx.encode()?,
        })
    }
}
