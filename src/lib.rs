//! Ladder Taker Library
//!
//! Per-tick trading logic for limit order book snapshots: a noise-robust fair
//! value estimate, immediate taking of mispriced resting quotes, and a
//! corrective order keeping every product's requested position within its
//! symmetric limit.

pub mod common;
pub mod config;
pub mod replay;
pub mod strategy;

// Re-export commonly used types
pub use common::errors::{Result, TraderError};
pub use common::logger::TickLogger;
pub use common::types::{
    Listing, Observation, Order, OrderDepth, Price, Quantity, Symbol, Trade, TradingState,
};
pub use config::types::AppConfig;

// Strategy types
pub use strategy::{
    balance_limits, take_best_orders, Balance, BoxedStrategy, Evaluation, FallbackPrices,
    Microstructure, Strategy, StrategyRunner, TakeOutcome, Trader, TraderContext, TraderOutput,
};
