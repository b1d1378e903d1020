//! Strategy module: fair value estimation, liquidity taking and limit balancing
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 PER PRODUCT, PER TICK (sync)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  OrderDepth snapshot ──clone──► working ladder              │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  Microstructure::estimate() → fair value, spreads           │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  take_best_orders() → take orders (+ levels removed)        │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  balance_limits() → at most one corrective order            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data only flows downwards; no stage calls back into an earlier one.
//!
//! # Components
//!
//! - [`Microstructure`]: best, filtered best, spread and fair value of a ladder
//! - [`take_best_orders`]: crosses quotes priced through the take thresholds
//! - [`balance_limits`]: keeps the requested position within its limit
//! - [`StrategyRunner`]: wires the three stages for one product
//! - [`Trader`]: runs every configured product over a [`TradingState`]
//! - [`TraderContext`]: scratch state threaded through the trader data blob
//!
//! [`TradingState`]: crate::common::types::TradingState

mod balancer;
mod context;
mod microstructure;
mod runner;
mod taker;
mod traits;
mod types;

pub use balancer::{balance_limits, Balance};
pub use context::TraderContext;
pub use microstructure::Microstructure;
pub use runner::{StrategyRunner, Trader, TraderOutput};
pub use taker::take_best_orders;
pub use traits::{BoxedStrategy, Strategy};
pub use types::{Evaluation, FallbackPrices, TakeOutcome};
