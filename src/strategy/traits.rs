use crate::common::types::{OrderDepth, Quantity};
use crate::strategy::context::TraderContext;
use crate::strategy::types::Evaluation;

/// Core per-product strategy trait
///
/// A strategy turns one ladder snapshot and the current position into the
/// orders for that product on this tick.
///
/// # Implementation Notes
///
/// - `evaluate` must not retain or mutate `depth`; work on a clone
/// - Parameters are fixed at construction, per-tick notes go to the context
/// - Products are evaluated independently, in any order
pub trait Strategy: Send + Sync {
    /// Symbol this strategy trades
    fn symbol(&self) -> &str;

    /// Called once per tick with the product's snapshot
    ///
    /// # Arguments
    /// * `depth` - The environment's ladder for this product
    /// * `position` - Current signed position
    /// * `ctx` - Scratch context threaded through the run
    fn evaluate(&self, depth: &OrderDepth, position: Quantity, ctx: &mut TraderContext)
        -> Evaluation;
}

/// Boxed strategy for dynamic dispatch
pub type BoxedStrategy = Box<dyn Strategy>;
