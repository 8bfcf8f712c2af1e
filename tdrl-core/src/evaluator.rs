//! Evaluate action-value functions.
use crate::record::Record;
use anyhow::Result;
mod default_evaluator;
pub use default_evaluator::DefaultEvaluator;

/// Evaluates an action-value function `Q`.
///
/// Evaluation does not change the learned values, but value functions materializing
/// rows on access (e.g. [`QTable`](crate::q_table::QTable)) may grow.
pub trait Evaluator<Q> {
    /// Evaluates `q`, returning metrics as a [`Record`].
    fn evaluate(&mut self, q: &mut Q) -> Result<Record>;
}
