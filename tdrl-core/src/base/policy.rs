//! Policy.
use super::{Episodic, QFunction, Task};
use anyhow::Result;

/// An exploration policy.
///
/// A policy maps a state to an action given the current action-value function.
/// The mapping can be either deterministic or stochastic. Parameters following a
/// per-episode schedule are recomputed in [`Episodic::finish_episode`].
pub trait Policy<S>: Episodic {
    /// Selects an action at `state`.
    ///
    /// For stochastic policies, this is consistent with sampling from
    /// [`Policy::distribution`].
    fn act<Q, T>(&mut self, q: &mut Q, task: &T, state: &S) -> Result<usize>
    where
        Q: QFunction<S> + ?Sized,
        T: Task + ?Sized;

    /// Returns the probabilities of selecting each action at `state`.
    ///
    /// Deterministic policies return a one-hot vector.
    fn distribution<Q, T>(&mut self, q: &mut Q, task: &T, state: &S) -> Result<Vec<f32>>
    where
        Q: QFunction<S> + ?Sized,
        T: Task + ?Sized;
}
