//! Action-value functions.
use super::Transition;
use crate::util::{argmax, max};
use anyhow::Result;

/// Objects whose learnable state is reset per trial and whose schedules advance per episode.
///
/// Value functions and exploration policies implement this trait, so the training loop
/// can drive them uniformly.
pub trait Episodic {
    /// Re-initializes the object to its default values.
    ///
    /// Schedule parameters are reset to their values at episode 0.
    fn clear(&mut self) -> Result<()>;

    /// Finishes the given (zero-based) episode.
    ///
    /// Tabular value functions recompute their learning rate here, double deep Q
    /// synchronizes its action network with the target network, and exploration
    /// policies recompute epsilon, the temperature or the pursuit rate.
    fn finish_episode(&mut self, episode: usize) -> Result<()>;
}

/// An action-value function `Q(s, ·)`.
///
/// `S` is the key the function is evaluated at: the task state itself for tabular
/// methods, or its encoding as a numeric vector for approximation methods.
pub trait QFunction<S>: Episodic {
    /// Returns the action values for all actions at `state`.
    ///
    /// Tabular implementations materialize unseen states as a side effect.
    fn values(&mut self, state: &S) -> Result<Vec<f32>>;

    /// Returns the index of the action maximizing the action values at `state`.
    ///
    /// Ties are broken by the lowest index.
    fn max_action(&mut self, state: &S) -> Result<usize> {
        Ok(argmax(&self.values(state)?))
    }

    /// Returns the maximum of the action values at `state`.
    fn max_value(&mut self, state: &S) -> Result<f32> {
        Ok(max(&self.values(state)?))
    }
}

/// An action-value function approximated by a trainable model.
pub trait NeuralQ: QFunction<Vec<f32>> {
    /// Trains the model on a minibatch of encoded transitions with Q-learning targets.
    ///
    /// Returns the training loss.
    fn train(&mut self, batch: &[Transition<Vec<f32>>], discount: f32) -> Result<f32>;
}
