//! Trainable predictor of action values.
use anyhow::Result;

/// Interface of a trainable model predicting action values from encoded states.
///
/// The training step itself is opaque to the learning algorithms. They only build
/// inputs and targets, call [`QPredictor::fit`], and move parameters between models.
/// The internal structure of the model is never inspected; resetting it goes through
/// [`QPredictor::reinitialize_parameters`].
pub trait QPredictor {
    /// Snapshot of the model parameters.
    type Params;

    /// Predicts the action values of each state in the batch.
    ///
    /// The output has one row per input state and one column per action.
    fn predict(&self, states: &[Vec<f32>]) -> Result<Vec<Vec<f32>>>;

    /// Fits the model on `(states, targets)`.
    ///
    /// `epochs` passes are made over the data in minibatches of `batch_size`.
    /// Returns the mean loss of the last epoch.
    fn fit(
        &mut self,
        states: &[Vec<f32>],
        targets: &[Vec<f32>],
        epochs: usize,
        batch_size: usize,
    ) -> Result<f32>;

    /// Creates a new model with the same architecture and freshly initialized parameters.
    fn clone_with_same_architecture(&self) -> Result<Self>
    where
        Self: Sized;

    /// Returns a copy of the parameters.
    fn parameters(&self) -> Result<Self::Params>;

    /// Overwrites the parameters.
    fn set_parameters(&mut self, params: &Self::Params) -> Result<()>;

    /// Re-initializes the parameters, including any optimizer state.
    fn reinitialize_parameters(&mut self) -> Result<()>;
}
