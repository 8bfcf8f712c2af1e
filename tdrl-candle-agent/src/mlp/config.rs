use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`Mlp`](super::Mlp).
pub struct MlpConfig {
    /// Dimension of the input, i.e., the length of encoded states.
    pub in_dim: usize,

    /// Number of units of each hidden layer.
    pub units: Vec<usize>,

    /// Dimension of the output, i.e., the number of actions.
    pub out_dim: usize,

    /// If `true`, ReLU is applied to the output layer as well.
    pub activation_out: bool,
}

impl MlpConfig {
    /// Creates configuration of MLP.
    ///
    /// * `activation_out` - If `true`, activation function is added in the final layer.
    pub fn new(in_dim: usize, units: Vec<usize>, out_dim: usize, activation_out: bool) -> Self {
        Self {
            in_dim,
            units,
            out_dim,
            activation_out,
        }
    }

    /// Returns `(in_dim, out_dim)` of every linear layer from input to output.
    pub(super) fn layer_dims(&self) -> Vec<(usize, usize)> {
        let mut dims = Vec::with_capacity(self.units.len() + 2);
        dims.push(self.in_dim);
        dims.extend(self.units.iter().cloned());
        dims.push(self.out_dim);
        dims.windows(2).map(|w| (w[0], w[1])).collect()
    }
}
