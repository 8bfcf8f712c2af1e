//! Optimizers.
use anyhow::Result;
use candle_core::{Tensor, Var};
use candle_nn::{AdamW, Optimizer as _, ParamsAdamW, SGD};
use candle_optimisers::adam::{Adam, ParamsAdam};
use serde::{Deserialize, Serialize};

/// Configuration of the optimizer fitting a predictor.
///
/// Moment decay rates and epsilon of the Adam variants are the defaults of their
/// crates.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub enum OptimizerConfig {
    /// AdamW optimizer.
    AdamW {
        /// Learning rate.
        lr: f64,
        /// Weight decay.
        #[serde(default)]
        weight_decay: f64,
    },

    /// Adam optimizer.
    Adam {
        /// Learning rate.
        lr: f64,
    },

    /// Plain stochastic gradient descent.
    Sgd {
        /// Learning rate.
        lr: f64,
    },
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::Adam { lr: 1e-3 }
    }
}

impl OptimizerConfig {
    /// Constructs the optimizer of `vars`.
    pub fn build(&self, vars: Vec<Var>) -> Result<Optimizer> {
        let opt = match *self {
            Self::AdamW { lr, weight_decay } => {
                let params = ParamsAdamW {
                    lr,
                    weight_decay,
                    ..ParamsAdamW::default()
                };
                Optimizer::AdamW(AdamW::new(vars, params)?)
            }
            Self::Adam { lr } => {
                let params = ParamsAdam {
                    lr,
                    ..ParamsAdam::default()
                };
                Optimizer::Adam(Adam::new(vars, params)?)
            }
            Self::Sgd { lr } => Optimizer::Sgd(SGD::new(vars, lr)?),
        };
        Ok(opt)
    }

    /// Overrides the learning rate.
    pub fn learning_rate(mut self, v: f64) -> Self {
        match &mut self {
            Self::AdamW { lr, .. } | Self::Adam { lr } | Self::Sgd { lr } => *lr = v,
        }
        self
    }
}

/// Optimizers.
///
/// This is a thin wrapper of the optimizers of candle-nn and candle-optimisers.
pub enum Optimizer {
    /// AdamW optimizer.
    AdamW(AdamW),

    /// Adam optimizer.
    Adam(Adam),

    /// Stochastic gradient descent.
    Sgd(SGD),
}

impl Optimizer {
    /// Computes the gradients of `loss` and applies an update step.
    pub fn backward_step(&mut self, loss: &Tensor) -> Result<()> {
        match self {
            Self::AdamW(opt) => opt.backward_step(loss)?,
            Self::Adam(opt) => opt.backward_step(loss)?,
            Self::Sgd(opt) => opt.backward_step(loss)?,
        }
        Ok(())
    }
}
