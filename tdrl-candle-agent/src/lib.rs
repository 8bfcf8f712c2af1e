//! Neural action-value functions implemented with [candle](https://crates.io/crates/candle-core).
//!
//! [`MlpPredictor`] implements [`QPredictor`](tdrl_core::QPredictor), so it can be
//! plugged into [`DeepQ`](tdrl_core::deep_q::DeepQ) and trained with
//! [`DeepQLearning`](tdrl_core::algorithm::DeepQLearning).
pub mod mlp;
pub mod opt;
mod predictor;
pub mod util;
use anyhow::Result;
pub use predictor::{MlpPredictor, MlpPredictorConfig};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Copy, Deserialize, Serialize, PartialEq)]
/// Device for using candle.
///
/// This enum is added because [`candle_core::Device`] does not support serialization.
pub enum Device {
    /// The main CPU device.
    Cpu,

    /// The GPU device with the given ordinal.
    Cuda(usize),
}

impl Default for Device {
    fn default() -> Self {
        Self::Cpu
    }
}

impl Device {
    /// Creates the candle device.
    ///
    /// Fails for [`Device::Cuda`] if candle was built without CUDA support.
    pub fn build(&self) -> Result<candle_core::Device> {
        match self {
            Self::Cpu => Ok(candle_core::Device::Cpu),
            Self::Cuda(n) => Ok(candle_core::Device::new_cuda(*n)?),
        }
    }
}
