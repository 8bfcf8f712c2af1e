use crate::{mlp::MlpConfig, opt::OptimizerConfig, util::CriticLoss, Device};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`MlpPredictor`](super::MlpPredictor).
///
/// # Examples
///
/// ```rust
/// use tdrl_candle_agent::{mlp::MlpConfig, opt::OptimizerConfig, MlpPredictorConfig};
///
/// let config = MlpPredictorConfig::default()
///     .mlp_config(MlpConfig::new(4, vec![64, 64], 2, false))
///     .opt_config(OptimizerConfig::default().learning_rate(1e-3));
/// ```
pub struct MlpPredictorConfig {
    /// Architecture of the network.
    pub mlp_config: Option<MlpConfig>,

    /// Optimizer used in [`QPredictor::fit`](tdrl_core::QPredictor::fit).
    pub opt_config: OptimizerConfig,

    /// Loss between predictions and targets.
    pub critic_loss: CriticLoss,

    /// Device the parameters live on.
    pub device: Device,

    /// Seed of the random number generator shuffling minibatches.
    pub seed: u64,
}

impl Default for MlpPredictorConfig {
    fn default() -> Self {
        Self {
            mlp_config: None,
            opt_config: OptimizerConfig::default(),
            critic_loss: CriticLoss::Mse,
            device: Device::Cpu,
            seed: 42,
        }
    }
}

impl MlpPredictorConfig {
    /// Sets the architecture of the network.
    pub fn mlp_config(mut self, v: MlpConfig) -> Self {
        self.mlp_config = Some(v);
        self
    }

    /// Sets the optimizer configuration.
    pub fn opt_config(mut self, v: OptimizerConfig) -> Self {
        self.opt_config = v;
        self
    }

    /// Sets the loss function.
    pub fn critic_loss(mut self, v: CriticLoss) -> Self {
        self.critic_loss = v;
        self
    }

    /// Sets the device.
    pub fn device(mut self, v: Device) -> Self {
        self.device = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Constructs [`MlpPredictorConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`MlpPredictorConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_mlp_predictor_config() -> Result<()> {
        let config = MlpPredictorConfig::default()
            .mlp_config(MlpConfig::new(4, vec![16], 2, false))
            .opt_config(OptimizerConfig::Sgd { lr: 0.1 })
            .critic_loss(CriticLoss::SmoothL1)
            .seed(7);

        let dir = TempDir::new("mlp_predictor_config")?;
        let path = dir.path().join("mlp_predictor_config.yaml");
        config.save(&path)?;
        assert_eq!(MlpPredictorConfig::load(&path)?, config);
        Ok(())
    }
}
