use super::MlpPredictorConfig;
use crate::{
    mlp::{init_parameters, Mlp, MlpConfig},
    opt::Optimizer,
    util::{param_stats, NamedTensors},
};
use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::{VarBuilder, VarMap};
use log::{info, trace};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::path::Path;
use tdrl_core::{error::TdError, record::Record, QPredictor};

/// A multilayer perceptron mapping encoded states to action values.
///
/// The network owns its [`VarMap`] and its optimizer. Re-initialization builds both
/// again, so parameters and optimizer state are discarded together.
///
/// Initial parameters and minibatch order are drawn from a random number generator
/// seeded with [`MlpPredictorConfig::seed`], so predictors built from the same
/// configuration are identical.
pub struct MlpPredictor {
    config: MlpPredictorConfig,
    mlp_config: MlpConfig,
    device: Device,
    varmap: VarMap,
    mlp: Mlp,
    opt: Optimizer,
    rng: StdRng,
}

fn init(
    config: &MlpPredictorConfig,
    mlp_config: &MlpConfig,
    device: &Device,
    rng: &mut StdRng,
) -> Result<(VarMap, Mlp, Optimizer)> {
    let varmap = VarMap::new();
    let mlp = {
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, device);
        Mlp::build(vb, mlp_config.clone())?
    };
    init_parameters(&varmap, mlp_config, rng)?;
    let opt = config.opt_config.build(varmap.all_vars())?;
    Ok((varmap, mlp, opt))
}

impl MlpPredictor {
    /// Constructs the predictor.
    pub fn build(config: MlpPredictorConfig) -> Result<Self> {
        let mlp_config = config
            .mlp_config
            .clone()
            .context("mlp_config is not set.")?;
        let device = config.device.build()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let (varmap, mlp, opt) = init(&config, &mlp_config, &device, &mut rng)?;

        Ok(Self {
            rng,
            config,
            mlp_config,
            device,
            varmap,
            mlp,
            opt,
        })
    }

    /// Returns the variables of the network.
    pub fn varmap(&self) -> &VarMap {
        &self.varmap
    }

    /// Returns the mean and the standard deviation of every parameter.
    pub fn param_stats(&self) -> Result<Record> {
        param_stats(&self.varmap)
    }

    /// Saves the parameters in the safetensors format.
    pub fn save<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        self.varmap.save(&path)?;
        info!("Save predictor to {:?}", path.as_ref());
        Ok(())
    }

    /// Loads parameters saved with [`MlpPredictor::save`].
    pub fn load<T: AsRef<Path>>(&mut self, path: T) -> Result<()> {
        self.varmap.load(&path)?;
        info!("Load predictor from {:?}", path.as_ref());
        Ok(())
    }

    /// Stacks rows of length `dim` into a `(rows.len(), dim)` tensor.
    fn stack(&self, rows: &[Vec<f32>], dim: usize) -> Result<Tensor> {
        let mut data = Vec::with_capacity(rows.len() * dim);
        for row in rows.iter() {
            if row.len() != dim {
                return Err(TdError::ShapeMismatch {
                    expected: dim,
                    actual: row.len(),
                }
                .into());
            }
            data.extend_from_slice(row);
        }
        Ok(Tensor::from_vec(data, (rows.len(), dim), &self.device)?)
    }
}

impl QPredictor for MlpPredictor {
    type Params = NamedTensors;

    fn predict(&self, states: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        if states.is_empty() {
            return Ok(vec![]);
        }
        let xs = self.stack(states, self.mlp_config.in_dim)?;
        Ok(self.mlp.forward(&xs)?.to_vec2::<f32>()?)
    }

    fn fit(
        &mut self,
        states: &[Vec<f32>],
        targets: &[Vec<f32>],
        epochs: usize,
        batch_size: usize,
    ) -> Result<f32> {
        if states.len() != targets.len() {
            return Err(TdError::ShapeMismatch {
                expected: states.len(),
                actual: targets.len(),
            }
            .into());
        }
        let n = states.len();
        if n == 0 {
            return Ok(0.0);
        }
        let xs = self.stack(states, self.mlp_config.in_dim)?;
        let ys = self.stack(targets, self.mlp_config.out_dim)?;
        let batch_size = batch_size.max(1).min(n);
        let mut ixs = (0..n as u32).collect::<Vec<_>>();

        let mut loss = 0f32;
        for epoch in 0..epochs {
            ixs.shuffle(&mut self.rng);
            let mut sum = 0f32;
            let mut n_batches = 0;
            for chunk in ixs.chunks(batch_size) {
                let ix = Tensor::from_slice(chunk, (chunk.len(),), &self.device)?;
                let pred = self.mlp.forward(&xs.index_select(&ix, 0)?)?;
                let tgt = ys.index_select(&ix, 0)?;
                let l = self.config.critic_loss.compute(&pred, &tgt)?;
                self.opt.backward_step(&l)?;
                sum += l.to_scalar::<f32>()?;
                n_batches += 1;
            }
            loss = sum / n_batches as f32;
            trace!("epoch {}: loss = {}", epoch, loss);
        }

        Ok(loss)
    }

    fn clone_with_same_architecture(&self) -> Result<Self> {
        Self::build(self.config.clone())
    }

    fn parameters(&self) -> Result<NamedTensors> {
        NamedTensors::copy_from(&self.varmap)
    }

    fn set_parameters(&mut self, params: &NamedTensors) -> Result<()> {
        params.copy_to(&self.varmap)
    }

    fn reinitialize_parameters(&mut self) -> Result<()> {
        let (varmap, mlp, opt) =
            init(&self.config, &self.mlp_config, &self.device, &mut self.rng)?;
        self.varmap = varmap;
        self.mlp = mlp;
        self.opt = opt;
        Ok(())
    }
}
