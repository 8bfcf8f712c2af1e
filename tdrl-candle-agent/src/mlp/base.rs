use super::MlpConfig;
use anyhow::{anyhow, Result};
use candle_core::Tensor;
use candle_nn::{linear, Linear, Module, VarBuilder, VarMap};
use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};

/// Multilayer perceptron with ReLU activation function.
///
/// The parameters live in the [`VarMap`](candle_nn::VarMap) behind the
/// [`VarBuilder`] given to [`Mlp::build`], under the names `mlp.ln<i>.weight` and
/// `mlp.ln<i>.bias`.
pub struct Mlp {
    config: MlpConfig,
    layers: Vec<Linear>,
}

impl Mlp {
    /// Builds the network, creating its variables with `vb`.
    pub fn build(vb: VarBuilder, config: MlpConfig) -> Result<Self> {
        let vb = vb.pp("mlp");
        let layers = config
            .layer_dims()
            .into_iter()
            .enumerate()
            .map(|(i, (in_dim, out_dim))| linear(in_dim, out_dim, vb.pp(format!("ln{}", i))))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { config, layers })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MlpConfig {
        &self.config
    }

    /// Maps a batch of inputs `(batch, in_dim)` to outputs `(batch, out_dim)`.
    pub fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        let n_layers = self.layers.len();
        let mut xs = xs.clone();

        for (i, layer) in self.layers.iter().enumerate() {
            xs = layer.forward(&xs)?;
            if i + 1 < n_layers || self.config.activation_out {
                xs = xs.relu()?;
            }
        }

        Ok(xs)
    }
}

/// Draws the parameters of an [`Mlp`] built on `varmap` from `rng`.
///
/// Weights and biases of a layer follow `U(-1/sqrt(in_dim), 1/sqrt(in_dim))`.
pub fn init_parameters(varmap: &VarMap, config: &MlpConfig, rng: &mut impl Rng) -> Result<()> {
    let vars = varmap
        .data()
        .lock()
        .map_err(|e| anyhow!("failed to lock variables: {}", e))?;

    for (i, (in_dim, out_dim)) in config.layer_dims().into_iter().enumerate() {
        let bound = 1.0 / (in_dim as f32).sqrt();
        let dist = Uniform::new_inclusive(-bound, bound);
        let params = [
            (format!("mlp.ln{}.weight", i), vec![out_dim, in_dim]),
            (format!("mlp.ln{}.bias", i), vec![out_dim]),
        ];
        for (name, shape) in params.iter() {
            let var = vars
                .get(name)
                .ok_or_else(|| anyhow!("no variable named {}", name))?;
            let n = shape.iter().product::<usize>();
            let data = (0..n).map(|_| dist.sample(&mut *rng)).collect::<Vec<f32>>();
            var.set(&Tensor::from_vec(data, shape.as_slice(), var.device())?)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{DType, Device};
    use candle_nn::VarMap;

    #[test]
    fn test_forward_shape() -> Result<()> {
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
        let mlp = Mlp::build(vb, MlpConfig::new(3, vec![8], 2, true))?;

        let xs = Tensor::zeros((5, 3), DType::F32, &Device::Cpu)?;
        let ys = mlp.forward(&xs)?;
        assert_eq!(ys.dims(), &[5, 2]);
        assert!(ys.to_vec2::<f32>()?.iter().flatten().all(|y| *y >= 0.0));

        // Two layers with weight and bias each
        assert_eq!(varmap.all_vars().len(), 4);
        Ok(())
    }

    #[test]
    fn test_init_parameters_bounds() -> Result<()> {
        use rand::{rngs::StdRng, SeedableRng};

        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
        let config = MlpConfig::new(4, vec![], 3, false);
        let _mlp = Mlp::build(vb, config.clone())?;
        init_parameters(&varmap, &config, &mut StdRng::seed_from_u64(0))?;

        for var in varmap.all_vars() {
            let v = var.as_tensor().flatten_all()?.to_vec1::<f32>()?;
            assert!(v.iter().all(|x| x.abs() <= 0.5));
        }
        Ok(())
    }
}
