//! Utilities.
use anyhow::{anyhow, Result};
use candle_core::{DType, Tensor};
use candle_nn::VarMap;
use serde::{Deserialize, Serialize};
use tdrl_core::record::{Record, RecordValue};
mod named_tensors;
pub use named_tensors::NamedTensors;

/// Loss between predicted and target action values.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum CriticLoss {
    /// Mean squared error.
    Mse,

    /// Smooth L1 loss.
    SmoothL1,
}

impl CriticLoss {
    /// Computes the loss averaged over all elements.
    pub fn compute(&self, pred: &Tensor, target: &Tensor) -> Result<Tensor> {
        let loss = match self {
            Self::Mse => candle_nn::loss::mse(pred, target)?,
            Self::SmoothL1 => smooth_l1_loss(pred, target)?,
        };
        Ok(loss)
    }
}

/// See <https://pytorch.org/docs/stable/generated/torch.nn.SmoothL1Loss.html>.
pub fn smooth_l1_loss(x: &Tensor, y: &Tensor) -> Result<Tensor, candle_core::Error> {
    let d = (x - y)?.abs()?;
    let m1 = d.lt(1.0)?.to_dtype(DType::F32)?;
    let m2 = m1.affine(-1.0, 1.0)?;
    (((0.5 * m1)? * d.powf(2.0))? + (m2 * (d - 0.5)?)?)?.mean_all()
}

/// Returns the standard deviation of a tensor.
pub fn std(t: &Tensor) -> Result<f32> {
    let d = t.broadcast_sub(&t.mean_all()?)?;
    Ok(d.sqr()?.mean_all()?.sqrt()?.to_vec0::<f32>()?)
}

/// Returns the mean and standard deviation of the parameters.
///
/// Keys are `<name>_mean` and `<name>_std`.
pub fn param_stats(varmap: &VarMap) -> Result<Record> {
    let data = varmap
        .data()
        .lock()
        .map_err(|e| anyhow!("failed to lock variables: {}", e))?;
    let mut record = Record::empty();

    for (k, v) in data.iter() {
        let m = v.mean_all()?.to_vec0::<f32>()?;
        record.insert(format!("{}_mean", k), RecordValue::Scalar(m));
        record.insert(format!("{}_std", k), RecordValue::Scalar(std(v.as_tensor())?));
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::Device;
    use candle_nn::Init;

    #[test]
    fn test_smooth_l1_loss() -> Result<()> {
        let x = Tensor::from_slice(&[0.0f32, 0.0, 0.0, 0.0], (2, 2), &Device::Cpu)?;
        let y = Tensor::from_slice(&[0.5f32, -0.5, 2.0, -3.0], (2, 2), &Device::Cpu)?;
        let loss = smooth_l1_loss(&x, &y)?.to_vec0::<f32>()?;
        // 0.125, 0.125, 1.5, 2.5
        assert!((loss - 1.0625).abs() < 1e-6);

        let mse = CriticLoss::Mse.compute(&x, &y)?.to_vec0::<f32>()?;
        assert!((mse - (0.25 + 0.25 + 4.0 + 9.0) / 4.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_param_stats() -> Result<()> {
        let varmap = VarMap::new();
        varmap.get((2, 2), "w", Init::Const(3.0), DType::F32, &Device::Cpu)?;
        let record = param_stats(&varmap)?;
        assert_eq!(record.get_scalar("w_mean")?, 3.0);
        assert_eq!(record.get_scalar("w_std")?, 0.0);
        Ok(())
    }
}
