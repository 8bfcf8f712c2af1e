use anyhow::{anyhow, Result};
use candle_core::{Device, Tensor};
use candle_nn::VarMap;
use std::collections::HashMap;

/// Snapshot of the variables of a [`VarMap`], keyed by variable name.
///
/// Tensors are copied to the CPU, so a snapshot does not share storage with the
/// variables it was taken from.
#[derive(Clone, Debug)]
pub struct NamedTensors {
    /// The copied tensors.
    pub named_tensors: HashMap<String, Tensor>,
}

impl NamedTensors {
    /// Copies the data of [`VarMap`] to the CPU.
    pub fn copy_from(vs: &VarMap) -> Result<Self> {
        let src = vs
            .data()
            .lock()
            .map_err(|e| anyhow!("failed to lock variables: {}", e))?;
        let named_tensors = src
            .iter()
            .map(|(k, v)| -> Result<(String, Tensor)> {
                Ok((k.clone(), v.as_tensor().to_device(&Device::Cpu)?.copy()?))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Self { named_tensors })
    }

    /// Copies the named tensors into the variables of [`VarMap`] with the same names.
    ///
    /// Fails if the names differ.
    pub fn copy_to(&self, vs: &VarMap) -> Result<()> {
        let dest = vs
            .data()
            .lock()
            .map_err(|e| anyhow!("failed to lock variables: {}", e))?;
        if dest.len() != self.named_tensors.len() {
            return Err(anyhow!(
                "{} tensors given for {} variables",
                self.named_tensors.len(),
                dest.len()
            ));
        }

        for (name, src) in self.named_tensors.iter() {
            let var = dest
                .get(name)
                .ok_or_else(|| anyhow!("no variable named {}", name))?;
            var.set(&src.to_device(var.device())?)?;
        }
        Ok(())
    }
}
