//! Configuration of [`DeepQ`](super::DeepQ).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`DeepQ`](super::DeepQ).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct DeepQConfig {
    /// If `true`, maintains a separate action network for selecting next actions.
    pub double: bool,

    /// Number of passes over each minibatch when fitting the network.
    pub train_epochs: usize,
}

impl Default for DeepQConfig {
    fn default() -> Self {
        Self {
            double: false,
            train_epochs: 1,
        }
    }
}

impl DeepQConfig {
    /// Sets whether double Q-learning is used.
    pub fn double(mut self, v: bool) -> Self {
        self.double = v;
        self
    }

    /// Sets the number of epochs per minibatch.
    pub fn train_epochs(mut self, v: usize) -> Self {
        self.train_epochs = v;
        self
    }

    /// Constructs [`DeepQConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`DeepQConfig`].
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
    fn test_serde_deep_q_config() -> Result<()> {
        let config = DeepQConfig::default().double(true).train_epochs(3);

        let dir = TempDir::new("deep_q_config")?;
        let path = dir.path().join("deep_q_config.yaml");
        config.save(&path)?;
        assert_eq!(DeepQConfig::load(&path)?, config);
        Ok(())
    }
}
