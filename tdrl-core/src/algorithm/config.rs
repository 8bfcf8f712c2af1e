//! Configuration shared by the learning algorithms.
use crate::error::TdError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration shared by all [`TdAlgorithm`](super::TdAlgorithm)s.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TdConfig {
    /// Discount factor in `[0, 1]`.
    pub discount: f32,

    /// Maximum number of transitions per episode.
    pub episode_length: usize,
}

impl Default for TdConfig {
    fn default() -> Self {
        Self {
            discount: 0.99,
            episode_length: 1000,
        }
    }
}

impl TdConfig {
    /// Sets the discount factor.
    pub fn discount(mut self, v: f32) -> Self {
        self.discount = v;
        self
    }

    /// Sets the maximum number of transitions per episode.
    pub fn episode_length(mut self, v: usize) -> Self {
        self.episode_length = v;
        self
    }

    /// Checks the discount factor and the episode length.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(TdError::InvalidConfig(format!(
                "discount ({}) is not in [0, 1]",
                self.discount
            ))
            .into());
        }
        if self.episode_length == 0 {
            return Err(
                TdError::InvalidConfig("episode_length must be positive".to_string()).into(),
            );
        }
        Ok(())
    }

    /// Constructs [`TdConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TdConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Checks that a trace decay lies in `[0, 1]`.
pub(super) fn validate_decay(decay: f32) -> Result<()> {
    if (0.0..=1.0).contains(&decay) {
        Ok(())
    } else {
        Err(TdError::InvalidConfig(format!("decay ({}) is not in [0, 1]", decay)).into())
    }
}
