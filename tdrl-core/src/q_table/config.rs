//! Configuration of [`QTable`](super::QTable).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// How the action values of an unseen state are initialized.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum Initializer {
    /// All zeros.
    Zeros,

    /// A constant for every action, e.g. optimistic initial values.
    Constant(f32),

    /// Independent draws from the uniform distribution on `[low, high)`.
    Uniform {
        /// Lower bound.
        low: f32,
        /// Upper bound.
        high: f32,
        /// Seed of the random number generator owned by the table.
        seed: u64,
    },
}

impl Default for Initializer {
    fn default() -> Self {
        Self::Zeros
    }
}

/// Configuration of [`QTable`](super::QTable).
///
/// The learning rate is not part of the configuration since it can be an arbitrary
/// function of the episode; it is given to [`QTable::build`](super::QTable::build)
/// as a [`Schedule`](crate::schedule::Schedule).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct QTableConfig {
    /// Lower bound of a single update `alpha * error`.
    pub clip_min: f32,

    /// Upper bound of a single update `alpha * error`.
    pub clip_max: f32,

    /// Initial values of unseen states.
    pub initializer: Initializer,
}

impl Default for QTableConfig {
    fn default() -> Self {
        Self {
            clip_min: f32::NEG_INFINITY,
            clip_max: f32::INFINITY,
            initializer: Initializer::Zeros,
        }
    }
}

impl QTableConfig {
    /// Sets the lower bound of updates.
    pub fn clip_min(mut self, v: f32) -> Self {
        self.clip_min = v;
        self
    }

    /// Sets the upper bound of updates.
    pub fn clip_max(mut self, v: f32) -> Self {
        self.clip_max = v;
        self
    }

    /// Sets the initializer of unseen states.
    pub fn initializer(mut self, v: Initializer) -> Self {
        self.initializer = v;
        self
    }

    /// Constructs [`QTableConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`QTableConfig`].
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
    fn test_serde_q_table_config() -> Result<()> {
        let config = QTableConfig::default()
            .clip_min(-1.0)
            .clip_max(2.0)
            .initializer(Initializer::Uniform {
                low: -0.5,
                high: 0.5,
                seed: 7,
            });

        let dir = TempDir::new("q_table_config")?;
        let path = dir.path().join("q_table_config.yaml");
        config.save(&path)?;
        let config_ = QTableConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
