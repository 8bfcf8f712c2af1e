//! Configuration of [`Trainer`](super::Trainer).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Trainer`](super::Trainer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// Number of episodes per trial.
    pub episodes: usize,

    /// Number of independent trials run by [`Trainer::train_many`](super::Trainer::train_many).
    pub trials: usize,

    /// Interval of storing episode records, in episodes.
    pub record_interval: usize,

    /// Interval of flushing the recorder, in episodes.
    pub flush_record_interval: usize,

    /// Interval of evaluation, in episodes. `0` disables evaluation.
    pub eval_interval: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            episodes: 0,
            trials: 1,
            record_interval: 1,
            flush_record_interval: usize::MAX,
            eval_interval: 0,
        }
    }
}

impl TrainerConfig {
    /// Sets the number of episodes per trial.
    pub fn episodes(mut self, v: usize) -> Self {
        self.episodes = v;
        self
    }

    /// Sets the number of trials.
    pub fn trials(mut self, v: usize) -> Self {
        self.trials = v;
        self
    }

    /// Sets the interval of storing episode records.
    pub fn record_interval(mut self, v: usize) -> Self {
        self.record_interval = v;
        self
    }

    /// Sets the interval of flushing the recorder.
    pub fn flush_record_interval(mut self, v: usize) -> Self {
        self.flush_record_interval = v;
        self
    }

    /// Sets the interval of evaluation.
    pub fn eval_interval(mut self, v: usize) -> Self {
        self.eval_interval = v;
        self
    }

    /// Constructs [`TrainerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
