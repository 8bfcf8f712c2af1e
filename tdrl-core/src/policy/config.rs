//! Configuration of exploration policies.
use super::{Boltzmann, EpsilonGreedy, Greedy, Pursuit, StateKey};
use crate::{schedule::ScheduleConfig, Episodic, Policy, QFunction, Task};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Serializable description of an exploration policy.
///
/// # Examples
///
/// ```rust
/// use tdrl_core::{policy::PolicyConfig, schedule::ScheduleConfig};
///
/// let config = PolicyConfig::EpsilonGreedy {
///     epsilon: ScheduleConfig::Linear { start: 1.0, end: 0.05, episodes: 500 },
///     seed: 42,
/// };
/// let policy = config.build::<usize>();
/// ```
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum PolicyConfig {
    /// [`EpsilonGreedy`].
    EpsilonGreedy {
        /// Schedule of the exploration rate.
        epsilon: ScheduleConfig,
        /// Random seed.
        seed: u64,
    },

    /// [`Boltzmann`].
    Boltzmann {
        /// Schedule of the temperature.
        temperature: ScheduleConfig,
        /// Random seed.
        seed: u64,
    },

    /// [`Pursuit`].
    Pursuit {
        /// Schedule of the pursuit rate.
        beta: ScheduleConfig,
        /// Random seed.
        seed: u64,
    },

    /// [`Greedy`].
    Greedy,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::EpsilonGreedy {
            epsilon: ScheduleConfig::default(),
            seed: 42,
        }
    }
}

impl PolicyConfig {
    /// Builds the policy.
    pub fn build<S: StateKey>(&self) -> ExplorationPolicy<S> {
        match self {
            Self::EpsilonGreedy { epsilon, seed } => ExplorationPolicy::EpsilonGreedy(
                EpsilonGreedy::with_schedule(epsilon.build(), *seed),
            ),
            Self::Boltzmann { temperature, seed } => ExplorationPolicy::Boltzmann(
                Boltzmann::with_schedule(temperature.build(), *seed),
            ),
            Self::Pursuit { beta, seed } => {
                ExplorationPolicy::Pursuit(Pursuit::with_schedule(beta.build(), *seed))
            }
            Self::Greedy => ExplorationPolicy::Greedy(Greedy),
        }
    }

    /// Constructs [`PolicyConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`PolicyConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Exploration policies selectable at runtime.
pub enum ExplorationPolicy<S: StateKey> {
    /// Epsilon-greedy.
    EpsilonGreedy(EpsilonGreedy),

    /// Softmax.
    Boltzmann(Boltzmann),

    /// Pursuit.
    Pursuit(Pursuit<S>),

    /// Greedy.
    Greedy(Greedy),
}

impl<S: StateKey> Episodic for ExplorationPolicy<S> {
    fn clear(&mut self) -> Result<()> {
        match self {
            Self::EpsilonGreedy(p) => p.clear(),
            Self::Boltzmann(p) => p.clear(),
            Self::Pursuit(p) => p.clear(),
            Self::Greedy(p) => p.clear(),
        }
    }

    fn finish_episode(&mut self, episode: usize) -> Result<()> {
        match self {
            Self::EpsilonGreedy(p) => p.finish_episode(episode),
            Self::Boltzmann(p) => p.finish_episode(episode),
            Self::Pursuit(p) => p.finish_episode(episode),
            Self::Greedy(p) => p.finish_episode(episode),
        }
    }
}

impl<S: StateKey> Policy<S> for ExplorationPolicy<S> {
    fn act<Q, T>(&mut self, q: &mut Q, task: &T, state: &S) -> Result<usize>
    where
        Q: QFunction<S> + ?Sized,
        T: Task + ?Sized,
    {
        match self {
            Self::EpsilonGreedy(p) => p.act(q, task, state),
            Self::Boltzmann(p) => p.act(q, task, state),
            Self::Pursuit(p) => p.act(q, task, state),
            Self::Greedy(p) => p.act(q, task, state),
        }
    }

    fn distribution<Q, T>(&mut self, q: &mut Q, task: &T, state: &S) -> Result<Vec<f32>>
    where
        Q: QFunction<S> + ?Sized,
        T: Task + ?Sized,
    {
        match self {
            Self::EpsilonGreedy(p) => p.distribution(q, task, state),
            Self::Boltzmann(p) => p.distribution(q, task, state),
            Self::Pursuit(p) => p.distribution(q, task, state),
            Self::Greedy(p) => p.distribution(q, task, state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dummy::Bandit,
        q_table::{QTable, QTableConfig},
        schedule::Schedule,
    };
    use tempdir::TempDir;

    #[test]
    fn test_serde_policy_config() -> Result<()> {
        let config = PolicyConfig::Pursuit {
            beta: ScheduleConfig::Exponential {
                start: 0.5,
                decay: 0.99,
                min: 0.01,
            },
            seed: 3,
        };
        let dir = TempDir::new("policy_config")?;
        let path = dir.path().join("policy_config.yaml");
        config.save(&path)?;
        assert_eq!(config, PolicyConfig::load(&path)?);
        Ok(())
    }

    #[test]
    fn test_build_and_dispatch() -> Result<()> {
        let task = Bandit::new(vec![0.0; 3]);
        let mut q = QTable::build(&QTableConfig::default(), 3, Schedule::constant(1.0))?;
        q.update_all(&0, &[0.0, 0.0, 1.0]);

        let mut policy = PolicyConfig::Greedy.build::<usize>();
        assert_eq!(policy.act(&mut q, &task, &0)?, 2);

        let config = PolicyConfig::EpsilonGreedy {
            epsilon: ScheduleConfig::Constant { value: 0.3 },
            seed: 0,
        };
        let mut policy = config.build::<usize>();
        let p = policy.distribution(&mut q, &task, &0)?;
        assert!((p[2] - 0.8).abs() < 1e-6);
        Ok(())
    }
}
