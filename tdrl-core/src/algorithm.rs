//! Temporal-difference learning algorithms.
//!
//! An algorithm generates one episode at a time on a [`Task`], selecting actions with
//! a [`Policy`](crate::Policy) and updating an action-value function as it goes.
//! All algorithms share the episode protocol:
//!
//! 1. The state is initialized with [`Task::initial_state`].
//! 2. For at most `episode_length` steps, an action is selected, the task performs the
//!    transition, the reward is recorded and the value function is updated.
//! 3. The episode stops early when the transition is terminal.
//!
//! The algorithms differ in when and how the value function is updated:
//!
//! * [`Sarsa`] - one-step on-policy update after every transition.
//! * [`MonteCarlo`] - full returns, applied in reverse after the episode.
//! * [`OfflineSarsaLambda`] - lambda-returns, applied in reverse after the episode.
//! * [`OnlineSarsaLambda`] - eligibility traces, applied after every transition.
//! * [`DeepQLearning`] - experience replay with a trainable value function.
//!
//! Training over many episodes and trials is done by [`Trainer`]; [`TdAlgorithm::train`]
//! and [`TdAlgorithm::train_many`] are shortcuts with default settings.
use crate::{
    error::TdError,
    q_table::QTable,
    record::Record,
    trainer::{History, Trainer, TrainerConfig},
    Episodic, Task,
};
use anyhow::Result;
use std::hash::Hash;
mod config;
mod deep_q_learning;
mod monte_carlo;
mod offline_sarsa_lambda;
mod online_sarsa_lambda;
mod sarsa;
pub use config::TdConfig;
pub use deep_q_learning::DeepQLearning;
pub use monte_carlo::MonteCarlo;
pub use offline_sarsa_lambda::OfflineSarsaLambda;
pub use online_sarsa_lambda::OnlineSarsaLambda;
pub use sarsa::Sarsa;

/// Result of a single episode.
#[derive(Clone, Debug)]
pub struct Episode {
    /// Number of transitions executed.
    pub steps: usize,

    /// Reward of every transition, `rewards.len() == steps`.
    pub rewards: Vec<f32>,

    /// Algorithm-specific metrics of the episode.
    pub record: Record,
}

impl Episode {
    /// Creates an episode from the rewards of its transitions.
    pub fn new(rewards: Vec<f32>, record: Record) -> Self {
        Self {
            steps: rewards.len(),
            rewards,
            record,
        }
    }
}

/// A temporal-difference learning algorithm.
///
/// `Q` is the action-value function being learned and `P` the exploration policy.
/// Implementations state the concrete requirements on both, e.g. tabular algorithms
/// take a [`QTable`](crate::q_table::QTable).
pub trait TdAlgorithm<T, Q, P>
where
    T: Task,
    Q: Episodic,
    P: Episodic,
{
    /// Resets the working variables of the algorithm.
    fn clear(&mut self) -> Result<()>;

    /// Returns the discount factor.
    fn discount(&self) -> f32;

    /// Generates one episode, updating `q` along the way.
    fn run_episode(&mut self, q: &mut Q, task: &mut T, policy: &mut P) -> Result<Episode>;

    /// Runs a single trial of `episodes` episodes.
    fn train(&mut self, q: &mut Q, task: &mut T, policy: &mut P, episodes: usize) -> Result<History>
    where
        Self: Sized,
    {
        let config = TrainerConfig::default().episodes(episodes);
        Trainer::build(config).train(self, q, task, policy)
    }

    /// Runs `trials` independent trials of `episodes` episodes and averages their histories.
    fn train_many(
        &mut self,
        q: &mut Q,
        task: &mut T,
        policy: &mut P,
        episodes: usize,
        trials: usize,
    ) -> Result<History>
    where
        Self: Sized,
    {
        let config = TrainerConfig::default().episodes(episodes).trials(trials);
        Trainer::build(config).train_many(self, q, task, policy)
    }
}

/// Fails if the task does not have as many actions as the table.
pub(super) fn check_actions<S, T>(q: &QTable<S>, task: &T) -> Result<()>
where
    S: Hash + Eq + Clone,
    T: Task + ?Sized,
{
    if task.valid_actions() != q.n_actions() {
        return Err(TdError::InvalidConfig(format!(
            "the task has {} actions but the table has {}",
            task.valid_actions(),
            q.n_actions()
        ))
        .into());
    }
    Ok(())
}
