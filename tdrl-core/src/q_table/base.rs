//! Hash-table implementation of an action-value function.
use super::{Initializer, QTableConfig};
use crate::{
    error::TdError,
    schedule::Schedule,
    util::{argmax, max},
    Episodic, QFunction,
};
use anyhow::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{collections::HashMap, hash::Hash};

/// A hash-table implementation of a Q-value table.
///
/// States are stored as keys and must be hashable. Every row has exactly
/// `n_actions` entries. Reading and writing take constant time.
pub struct QTable<S> {
    /// Number of actions.
    n_actions: usize,

    /// Lower bound of a single update.
    clip_min: f32,

    /// Upper bound of a single update.
    clip_max: f32,

    /// Initial values of unseen states.
    initializer: Initializer,

    /// Learning rate as a function of the episode.
    learning_rate: Schedule,

    /// Learning rate of the current episode.
    alpha: f32,

    /// Action values of materialized states.
    table: HashMap<S, Vec<f32>>,

    /// Random number generator for [`Initializer::Uniform`].
    rng: StdRng,
}

fn init_row(n_actions: usize, initializer: &Initializer, rng: &mut StdRng) -> Vec<f32> {
    match initializer {
        Initializer::Zeros => vec![0f32; n_actions],
        Initializer::Constant(v) => vec![*v; n_actions],
        Initializer::Uniform { low, high, .. } => (0..n_actions)
            .map(|_| low + (high - low) * rng.gen::<f32>())
            .collect(),
    }
}

impl<S> QTable<S>
where
    S: Hash + Eq + Clone,
{
    /// Constructs a table for `n_actions` actions.
    pub fn build(config: &QTableConfig, n_actions: usize, learning_rate: Schedule) -> Result<Self> {
        if n_actions == 0 {
            return Err(TdError::InvalidConfig("n_actions must be positive".to_string()).into());
        }
        if config.clip_min > config.clip_max {
            return Err(TdError::InvalidConfig(format!(
                "clip_min ({}) is larger than clip_max ({})",
                config.clip_min, config.clip_max
            ))
            .into());
        }
        let seed = match config.initializer {
            Initializer::Uniform { seed, .. } => seed,
            _ => 0,
        };

        Ok(Self {
            n_actions,
            clip_min: config.clip_min,
            clip_max: config.clip_max,
            initializer: config.initializer.clone(),
            alpha: learning_rate.value(0),
            learning_rate,
            table: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Returns the row of `state`, materializing it if absent.
    fn row(&mut self, state: &S) -> &mut Vec<f32> {
        let Self {
            table,
            rng,
            initializer,
            n_actions,
            ..
        } = self;
        table
            .entry(state.clone())
            .or_insert_with(|| init_row(*n_actions, initializer, rng))
    }

    /// Returns the action values at `state`.
    pub fn values(&mut self, state: &S) -> &[f32] {
        self.row(state)
    }

    /// Returns the value of `action` at `state`.
    pub fn value(&mut self, state: &S, action: usize) -> f32 {
        self.row(state)[action]
    }

    /// Returns the index of the action with the largest value, the lowest on ties.
    pub fn max_action(&mut self, state: &S) -> usize {
        argmax(self.row(state))
    }

    /// Returns the largest action value at `state`.
    pub fn max_value(&mut self, state: &S) -> f32 {
        max(self.row(state))
    }

    /// Updates `Q[state][action] += clip(alpha * error, clip_min, clip_max)`.
    pub fn update(&mut self, state: &S, action: usize, error: f32) {
        let change = clip(self.alpha * error, self.clip_min, self.clip_max);
        self.row(state)[action] += change;
    }

    /// Updates all actions at `state` with one error per action, clipped componentwise.
    ///
    /// # Panics
    ///
    /// Panics if `errors.len()` differs from the number of actions.
    pub fn update_all(&mut self, state: &S, errors: &[f32]) {
        assert_eq!(errors.len(), self.n_actions);
        let (alpha, clip_min, clip_max) = (self.alpha, self.clip_min, self.clip_max);
        self.row(state)
            .iter_mut()
            .zip(errors.iter())
            .for_each(|(q, e)| *q += clip(alpha * e, clip_min, clip_max));
    }

    /// Returns the learning rate of the current episode.
    pub fn learning_rate(&self) -> f32 {
        self.alpha
    }

    /// Returns the number of actions.
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    /// Returns the number of materialized states.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if no state has been materialized.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<S> Episodic for QTable<S>
where
    S: Hash + Eq + Clone,
{
    /// Discards all entries and resets the learning rate to its value at episode 0.
    fn clear(&mut self) -> Result<()> {
        self.alpha = self.learning_rate.value(0);
        self.table.clear();
        Ok(())
    }

    fn finish_episode(&mut self, episode: usize) -> Result<()> {
        self.alpha = self.learning_rate.value(episode);
        Ok(())
    }
}

impl<S> QFunction<S> for QTable<S>
where
    S: Hash + Eq + Clone,
{
    fn values(&mut self, state: &S) -> Result<Vec<f32>> {
        Ok(self.row(state).clone())
    }

    fn max_action(&mut self, state: &S) -> Result<usize> {
        Ok(argmax(self.row(state)))
    }

    fn max_value(&mut self, state: &S) -> Result<f32> {
        Ok(max(self.row(state)))
    }
}

/// Clamps `v` into `[min, max]`, keeping NaN as NaN.
fn clip(v: f32, min: f32, max: f32) -> f32 {
    if v.is_nan() {
        v
    } else {
        v.min(max).max(min)
    }
}
