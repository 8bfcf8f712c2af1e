//! Pursuit action selection.
use crate::{schedule::Schedule, util::sample_index, Episodic, Policy, QFunction, Task};
use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use std::{collections::HashMap, hash::Hash};

/// States that can key a table of per-state preferences.
///
/// Vectors of floats are keyed by their bit patterns, so vector-encoded states of
/// neural value functions can be used with [`Pursuit`] as well.
pub trait StateKey {
    /// Hashable key of the state.
    type Key: Hash + Eq;

    /// Returns the key of the state.
    fn state_key(&self) -> Self::Key;
}

macro_rules! impl_state_key {
    ($($t:ty),*) => {
        $(
            impl StateKey for $t {
                type Key = $t;

                fn state_key(&self) -> Self::Key {
                    self.clone()
                }
            }
        )*
    };
}

impl_state_key!(
    usize,
    u8,
    u16,
    u32,
    u64,
    isize,
    i8,
    i16,
    i32,
    i64,
    bool,
    char,
    String,
    (usize, usize),
    Vec<usize>,
    Vec<i32>
);

impl StateKey for Vec<f32> {
    type Key = Vec<u32>;

    fn state_key(&self) -> Self::Key {
        // `+ 0.0` maps -0.0 to 0.0.
        self.iter().map(|x| (x + 0.0).to_bits()).collect()
    }
}

impl StateKey for Vec<f64> {
    type Key = Vec<u64>;

    fn state_key(&self) -> Self::Key {
        self.iter().map(|x| (x + 0.0).to_bits()).collect()
    }
}

/// Keeps a preference distribution per state and moves it toward the greedy action.
///
/// Preferences start uniform. Each call to [`Policy::act`] samples from the current
/// preferences of the state, then moves them by a fraction `beta` toward the one-hot
/// vector of the greedy action: `p[a] <- p[a] + beta * (1[a = greedy] - p[a])`.
/// The update keeps the preferences a probability distribution.
pub struct Pursuit<S: StateKey> {
    schedule: Schedule,
    beta: f32,
    preferences: HashMap<S::Key, Vec<f32>>,
    rng: StdRng,
}

impl<S: StateKey> Pursuit<S> {
    /// Constructs the policy with a constant pursuit rate in `[0, 1]`.
    pub fn new(beta: f32, seed: u64) -> Self {
        Self::with_schedule(Schedule::constant(beta), seed)
    }

    /// Constructs the policy with a per-episode schedule of the pursuit rate in `[0, 1]`.
    ///
    /// `seed` is the seed of the random number generator owned by the policy.
    pub fn with_schedule(schedule: Schedule, seed: u64) -> Self {
        Self {
            beta: schedule.value(0),
            schedule,
            preferences: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the pursuit rate of the current episode.
    pub fn beta(&self) -> f32 {
        self.beta
    }

    /// Returns the preferences at `state`, if the state has been visited.
    pub fn preferences(&self, state: &S) -> Option<&[f32]> {
        self.preferences.get(&state.state_key()).map(|p| p.as_slice())
    }

    fn row(&mut self, state: &S, n_actions: usize) -> &mut Vec<f32> {
        self.preferences
            .entry(state.state_key())
            .or_insert_with(|| vec![1.0 / n_actions as f32; n_actions])
    }
}

impl<S: StateKey> Episodic for Pursuit<S> {
    /// Forgets all preferences and resets the pursuit rate.
    fn clear(&mut self) -> Result<()> {
        self.beta = self.schedule.value(0);
        self.preferences.clear();
        Ok(())
    }

    fn finish_episode(&mut self, episode: usize) -> Result<()> {
        self.beta = self.schedule.value(episode);
        Ok(())
    }
}

impl<S: StateKey> Policy<S> for Pursuit<S> {
    fn act<Q, T>(&mut self, q: &mut Q, task: &T, state: &S) -> Result<usize>
    where
        Q: QFunction<S> + ?Sized,
        T: Task + ?Sized,
    {
        let n = task.valid_actions();
        let probs = self.row(state, n).clone();
        let action = sample_index(&mut self.rng, &probs)?;

        let greedy = q.max_action(state)?;
        let beta = self.beta;
        self.row(state, n).iter_mut().enumerate().for_each(|(a, p)| {
            if a == greedy {
                *p += beta * (1.0 - *p);
            } else {
                *p *= 1.0 - beta;
            }
        });

        Ok(action)
    }

    fn distribution<Q, T>(&mut self, _q: &mut Q, task: &T, state: &S) -> Result<Vec<f32>>
    where
        Q: QFunction<S> + ?Sized,
        T: Task + ?Sized,
    {
        Ok(self.row(state, task.valid_actions()).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dummy::Bandit,
        q_table::{QTable, QTableConfig},
    };

    #[test]
    fn test_preferences_pursue_greedy_action() -> Result<()> {
        let task = Bandit::new(vec![0.0; 3]);
        let mut q = QTable::build(&QTableConfig::default(), 3, Schedule::constant(1.0))?;
        q.update_all(&0, &[0.0, 1.0, 0.0]);
        let mut policy = Pursuit::new(0.5, 0);

        let p = policy.distribution(&mut q, &task, &0)?;
        p.iter().for_each(|v| assert!((v - 1.0 / 3.0).abs() < 1e-6));

        policy.act(&mut q, &task, &0)?;
        let p = policy.preferences(&0).unwrap().to_vec();
        assert!((p[0] - 1.0 / 6.0).abs() < 1e-6);
        assert!((p[1] - 2.0 / 3.0).abs() < 1e-6);
        assert!((p[2] - 1.0 / 6.0).abs() < 1e-6);

        for _ in 0..50 {
            policy.act(&mut q, &task, &0)?;
        }
        let p = policy.preferences(&0).unwrap();
        assert!((p.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert!(p[1] > 0.999);
        Ok(())
    }

    #[test]
    fn test_clear_forgets_preferences() -> Result<()> {
        let task = Bandit::new(vec![0.0; 2]);
        let mut q = QTable::build(&QTableConfig::default(), 2, Schedule::constant(1.0))?;
        let schedule = Schedule::new(|e| if e == 0 { 0.1 } else { 0.3 });
        let mut policy = Pursuit::with_schedule(schedule, 0);
        policy.act(&mut q, &task, &0)?;
        policy.finish_episode(1)?;
        assert_eq!(policy.beta(), 0.3);

        policy.clear()?;
        assert!(policy.preferences(&0).is_none());
        assert_eq!(policy.beta(), 0.1);
        Ok(())
    }

    #[test]
    fn test_vector_states_share_preferences_by_value() -> Result<()> {
        assert_eq!(vec![-0.0f32, 1.5].state_key(), vec![0.0f32, 1.5].state_key());
        assert_ne!(vec![0.0f32, 1.5].state_key(), vec![1.5f32, 0.0].state_key());

        // Prefers action 1 everywhere.
        struct Fixed;

        impl Episodic for Fixed {
            fn clear(&mut self) -> Result<()> {
                Ok(())
            }

            fn finish_episode(&mut self, _: usize) -> Result<()> {
                Ok(())
            }
        }

        impl QFunction<Vec<f32>> for Fixed {
            fn values(&mut self, _: &Vec<f32>) -> Result<Vec<f32>> {
                Ok(vec![0.0, 1.0])
            }
        }

        let task = Bandit::new(vec![0.0; 2]);
        let mut q = Fixed;
        let mut policy = Pursuit::new(0.5, 0);
        policy.act(&mut q, &task, &vec![1.0f32, 0.0])?;
        assert_eq!(policy.preferences(&vec![1.0f32, 0.0]), Some(&[0.25, 0.75][..]));
        assert!(policy.preferences(&vec![0.0f32, 1.0]).is_none());
        Ok(())
    }
}
