//! Epsilon-greedy action selection.
use crate::{schedule::Schedule, Episodic, Policy, QFunction, Task};
use anyhow::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Selects a uniformly random action with probability epsilon, otherwise the greedy one.
///
/// Epsilon follows a [`Schedule`] evaluated at the end of each episode.
pub struct EpsilonGreedy {
    schedule: Schedule,
    epsilon: f32,
    rng: StdRng,
}

impl EpsilonGreedy {
    /// Constructs the policy with a constant exploration rate.
    pub fn new(epsilon: f32, seed: u64) -> Self {
        Self::with_schedule(Schedule::constant(epsilon), seed)
    }

    /// Constructs the policy with a per-episode schedule of the exploration rate.
    ///
    /// `seed` is the seed of the random number generator owned by the policy.
    pub fn with_schedule(schedule: Schedule, seed: u64) -> Self {
        Self {
            epsilon: schedule.value(0),
            schedule,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns epsilon of the current episode.
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }
}

impl Episodic for EpsilonGreedy {
    fn clear(&mut self) -> Result<()> {
        self.epsilon = self.schedule.value(0);
        Ok(())
    }

    fn finish_episode(&mut self, episode: usize) -> Result<()> {
        self.epsilon = self.schedule.value(episode);
        Ok(())
    }
}

impl<S> Policy<S> for EpsilonGreedy {
    fn act<Q, T>(&mut self, q: &mut Q, task: &T, state: &S) -> Result<usize>
    where
        Q: QFunction<S> + ?Sized,
        T: Task + ?Sized,
    {
        if self.rng.gen::<f32>() < self.epsilon {
            Ok(self.rng.gen_range(0..task.valid_actions()))
        } else {
            q.max_action(state)
        }
    }

    fn distribution<Q, T>(&mut self, q: &mut Q, task: &T, state: &S) -> Result<Vec<f32>>
    where
        Q: QFunction<S> + ?Sized,
        T: Task + ?Sized,
    {
        let n = task.valid_actions();
        let mut probs = vec![self.epsilon / n as f32; n];
        probs[q.max_action(state)?] += 1.0 - self.epsilon;
        Ok(probs)
    }
}
