//! Offline Sarsa(lambda).
use super::{
    config::validate_decay, monte_carlo::sample_episode, Episode, TdAlgorithm, TdConfig,
};
use crate::{q_table::QTable, record::Record, Policy, Task};
use anyhow::Result;
use std::hash::Hash;

/// Tabular offline lambda-return algorithm.
///
/// The whole episode is simulated first. Traversing backwards from the last step `T`,
/// the lambda-return is
///
/// ```text
/// G[T] = r[T]
/// G[t] = r[t] + gamma * ((1 - lambda) * Q(s[t+1], a[t+1]) + lambda * G[t+1])
/// ```
///
/// and `Q(s[t], a[t])` moves toward `G[t]` at every step of the traversal.
#[derive(Clone, Debug)]
pub struct OfflineSarsaLambda {
    config: TdConfig,
    decay: f32,
}

impl OfflineSarsaLambda {
    /// Builds the algorithm with the trace decay `lambda` in `[0, 1]`.
    pub fn build(config: TdConfig, decay: f32) -> Result<Self> {
        config.validate()?;
        validate_decay(decay)?;
        Ok(Self { config, decay })
    }

    /// Returns the trace decay.
    pub fn decay(&self) -> f32 {
        self.decay
    }
}

impl<T, P> TdAlgorithm<T, QTable<T::State>, P> for OfflineSarsaLambda
where
    T: Task,
    T::State: Hash + Eq,
    P: Policy<T::State>,
{
    fn clear(&mut self) -> Result<()> {
        Ok(())
    }

    fn discount(&self) -> f32 {
        self.config.discount
    }

    fn run_episode(
        &mut self,
        q: &mut QTable<T::State>,
        task: &mut T,
        policy: &mut P,
    ) -> Result<Episode> {
        let (gamma, lambda) = (self.config.discount, self.decay);
        let trajectory = sample_episode(q, task, policy, self.config.episode_length)?;

        let mut g = 0f32;
        for t in (0..trajectory.len()).rev() {
            let (state, action, reward) = &trajectory[t];
            g = match trajectory.get(t + 1) {
                None => *reward,
                Some((next_state, next_action, _)) => {
                    let next_q = q.value(next_state, *next_action);
                    reward + gamma * ((1.0 - lambda) * next_q + lambda * g)
                }
            };
            let delta = g - q.value(state, *action);
            q.update(state, *action, delta);
        }

        let rewards = trajectory.into_iter().map(|(_, _, r)| r).collect();
        Ok(Episode::new(rewards, Record::empty()))
    }
}
