//! Monte Carlo control.
use super::{check_actions, Episode, TdAlgorithm, TdConfig};
use crate::{q_table::QTable, record::Record, Policy, Step, Task};
use anyhow::Result;
use std::{hash::Hash, mem};

/// Tabular offline Monte Carlo control.
///
/// The whole episode is simulated first without touching the value function. The
/// trajectory is then traversed backwards accumulating `G <- r + gamma * G`, and every
/// visited state-action pair moves toward `G`, including repeated visits.
#[derive(Clone, Debug)]
pub struct MonteCarlo {
    config: TdConfig,
}

impl MonteCarlo {
    /// Builds the algorithm.
    pub fn build(config: TdConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }
}

/// Simulates an episode, returning `(state, action, reward)` of every transition.
pub(super) fn sample_episode<T, P>(
    q: &mut QTable<T::State>,
    task: &mut T,
    policy: &mut P,
    episode_length: usize,
) -> Result<Vec<(T::State, usize, f32)>>
where
    T: Task,
    T::State: Hash + Eq,
    P: Policy<T::State>,
{
    check_actions(q, &*task)?;
    let mut trajectory = Vec::new();
    let mut state = task.initial_state();

    for _ in 0..episode_length {
        let action = policy.act(q, &*task, &state)?;
        let Step {
            next_state,
            reward,
            done,
        } = task.transition(&state, action);
        trajectory.push((mem::replace(&mut state, next_state), action, reward));
        if done {
            break;
        }
    }

    Ok(trajectory)
}

impl<T, P> TdAlgorithm<T, QTable<T::State>, P> for MonteCarlo
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
        let gamma = self.config.discount;
        let trajectory = sample_episode(q, task, policy, self.config.episode_length)?;

        let mut g = 0f32;
        for (state, action, reward) in trajectory.iter().rev() {
            g = reward + gamma * g;
            let delta = g - q.value(state, *action);
            q.update(state, *action, delta);
        }

        let rewards = trajectory.into_iter().map(|(_, _, r)| r).collect();
        Ok(Episode::new(rewards, Record::empty()))
    }
}
