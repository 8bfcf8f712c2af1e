//! One-step Sarsa.
use super::{check_actions, Episode, TdAlgorithm, TdConfig};
use crate::{q_table::QTable, record::Record, Policy, Step, Task};
use anyhow::Result;
use std::hash::Hash;

/// Tabular one-step on-policy control.
///
/// After every transition `(s, a, r, s')`, the next action `a'` is selected in `s'`
/// and `Q(s, a)` moves toward `r + gamma * Q(s', a')`. The bootstrap term is kept
/// on terminal transitions.
#[derive(Clone, Debug)]
pub struct Sarsa {
    config: TdConfig,
}

impl Sarsa {
    /// Builds the algorithm.
    pub fn build(config: TdConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl<T, P> TdAlgorithm<T, QTable<T::State>, P> for Sarsa
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
        check_actions(q, &*task)?;
        let gamma = self.config.discount;
        let mut rewards = Vec::new();
        let mut state = task.initial_state();
        let mut action = policy.act(q, &*task, &state)?;

        for _ in 0..self.config.episode_length {
            let Step {
                next_state,
                reward,
                done,
            } = task.transition(&state, action);
            rewards.push(reward);

            let next_action = policy.act(q, &*task, &next_state)?;
            let target = reward + gamma * q.value(&next_state, next_action);
            let delta = target - q.value(&state, action);
            q.update(&state, action, delta);

            if done {
                break;
            }
            state = next_state;
            action = next_action;
        }

        Ok(Episode::new(rewards, Record::empty()))
    }
}
