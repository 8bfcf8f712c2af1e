//! Online Sarsa(lambda) with accumulating eligibility traces.
use super::{check_actions, config::validate_decay, Episode, TdAlgorithm, TdConfig};
use crate::{q_table::QTable, record::Record, Policy, Step, Task};
use anyhow::Result;
use log::trace;
use std::{collections::HashMap, hash::Hash};

/// Sparse eligibility traces of the state-action pairs visited in an episode.
///
/// States are visited in the order they were first touched.
struct EligibilityTrace<S> {
    n_actions: usize,
    order: Vec<S>,
    traces: HashMap<S, Vec<f32>>,
}

impl<S: Hash + Eq + Clone> EligibilityTrace<S> {
    fn new(n_actions: usize) -> Self {
        Self {
            n_actions,
            order: Vec::new(),
            traces: HashMap::new(),
        }
    }

    fn increment(&mut self, state: &S, action: usize) {
        let Self {
            n_actions,
            order,
            traces,
        } = self;
        let e = traces.entry(state.clone()).or_insert_with(|| {
            order.push(state.clone());
            vec![0f32; *n_actions]
        });
        e[action] += 1.0;
    }

    /// Applies `delta` weighted by the traces to every touched state, then decays the traces.
    fn apply(&mut self, q: &mut QTable<S>, delta: f32, factor: f32) {
        for state in self.order.iter() {
            if let Some(e) = self.traces.get_mut(state) {
                let errors = e.iter().map(|x| x * delta).collect::<Vec<_>>();
                q.update_all(state, &errors);
                e.iter_mut().for_each(|x| *x *= factor);
            }
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// Tabular online Sarsa(lambda).
///
/// After every transition, the TD error `r + gamma * Q(s', a') - Q(s, a)` is applied
/// to every state touched in the current episode, weighted by its trace, and the
/// traces decay by `gamma * lambda`. Traces are created empty at the start of every
/// episode. Each step costs time proportional to the number of touched states.
#[derive(Clone, Debug)]
pub struct OnlineSarsaLambda {
    config: TdConfig,
    decay: f32,
}

impl OnlineSarsaLambda {
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

impl<T, P> TdAlgorithm<T, QTable<T::State>, P> for OnlineSarsaLambda
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
        let factor = gamma * self.decay;
        let mut trace = EligibilityTrace::new(task.valid_actions());
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
            trace.increment(&state, action);
            let target = reward + gamma * q.value(&next_state, next_action);
            let delta = target - q.value(&state, action);
            trace.apply(q, delta, factor);

            if done {
                break;
            }
            state = next_state;
            action = next_action;
        }
        trace!("Touched {} states", trace.len());

        Ok(Episode::new(rewards, Record::empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{q_table::QTableConfig, schedule::Schedule};

    #[test]
    fn test_trace_keeps_first_touch_order() {
        let mut trace = EligibilityTrace::new(2);
        trace.increment(&"b", 0);
        trace.increment(&"a", 1);
        trace.increment(&"b", 1);
        assert_eq!(trace.order, vec!["b", "a"]);
        assert_eq!(trace.traces[&"b"], vec![1.0, 1.0]);
    }

    #[test]
    fn test_apply_decays_traces() {
        let mut q = QTable::build(&QTableConfig::default(), 2, Schedule::constant(0.5)).unwrap();
        let mut trace = EligibilityTrace::new(2);
        trace.increment(&0, 1);
        trace.apply(&mut q, 2.0, 0.25);
        assert_eq!(q.values(&0), &[0.0, 1.0]);
        assert_eq!(trace.traces[&0], vec![0.0, 0.25]);

        trace.increment(&1, 0);
        trace.apply(&mut q, 4.0, 0.25);
        assert_eq!(q.values(&0), &[0.0, 1.5]);
        assert_eq!(q.values(&1), &[2.0, 0.0]);
    }
}
