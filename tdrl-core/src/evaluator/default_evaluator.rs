//! Greedy roll-outs.
use super::Evaluator;
use crate::{
    error::TdError,
    policy::Greedy,
    record::{Record, RecordValue},
    util::discounted_return,
    Policy, QFunction, Step, Task,
};
use anyhow::Result;

/// Runs episodes with the greedy policy and reports their mean discounted return.
///
/// The evaluator owns its task. States are passed to the value function through
/// `encoder`; [`DefaultEvaluator::new`] uses the states themselves, as tabular value
/// functions do.
///
/// The returned record holds `episode_return`, the mean discounted return,
/// `episode_steps`, the mean number of steps, and `initial_values`, the action values
/// at the initial state of the first episode.
///
/// ```rust
/// use tdrl_core::{
///     dummy::Bandit, evaluator::{DefaultEvaluator, Evaluator},
///     q_table::{QTable, QTableConfig}, schedule::Schedule,
/// };
///
/// let mut q = QTable::build(&QTableConfig::default(), 2, Schedule::constant(1.0))?;
/// q.update(&0, 1, 0.5);
/// let mut evaluator = DefaultEvaluator::new(Bandit::new(vec![0.0, 0.5]), 3, 10, 0.9)?;
/// let record = evaluator.evaluate(&mut q)?;
/// assert_eq!(record.get_scalar("episode_return")?, 0.5);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct DefaultEvaluator<T, F> {
    task: T,
    encoder: F,
    n_episodes: usize,
    episode_length: usize,
    discount: f32,
}

impl<T: Task> DefaultEvaluator<T, fn(&T::State) -> T::State> {
    /// Constructs an evaluator for value functions keyed by the task states.
    pub fn new(task: T, n_episodes: usize, episode_length: usize, discount: f32) -> Result<Self> {
        let encoder: fn(&T::State) -> T::State = <T::State as Clone>::clone;
        Self::with_encoder(task, encoder, n_episodes, episode_length, discount)
    }
}

impl<T: Task, F> DefaultEvaluator<T, F> {
    /// Constructs an evaluator for value functions keyed by `encoder(state)`.
    pub fn with_encoder(
        task: T,
        encoder: F,
        n_episodes: usize,
        episode_length: usize,
        discount: f32,
    ) -> Result<Self> {
        if n_episodes == 0 || episode_length == 0 {
            return Err(TdError::InvalidConfig(
                "n_episodes and episode_length must be positive".to_string(),
            )
            .into());
        }
        Ok(Self {
            task,
            encoder,
            n_episodes,
            episode_length,
            discount,
        })
    }
}

impl<T, F, S, Q> Evaluator<Q> for DefaultEvaluator<T, F>
where
    T: Task,
    F: Fn(&T::State) -> S,
    Q: QFunction<S>,
{
    fn evaluate(&mut self, q: &mut Q) -> Result<Record> {
        let mut policy = Greedy;
        let (mut r_total, mut steps_total) = (0f32, 0usize);
        let mut initial_values = Vec::new();

        for i in 0..self.n_episodes {
            let mut rewards = Vec::new();
            let mut state = self.task.initial_state();
            if i == 0 {
                initial_values = q.values(&(self.encoder)(&state))?;
            }

            for _ in 0..self.episode_length {
                let phi = (self.encoder)(&state);
                let action = policy.act(q, &self.task, &phi)?;
                let Step {
                    next_state,
                    reward,
                    done,
                } = self.task.transition(&state, action);
                rewards.push(reward);
                if done {
                    break;
                }
                state = next_state;
            }

            r_total += discounted_return(&rewards, self.discount);
            steps_total += rewards.len();
        }

        let n = self.n_episodes as f32;
        Ok(Record::from_slice(&[
            ("episode_return", RecordValue::Scalar(r_total / n)),
            ("episode_steps", RecordValue::Scalar(steps_total as f32 / n)),
            ("initial_values", RecordValue::Array1(initial_values)),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dummy::Corridor,
        q_table::{QTable, QTableConfig},
        schedule::Schedule,
    };

    #[test]
    fn test_greedy_rollout() -> Result<()> {
        let mut q = QTable::build(&QTableConfig::default(), 2, Schedule::constant(1.0))?;
        for s in 0..3 {
            q.update_all(&s, &[0.0, 1.0]);
        }
        let mut evaluator = DefaultEvaluator::new(Corridor::new(4, 1.0, 0.0), 2, 100, 0.5)?;
        let record = evaluator.evaluate(&mut q)?;
        assert_eq!(record.get_scalar("episode_steps")?, 3.0);
        assert_eq!(record.get_scalar("episode_return")?, 0.25);
        assert_eq!(record.get_array1("initial_values")?, vec![0.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_truncated_rollout() -> Result<()> {
        // Greedy ties pick action 0 and the agent never leaves the left end.
        let mut q = QTable::build(&QTableConfig::default(), 2, Schedule::constant(1.0))?;
        let mut evaluator = DefaultEvaluator::new(Corridor::new(4, 1.0, -1.0), 1, 5, 1.0)?;
        let record = evaluator.evaluate(&mut q)?;
        assert_eq!(record.get_scalar("episode_steps")?, 5.0);
        assert_eq!(record.get_scalar("episode_return")?, -5.0);
        Ok(())
    }
}
