//! Q-learning with function approximation and experience replay.
use super::{Episode, TdAlgorithm, TdConfig};
use crate::{
    record::{Record, RecordValue},
    replay_buffer::ReplayBuffer,
    ExperienceBufferBase, NeuralQ, Policy, Step, Task, Transition,
};
use anyhow::Result;
use log::trace;

/// Deep Q-learning.
///
/// States are encoded into vectors by `encoder`; the policy and the value function only
/// see encodings. Every transition is stored in the replay buffer, and whenever the
/// buffer can provide a minibatch the value function is trained on it with
/// [`NeuralQ::train`]. Whether this is DQN or double DQN is decided by the value
/// function, see [`DeepQ`](crate::deep_q::DeepQ).
///
/// The record of each episode holds `opt_steps`, the number of training calls, and
/// `loss`, their mean loss, if any call was made.
pub struct DeepQLearning<F> {
    config: TdConfig,
    encoder: F,
    memory: ReplayBuffer<Vec<f32>>,
}

impl<F> DeepQLearning<F> {
    /// Builds the algorithm.
    pub fn build(config: TdConfig, encoder: F, memory: ReplayBuffer<Vec<f32>>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            encoder,
            memory,
        })
    }

    /// Returns the replay buffer.
    pub fn memory(&self) -> &ReplayBuffer<Vec<f32>> {
        &self.memory
    }
}

impl<T, Q, P, F> TdAlgorithm<T, Q, P> for DeepQLearning<F>
where
    T: Task,
    Q: NeuralQ,
    P: Policy<Vec<f32>>,
    F: Fn(&T::State) -> Vec<f32>,
{
    /// Empties the replay buffer.
    fn clear(&mut self) -> Result<()> {
        self.memory.clear();
        Ok(())
    }

    fn discount(&self) -> f32 {
        self.config.discount
    }

    fn run_episode(&mut self, q: &mut Q, task: &mut T, policy: &mut P) -> Result<Episode> {
        let gamma = self.config.discount;
        let mut rewards = Vec::new();
        let mut losses = Vec::new();
        let mut state = task.initial_state();
        let mut phi = (self.encoder)(&state);

        for t in 0..self.config.episode_length {
            let action = policy.act(q, &*task, &phi)?;
            let Step {
                next_state,
                reward,
                done,
            } = task.transition(&state, action);
            let next_phi = (self.encoder)(&next_state);
            rewards.push(reward);

            self.memory
                .push(Transition::new(phi, action, reward, next_phi.clone(), done))?;
            if let Some(batch) = self.memory.sample_batch() {
                let loss = q.train(&batch, gamma)?;
                trace!("step {}: loss = {}", t, loss);
                losses.push(loss);
            }

            if done {
                break;
            }
            state = next_state;
            phi = next_phi;
        }

        let mut record = Record::from_scalar("opt_steps", losses.len() as f32);
        if !losses.is_empty() {
            let loss = losses.iter().sum::<f32>() / losses.len() as f32;
            record.insert("loss", RecordValue::Scalar(loss));
        }
        Ok(Episode::new(rewards, record))
    }
}
