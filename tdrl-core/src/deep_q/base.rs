//! DQN and double DQN value functions.
use super::DeepQConfig;
use crate::{
    error::TdError, util::argmax, Episodic, NeuralQ, QFunction, QPredictor, Transition,
};
use anyhow::Result;
use log::trace;

/// A neural action-value function.
///
/// `target` is the network that is fitted and evaluated. `action` exists only for
/// double DQN and selects the greedy next action when computing targets.
pub struct DeepQ<P> {
    config: DeepQConfig,
    target: P,
    action: Option<P>,
}

impl<P: QPredictor> DeepQ<P> {
    /// Builds the value function around `network`.
    ///
    /// For double DQN, the action network is created with the same architecture and
    /// the parameters of `network`.
    pub fn build(config: DeepQConfig, network: P) -> Result<Self> {
        if config.train_epochs == 0 {
            let msg = "train_epochs must be positive".to_string();
            return Err(TdError::InvalidConfig(msg).into());
        }
        let action = if config.double {
            let mut action = network.clone_with_same_architecture()?;
            action.set_parameters(&network.parameters()?)?;
            Some(action)
        } else {
            None
        };

        Ok(Self {
            config,
            target: network,
            action,
        })
    }

    /// Returns the network being trained.
    pub fn target_network(&self) -> &P {
        &self.target
    }

    /// Returns the action network of double DQN.
    pub fn action_network(&self) -> Option<&P> {
        self.action.as_ref()
    }

    /// Computes the Q-learning targets of a minibatch.
    ///
    /// Each target is the predicted action values at the state, with the entry of the
    /// taken action replaced by `r` for terminal transitions and by `r + gamma * Q(s', a*)`
    /// otherwise, where `a*` maximizes the action network's values (the target network's
    /// for DQN) and `Q` is the target network.
    pub fn targets(
        &self,
        batch: &[Transition<Vec<f32>>],
        discount: f32,
    ) -> Result<(Vec<Vec<f32>>, Vec<Vec<f32>>)> {
        let states = batch.iter().map(|tr| tr.state.clone()).collect::<Vec<_>>();
        let next_states = batch
            .iter()
            .map(|tr| tr.next_state.clone())
            .collect::<Vec<_>>();

        let mut values = self.target.predict(&states)?;
        let next_values = self.target.predict(&next_states)?;
        let next_selection = match &self.action {
            Some(action) => Some(action.predict(&next_states)?),
            None => None,
        };
        check_rows(batch.len(), values.len())?;
        check_rows(batch.len(), next_values.len())?;
        let n_actions = values.first().map_or(0, |row| row.len());
        check_width(&values, n_actions)?;
        check_width(&next_values, n_actions)?;
        if let Some(selection) = next_selection.as_ref() {
            check_rows(batch.len(), selection.len())?;
            check_width(selection, n_actions)?;
        }

        for (i, tr) in batch.iter().enumerate() {
            if tr.action >= n_actions {
                return Err(TdError::ShapeMismatch {
                    expected: tr.action + 1,
                    actual: n_actions,
                }
                .into());
            }
            let target = if tr.done {
                tr.reward
            } else {
                let selection = next_selection.as_ref().unwrap_or(&next_values);
                let a = argmax(&selection[i]);
                tr.reward + discount * next_values[i][a]
            };
            values[i][tr.action] = target;
        }

        Ok((states, values))
    }
}

fn check_rows(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(TdError::ShapeMismatch { expected, actual }.into());
    }
    Ok(())
}

/// Checks that every row holds one value per action.
fn check_width(rows: &[Vec<f32>], n_actions: usize) -> Result<()> {
    match rows.iter().find(|row| row.len() != n_actions) {
        Some(row) => Err(TdError::ShapeMismatch {
            expected: n_actions,
            actual: row.len(),
        }
        .into()),
        None => Ok(()),
    }
}

impl<P: QPredictor> Episodic for DeepQ<P> {
    /// Re-initializes the parameters of every network.
    fn clear(&mut self) -> Result<()> {
        self.target.reinitialize_parameters()?;
        if let Some(action) = self.action.as_mut() {
            action.reinitialize_parameters()?;
        }
        Ok(())
    }

    /// Copies the parameters of the target network into the action network.
    fn finish_episode(&mut self, episode: usize) -> Result<()> {
        if let Some(action) = self.action.as_mut() {
            action.set_parameters(&self.target.parameters()?)?;
            trace!("Synchronized the action network at episode {}", episode);
        }
        Ok(())
    }
}

impl<P: QPredictor> QFunction<Vec<f32>> for DeepQ<P> {
    fn values(&mut self, state: &Vec<f32>) -> Result<Vec<f32>> {
        let mut values = self.target.predict(std::slice::from_ref(state))?;
        check_rows(1, values.len())?;
        Ok(values.remove(0))
    }
}

impl<P: QPredictor> NeuralQ for DeepQ<P> {
    fn train(&mut self, batch: &[Transition<Vec<f32>>], discount: f32) -> Result<f32> {
        let (states, targets) = self.targets(batch, discount)?;
        self.target
            .fit(&states, &targets, self.config.train_epochs, batch.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Linear model without bias. Fitting stores the targets it was given.
    struct Linear {
        weights: Vec<Vec<f32>>,
        fitted: Vec<Vec<f32>>,
        resets: usize,
    }

    impl Linear {
        fn new(weights: Vec<Vec<f32>>) -> Self {
            Self {
                weights,
                fitted: vec![],
                resets: 0,
            }
        }
    }

    impl QPredictor for Linear {
        type Params = Vec<Vec<f32>>;

        fn predict(&self, states: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
            Ok(states
                .iter()
                .map(|x| {
                    self.weights
                        .iter()
                        .map(|w| w.iter().zip(x.iter()).map(|(a, b)| a * b).sum())
                        .collect()
                })
                .collect())
        }

        fn fit(&mut self, _: &[Vec<f32>], targets: &[Vec<f32>], _: usize, _: usize) -> Result<f32> {
            self.fitted = targets.to_vec();
            Ok(0.5)
        }

        fn clone_with_same_architecture(&self) -> Result<Self> {
            let n_in = self.weights[0].len();
            Ok(Self::new(vec![vec![0.0; n_in]; self.weights.len()]))
        }

        fn parameters(&self) -> Result<Self::Params> {
            Ok(self.weights.clone())
        }

        fn set_parameters(&mut self, params: &Self::Params) -> Result<()> {
            self.weights = params.clone();
            Ok(())
        }

        fn reinitialize_parameters(&mut self) -> Result<()> {
            self.resets += 1;
            Ok(())
        }
    }

    // Two actions over one-hot encodings of two states:
    // Q(s0) = [1, 2], Q(s1) = [3, 5].
    fn network() -> Linear {
        Linear::new(vec![vec![1.0, 3.0], vec![2.0, 5.0]])
    }

    fn batch() -> Vec<Transition<Vec<f32>>> {
        vec![
            Transition::new(vec![1.0, 0.0], 0, 1.0, vec![0.0, 1.0], false),
            Transition::new(vec![0.0, 1.0], 1, -1.0, vec![1.0, 0.0], true),
        ]
    }

    #[test]
    fn test_dqn_targets() -> Result<()> {
        let mut q = DeepQ::build(DeepQConfig::default(), network())?;
        assert!(q.action_network().is_none());
        assert_eq!(q.values(&vec![0.0, 1.0])?, vec![3.0, 5.0]);

        let loss = q.train(&batch(), 0.5)?;
        assert_eq!(loss, 0.5);
        // 1 + 0.5 * max(3, 5) and the terminal reward.
        assert_eq!(q.target_network().fitted, vec![vec![3.5, 2.0], vec![3.0, -1.0]]);
        Ok(())
    }

    #[test]
    fn test_double_dqn_targets() -> Result<()> {
        let mut q = DeepQ::build(DeepQConfig::default().double(true), network())?;
        assert_eq!(q.action_network().unwrap().weights, network().weights);

        // The action network prefers action 0 at s1, so the target network's value of
        // action 0 at s1 is used.
        q.action = Some(Linear::new(vec![vec![0.0, 9.0], vec![0.0, 1.0]]));
        q.train(&batch(), 0.5)?;
        assert_eq!(q.target_network().fitted[0], vec![2.5, 2.0]);

        q.finish_episode(0)?;
        assert_eq!(q.action_network().unwrap().weights, network().weights);
        Ok(())
    }

    #[test]
    fn test_short_rows_are_rejected() -> Result<()> {
        // The action network only predicts a single action value per state.
        let mut q = DeepQ::build(DeepQConfig::default().double(true), network())?;
        q.action = Some(Linear::new(vec![vec![0.0, 9.0]]));
        let err = q.train(&batch(), 0.5).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TdError>(),
            Some(TdError::ShapeMismatch { expected: 2, actual: 1 })
        ));

        // An action outside the predicted row.
        let mut q = DeepQ::build(DeepQConfig::default(), network())?;
        let batch = vec![Transition::new(vec![1.0, 0.0], 2, 1.0, vec![0.0, 1.0], false)];
        let err = q.train(&batch, 0.5).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TdError>(),
            Some(TdError::ShapeMismatch { expected: 3, actual: 2 })
        ));
        Ok(())
    }

    #[test]
    fn test_clear_reinitializes_every_network() -> Result<()> {
        let mut q = DeepQ::build(DeepQConfig::default().double(true), network())?;
        q.clear()?;
        assert_eq!(q.target_network().resets, 1);
        assert_eq!(q.action_network().unwrap().resets, 1);
        Ok(())
    }
}
