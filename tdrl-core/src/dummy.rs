//! Small deterministic tasks. This module is used for tests and demos.
use crate::{Step, Task};

/// A single-state task ending after one step, with a fixed reward per action.
#[derive(Clone, Debug)]
pub struct Bandit {
    rewards: Vec<f32>,
}

impl Bandit {
    /// Constructs the task; the number of actions is `rewards.len()`.
    pub fn new(rewards: Vec<f32>) -> Self {
        Self { rewards }
    }
}

impl Task for Bandit {
    type State = usize;

    fn initial_state(&mut self) -> usize {
        0
    }

    fn valid_actions(&self) -> usize {
        self.rewards.len()
    }

    fn transition(&mut self, _state: &usize, action: usize) -> Step<usize> {
        Step::new(0, self.rewards[action], true)
    }
}

/// A one-dimensional chain `0, 1, .., length - 1`.
///
/// The agent starts at 0. Action 0 moves left (staying at 0 at the left end) and
/// action 1 moves right. Reaching the right end terminates the episode with
/// `goal_reward`; every other step yields `step_reward`.
#[derive(Clone, Debug)]
pub struct Corridor {
    length: usize,
    goal_reward: f32,
    step_reward: f32,
}

impl Corridor {
    /// Constructs the task.
    ///
    /// # Panics
    ///
    /// Panics if `length < 2`.
    pub fn new(length: usize, goal_reward: f32, step_reward: f32) -> Self {
        assert!(length >= 2, "a corridor needs at least two cells");
        Self {
            length,
            goal_reward,
            step_reward,
        }
    }

    /// Returns the number of cells.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Encodes a cell as a one-hot vector, for function approximation.
    pub fn one_hot(&self, state: &usize) -> Vec<f32> {
        crate::util::one_hot(self.length, *state)
    }
}

impl Task for Corridor {
    type State = usize;

    fn initial_state(&mut self) -> usize {
        0
    }

    fn valid_actions(&self) -> usize {
        2
    }

    fn transition(&mut self, state: &usize, action: usize) -> Step<usize> {
        let next = match action {
            0 => state.saturating_sub(1),
            _ => (state + 1).min(self.length - 1),
        };
        if next == self.length - 1 {
            Step::new(next, self.goal_reward, true)
        } else {
            Step::new(next, self.step_reward, false)
        }
    }
}
