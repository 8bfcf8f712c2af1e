//! Task.

/// The outcome `(s_t+1, r_t, done_t)` of a single interaction with a [`Task`].
#[derive(Clone, Debug, PartialEq)]
pub struct Step<S> {
    /// The state the task transitioned to.
    pub next_state: S,

    /// Reward obtained on the transition.
    pub reward: f32,

    /// Flag denoting if `next_state` is terminal.
    pub done: bool,
}

impl<S> Step<S> {
    /// Constructs a [`Step`] object.
    pub fn new(next_state: S, reward: f32, done: bool) -> Self {
        Self {
            next_state,
            reward,
            done,
        }
    }
}

/// Represents an episodic task, typically an MDP.
///
/// Any randomness of the dynamics is internal to the implementation, which is why
/// [`Task::initial_state`] and [`Task::transition`] take `&mut self`. Algorithms never
/// look into the task beyond these methods.
pub trait Task {
    /// State of the task.
    ///
    /// Tabular methods additionally require `Hash + Eq` to use states as keys.
    type State: Clone;

    /// Returns the initial state, which may be either deterministic or random.
    fn initial_state(&mut self) -> Self::State;

    /// Returns the number of valid actions. Actions are indices in `0..valid_actions()`.
    fn valid_actions(&self) -> usize;

    /// Performs a transition from `state` when `action` is taken.
    fn transition(&mut self, state: &Self::State, action: usize) -> Step<Self::State>;
}
