//! Transition.

/// A transition `(s_t, a_t, r_t, s_t+1, done_t)`.
///
/// Transitions are produced once per interaction step and are not modified after
/// being stored in a replay buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<S> {
    /// State `s_t`.
    pub state: S,

    /// Action `a_t`.
    pub action: usize,

    /// Reward `r_t`.
    pub reward: f32,

    /// Next state `s_t+1`.
    pub next_state: S,

    /// Flag denoting if `s_t+1` is terminal.
    pub done: bool,
}

impl<S> Transition<S> {
    /// Constructs a [`Transition`].
    pub fn new(state: S, action: usize, reward: f32, next_state: S, done: bool) -> Self {
        Self {
            state,
            action,
            reward,
            next_state,
            done,
        }
    }
}
