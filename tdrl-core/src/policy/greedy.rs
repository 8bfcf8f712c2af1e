//! Greedy action selection.
use crate::{util::one_hot, Episodic, Policy, QFunction, Task};
use anyhow::Result;

/// Always selects the action with the largest value, the lowest index on ties.
///
/// Used for evaluating a learned value function without exploration.
#[derive(Clone, Debug, Default)]
pub struct Greedy;

impl Episodic for Greedy {
    fn clear(&mut self) -> Result<()> {
        Ok(())
    }

    fn finish_episode(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }
}

impl<S> Policy<S> for Greedy {
    fn act<Q, T>(&mut self, q: &mut Q, _task: &T, state: &S) -> Result<usize>
    where
        Q: QFunction<S> + ?Sized,
        T: Task + ?Sized,
    {
        q.max_action(state)
    }

    fn distribution<Q, T>(&mut self, q: &mut Q, task: &T, state: &S) -> Result<Vec<f32>>
    where
        Q: QFunction<S> + ?Sized,
        T: Task + ?Sized,
    {
        Ok(one_hot(task.valid_actions(), q.max_action(state)?))
    }
}
