//! A simple and efficient reusable cyclic buffer for randomized experience replay.
use super::ReplayBufferConfig;
use crate::{error::TdError, ExperienceBufferBase, Transition};
use anyhow::Result;
use log::trace;
use rand::{rngs::StdRng, seq::index, SeedableRng};

/// A fixed-capacity cyclic store of transitions with uniform batch sampling.
pub struct ReplayBuffer<S> {
    /// Maximum number of transitions that can be stored.
    capacity: usize,

    /// Number of transitions in a sampled batch.
    batch_size: usize,

    /// Current insertion index.
    i: usize,

    /// Stored transitions.
    buf: Vec<Transition<S>>,

    /// Random number generator for sampling.
    rng: StdRng,
}

impl<S> ReplayBuffer<S> {
    /// Builds a new replay buffer from the given configuration.
    ///
    /// Fails if the capacity or the batch size is zero, or if the batch size exceeds
    /// the capacity.
    pub fn build(config: &ReplayBufferConfig) -> Result<Self> {
        if config.capacity == 0 || config.batch_size == 0 {
            return Err(TdError::InvalidConfig(
                "capacity and batch_size must be positive".to_string(),
            )
            .into());
        }
        if config.batch_size > config.capacity {
            return Err(TdError::InvalidConfig(format!(
                "batch_size ({}) exceeds capacity ({})",
                config.batch_size, config.capacity
            ))
            .into());
        }

        Ok(Self {
            capacity: config.capacity,
            batch_size: config.batch_size,
            i: 0,
            buf: Vec::with_capacity(config.capacity),
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Stores a transition.
    ///
    /// If the buffer is full, the oldest transition is overwritten. Otherwise the
    /// transition is appended and the buffer grows by one.
    pub fn remember(&mut self, tr: Transition<S>) {
        if self.buf.len() < self.capacity {
            self.buf.push(tr);
        } else {
            self.buf[self.i] = tr;
        }
        self.i = (self.i + 1) % self.capacity;
    }

    /// Removes all transitions and resets the write cursor.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.i = 0;
    }

    /// Returns the number of stored transitions.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no transition is stored.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Returns the position the next transition is written to.
    pub fn cursor(&self) -> usize {
        self.i
    }

    /// Returns an iterator over stored transitions in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, Transition<S>> {
        self.buf.iter()
    }
}

impl<S: Clone> ReplayBuffer<S> {
    /// Samples `batch_size` distinct transitions uniformly at random.
    ///
    /// Returns `None` while fewer than `batch_size` transitions are stored.
    /// The order of the returned transitions is arbitrary.
    pub fn sample_batch(&mut self) -> Option<Vec<Transition<S>>> {
        if self.buf.len() < self.batch_size {
            trace!(
                "Replay buffer not ready: {} < {}",
                self.buf.len(),
                self.batch_size
            );
            return None;
        }

        let ixs = index::sample(&mut self.rng, self.buf.len(), self.batch_size);
        Some(ixs.into_iter().map(|ix| self.buf[ix].clone()).collect())
    }
}

impl<S> ExperienceBufferBase for ReplayBuffer<S> {
    type Item = Transition<S>;

    fn push(&mut self, tr: Self::Item) -> Result<()> {
        self.remember(tr);
        Ok(())
    }

    fn len(&self) -> usize {
        self.buf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn tr(i: usize) -> Transition<usize> {
        Transition::new(i, 0, i as f32, i + 1, false)
    }

    fn build_buffer(capacity: usize, batch_size: usize) -> ReplayBuffer<usize> {
        let config = ReplayBufferConfig::default()
            .capacity(capacity)
            .batch_size(batch_size);
        ReplayBuffer::build(&config).unwrap()
    }

    #[test]
    fn test_overwrite_oldest_first() {
        let mut buffer = build_buffer(5, 2);
        for i in 0..13 {
            buffer.remember(tr(i));
            assert_eq!(buffer.len(), (i + 1).min(5));
        }

        // The most recent five transitions, 8..13, with 10 at the cursor wrapping point.
        let states = buffer.iter().map(|t| t.state).collect::<Vec<_>>();
        assert_eq!(states, vec![10, 11, 12, 8, 9]);
        assert_eq!(buffer.cursor(), 3);
        let set = states.into_iter().collect::<HashSet<_>>();
        assert_eq!(set, (8..13).collect::<HashSet<_>>());
    }

    #[test]
    fn test_not_ready_until_batch_size() {
        let mut buffer = build_buffer(10, 4);
        for i in 0..3 {
            buffer.remember(tr(i));
            assert!(buffer.sample_batch().is_none());
        }
        buffer.remember(tr(3));
        assert_eq!(buffer.sample_batch().map(|b| b.len()), Some(4));
    }

    #[test]
    fn test_batch_is_without_replacement() {
        let mut buffer = build_buffer(50, 20);
        (0..30).for_each(|i| buffer.remember(tr(i)));
        for _ in 0..100 {
            let batch = buffer.sample_batch().unwrap();
            let states = batch.iter().map(|t| t.state).collect::<HashSet<_>>();
            assert_eq!(states.len(), 20);
            assert!(states.iter().all(|s| *s < 30));
        }

        // A batch as large as the contents is a permutation of the contents.
        let mut buffer = build_buffer(3, 3);
        (0..7).for_each(|i| buffer.remember(tr(i)));
        let states = buffer
            .sample_batch()
            .unwrap()
            .iter()
            .map(|t| t.state)
            .collect::<HashSet<_>>();
        assert_eq!(states, [4, 5, 6].iter().cloned().collect::<HashSet<_>>());
    }

    #[test]
    fn test_clear() -> Result<()> {
        let mut buffer = build_buffer(4, 1);
        (0..6).for_each(|i| buffer.remember(tr(i)));
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor(), 0);
        assert!(buffer.sample_batch().is_none());

        buffer.push(tr(9))?;
        assert_eq!(ExperienceBufferBase::len(&buffer), 1);
        Ok(())
    }

    #[test]
    fn test_invalid_config() {
        let config = ReplayBufferConfig::default().capacity(4).batch_size(5);
        assert!(ReplayBuffer::<usize>::build(&config).is_err());
        let config = ReplayBufferConfig::default().capacity(0).batch_size(0);
        assert!(ReplayBuffer::<usize>::build(&config).is_err());
    }
}
