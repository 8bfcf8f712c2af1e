//! Per-episode learning curves.

/// Number of steps and discounted return of every episode of a trial, or their
/// averages over trials.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    /// Number of steps of each episode.
    pub steps: Vec<f32>,

    /// Discounted return of each episode.
    pub returns: Vec<f32>,
}

impl History {
    /// Creates an empty history with room for `episodes` episodes.
    pub fn with_capacity(episodes: usize) -> Self {
        Self {
            steps: Vec::with_capacity(episodes),
            returns: Vec::with_capacity(episodes),
        }
    }

    /// Appends an episode.
    pub fn push(&mut self, steps: f32, ret: f32) {
        self.steps.push(steps);
        self.returns.push(ret);
    }

    /// Returns the number of episodes.
    pub fn len(&self) -> usize {
        self.returns.len()
    }

    /// Returns `true` if no episode has been recorded.
    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Returns the mean discounted return over episodes, or 0 if empty.
    pub fn mean_return(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.returns.iter().sum::<f32>() / self.len() as f32
        }
    }

    /// Averages histories of equal length elementwise.
    ///
    /// # Panics
    ///
    /// Panics if the histories differ in length.
    pub fn average(histories: &[History]) -> Self {
        let episodes = histories.first().map_or(0, |h| h.len());
        let n = histories.len() as f32;
        let mut avg = Self {
            steps: vec![0f32; episodes],
            returns: vec![0f32; episodes],
        };
        for h in histories {
            assert_eq!(h.len(), episodes);
            avg.steps
                .iter_mut()
                .zip(h.steps.iter())
                .for_each(|(a, s)| *a += s / n);
            avg.returns
                .iter_mut()
                .zip(h.returns.iter())
                .for_each(|(a, r)| *a += r / n);
        }
        avg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average() {
        let a = History {
            steps: vec![2.0, 4.0],
            returns: vec![1.0, 0.0],
        };
        let b = History {
            steps: vec![4.0, 4.0],
            returns: vec![0.0, 0.5],
        };
        let avg = History::average(&[a.clone(), b]);
        assert_eq!(avg.steps, vec![3.0, 4.0]);
        assert_eq!(avg.returns, vec![0.5, 0.25]);
        assert_eq!(History::average(&[a.clone()]), a);
        assert_eq!(a.mean_return(), 0.5);
    }
}
