//! Softmax action selection.
use crate::{
    schedule::Schedule,
    util::{sample_index, softmax},
    Episodic, Policy, QFunction, Task,
};
use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};

/// Samples actions with probability proportional to `exp(Q(s, a) / temperature)`.
///
/// A non-positive temperature selects the greedy action deterministically.
pub struct Boltzmann {
    schedule: Schedule,
    temperature: f32,
    rng: StdRng,
}

impl Boltzmann {
    /// Constructs the policy with a constant temperature.
    pub fn new(temperature: f32, seed: u64) -> Self {
        Self::with_schedule(Schedule::constant(temperature), seed)
    }

    /// Constructs the policy with a per-episode schedule of the temperature.
    ///
    /// `seed` is the seed of the random number generator owned by the policy.
    pub fn with_schedule(schedule: Schedule, seed: u64) -> Self {
        Self {
            temperature: schedule.value(0),
            schedule,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the temperature of the current episode.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

impl Episodic for Boltzmann {
    fn clear(&mut self) -> Result<()> {
        self.temperature = self.schedule.value(0);
        Ok(())
    }

    fn finish_episode(&mut self, episode: usize) -> Result<()> {
        self.temperature = self.schedule.value(episode);
        Ok(())
    }
}

impl<S> Policy<S> for Boltzmann {
    fn act<Q, T>(&mut self, q: &mut Q, task: &T, state: &S) -> Result<usize>
    where
        Q: QFunction<S> + ?Sized,
        T: Task + ?Sized,
    {
        let probs = self.distribution(q, task, state)?;
        sample_index(&mut self.rng, &probs)
    }

    fn distribution<Q, T>(&mut self, q: &mut Q, _task: &T, state: &S) -> Result<Vec<f32>>
    where
        Q: QFunction<S> + ?Sized,
        T: Task + ?Sized,
    {
        Ok(softmax(&q.values(state)?, self.temperature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dummy::Bandit,
        q_table::{QTable, QTableConfig},
    };

    fn q_table(values: &[f32]) -> QTable<usize> {
        let config = QTableConfig::default();
        let mut q = QTable::build(&config, values.len(), Schedule::constant(1.0)).unwrap();
        q.update_all(&0, values);
        q
    }

    #[test]
    fn test_distribution() -> Result<()> {
        let task = Bandit::new(vec![0.0; 2]);
        let mut q = q_table(&[0.0, 2.0f32.ln()]);
        let mut policy = Boltzmann::new(1.0, 0);
        let p = policy.distribution(&mut q, &task, &0)?;
        assert!((p[0] - 1.0 / 3.0).abs() < 1e-6);
        assert!((p[1] - 2.0 / 3.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_equal_values_are_uniform() -> Result<()> {
        let task = Bandit::new(vec![0.0; 4]);
        let mut q = q_table(&[3.0; 4]);
        let mut policy = Boltzmann::new(0.1, 0);
        let p = policy.distribution(&mut q, &task, &0)?;
        p.iter().for_each(|v| assert!((v - 0.25).abs() < 1e-6));
        Ok(())
    }

    #[test]
    fn test_low_temperature_is_greedy() -> Result<()> {
        let task = Bandit::new(vec![0.0; 3]);
        let mut q = q_table(&[500.0, 900.0, 0.0]);
        let mut policy = Boltzmann::new(1e-3, 0);
        let p = policy.distribution(&mut q, &task, &0)?;
        assert!(p.iter().all(|v| v.is_finite()));
        for _ in 0..100 {
            assert_eq!(policy.act(&mut q, &task, &0)?, 1);
        }

        let mut policy = Boltzmann::new(0.0, 0);
        assert_eq!(policy.distribution(&mut q, &task, &0)?, vec![0.0, 1.0, 0.0]);
        Ok(())
    }
}
