//! Numeric helpers shared by value functions, policies and the training loop.
use anyhow::Result;
use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};

/// Returns the index of the maximal element, breaking ties by the lowest index.
///
/// Returns 0 for an empty slice.
pub fn argmax(xs: &[f32]) -> usize {
    let mut best = 0;
    for (i, x) in xs.iter().enumerate().skip(1) {
        if *x > xs[best] {
            best = i;
        }
    }
    best
}

/// Returns the maximal element.
pub fn max(xs: &[f32]) -> f32 {
    xs.iter().fold(f32::NEG_INFINITY, |m, x| m.max(*x))
}

/// Computes `exp(x / temperature)` normalized over `xs`.
///
/// The maximum is subtracted before exponentiation, so small temperatures do not
/// overflow. A non-positive temperature returns the one-hot vector of [`argmax`].
pub fn softmax(xs: &[f32], temperature: f32) -> Vec<f32> {
    if temperature <= 0.0 {
        return one_hot(xs.len(), argmax(xs));
    }
    let m = max(xs);
    let exps = xs
        .iter()
        .map(|x| ((x - m) / temperature).exp())
        .collect::<Vec<_>>();
    let z: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / z).collect()
}

/// Returns a vector of length `n` with 1 at `ix` and 0 elsewhere.
pub fn one_hot(n: usize, ix: usize) -> Vec<f32> {
    let mut v = vec![0f32; n];
    v[ix] = 1.0;
    v
}

/// Computes the discounted return `sum_t gamma^t r_t` by a reverse fold.
pub fn discounted_return(rewards: &[f32], gamma: f32) -> f32 {
    rewards.iter().rev().fold(0f32, |g, r| r + gamma * g)
}

/// Samples an index from the probability vector `probs`.
pub fn sample_index(rng: &mut impl Rng, probs: &[f32]) -> Result<usize> {
    let dist = WeightedIndex::new(probs)?;
    Ok(dist.sample(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_argmax_first_occurrence() {
        assert_eq!(argmax(&[0.1, 0.9, 0.2]), 1);
        assert_eq!(argmax(&[0.5, 0.5, 0.1]), 0);
        assert_eq!(argmax(&[-1.0, 2.0, 2.0]), 1);
        assert_eq!(argmax(&[]), 0);
    }

    #[test]
    fn test_softmax_small_temperature() {
        let p = softmax(&[1000.0, 0.0], 1e-3);
        assert!(p.iter().all(|v| v.is_finite()));
        assert_eq!(p[0], 1.0);

        let p = softmax(&[1.0, 1.0, 1.0, 1.0], 0.5);
        p.iter().for_each(|v| assert!((v - 0.25).abs() < 1e-6));
    }

    #[test]
    fn test_discounted_return() {
        let r = discounted_return(&[1.0, 1.0, 1.0], 0.5);
        assert!((r - 1.75).abs() < 1e-6);
        assert_eq!(discounted_return(&[], 0.9), 0.0);
    }

    #[test]
    fn test_sample_index_degenerate() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            assert_eq!(sample_index(&mut rng, &[0.0, 1.0, 0.0])?, 1);
        }
        Ok(())
    }
}
