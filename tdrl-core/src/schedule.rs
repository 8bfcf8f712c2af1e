//! Per-episode schedules of learning parameters.
//!
//! Learning rates, exploration rates and temperatures are either constants or
//! functions of the zero-based episode index. Both are represented by [`Schedule`],
//! a shared closure `episode -> f32`; a constant is a closure ignoring its argument.
//!
//! [`ScheduleConfig`] describes commonly used schedules in a serializable form.
//!
//! ```
//! use tdrl_core::schedule::{Schedule, ScheduleConfig};
//!
//! let alpha = Schedule::constant(0.1);
//! assert_eq!(alpha.value(100), 0.1);
//!
//! let eps = ScheduleConfig::Linear { start: 1.0, end: 0.0, episodes: 10 }.build();
//! assert_eq!(eps.value(5), 0.5);
//! assert_eq!(eps.value(20), 0.0);
//! ```
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// A parameter evaluated once per episode.
#[derive(Clone)]
pub struct Schedule(Arc<dyn Fn(usize) -> f32 + Send + Sync>);

impl Schedule {
    /// Creates a schedule from a function of the episode index.
    pub fn new(f: impl Fn(usize) -> f32 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Creates a schedule returning `v` for every episode.
    pub fn constant(v: f32) -> Self {
        Self::new(move |_| v)
    }

    /// Evaluates the schedule at the given episode.
    pub fn value(&self, episode: usize) -> f32 {
        (self.0)(episode)
    }
}

impl From<f32> for Schedule {
    fn from(v: f32) -> Self {
        Self::constant(v)
    }
}

impl fmt::Debug for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Schedule(episode 0 -> {})", self.value(0))
    }
}

/// Serializable description of a [`Schedule`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum ScheduleConfig {
    /// A constant value.
    Constant {
        /// The value.
        value: f32,
    },

    /// Linear interpolation from `start` to `end` over `episodes` episodes,
    /// staying at `end` afterwards.
    Linear {
        /// Value at episode 0.
        start: f32,
        /// Final value.
        end: f32,
        /// Episode at which the final value is reached.
        episodes: usize,
    },

    /// `max(start * decay^episode, min)`.
    Exponential {
        /// Value at episode 0.
        start: f32,
        /// Multiplicative decay per episode.
        decay: f32,
        /// Lower bound.
        min: f32,
    },
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::Constant { value: 0.1 }
    }
}

impl ScheduleConfig {
    /// Builds the [`Schedule`].
    pub fn build(&self) -> Schedule {
        match *self {
            Self::Constant { value } => Schedule::constant(value),
            Self::Linear {
                start,
                end,
                episodes,
            } => Schedule::new(move |e| {
                if episodes == 0 || e >= episodes {
                    end
                } else {
                    start + (end - start) * (e as f32 / episodes as f32)
                }
            }),
            Self::Exponential { start, decay, min } => Schedule::new(move |e| {
                let e = e.min(i32::MAX as usize) as i32;
                (start * decay.powi(e)).max(min)
            }),
        }
    }
}
