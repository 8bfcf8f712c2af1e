#![warn(missing_docs)]
//! Temporal-difference learning for episodic tasks.
//!
//! This crate provides the building blocks of tabular and neural TD control:
//!
//! * [`Task`] - the episodic decision problem being learned.
//! * [`QFunction`] - action-value functions, implemented by the hash table
//!   [`QTable`](q_table::QTable) and by [`DeepQ`](deep_q::DeepQ), a wrapper of any
//!   trainable [`QPredictor`].
//! * [`Policy`] - exploration policies in [`policy`].
//! * [`TdAlgorithm`](algorithm::TdAlgorithm) - Sarsa, Monte Carlo, offline and online
//!   Sarsa(lambda) and deep Q-learning in [`algorithm`].
//! * [`Trainer`](trainer::Trainer) - the loop over episodes and trials.
//!
//! ```rust
//! use tdrl_core::{
//!     algorithm::{Sarsa, TdAlgorithm, TdConfig},
//!     dummy::Corridor,
//!     policy::EpsilonGreedy,
//!     q_table::{QTable, QTableConfig},
//!     schedule::Schedule,
//! };
//!
//! let mut task = Corridor::new(5, 1.0, 0.0);
//! let mut q = QTable::build(&QTableConfig::default(), 2, Schedule::constant(0.5))?;
//! let mut policy = EpsilonGreedy::new(0.1, 42);
//! let mut sarsa = Sarsa::build(TdConfig::default().discount(0.9).episode_length(100))?;
//!
//! let history = sarsa.train(&mut q, &mut task, &mut policy, 200)?;
//! assert_eq!(history.len(), 200);
//! # Ok::<(), anyhow::Error>(())
//! ```
pub mod algorithm;
pub mod deep_q;
pub mod dummy;
pub mod error;
pub mod evaluator;
pub mod policy;
pub mod q_table;
pub mod record;
pub mod replay_buffer;
pub mod schedule;
pub mod trainer;
pub mod util;

mod base;
pub use base::{
    Episodic, ExperienceBufferBase, NeuralQ, Policy, QFunction, QPredictor, Step, Task,
    Transition,
};
