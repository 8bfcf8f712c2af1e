//! Cyclic experience replay.
//!
//! [`ReplayBuffer`] stores the most recent `capacity` transitions. Writes append until
//! the buffer is full and then overwrite the oldest entry. Batches are drawn uniformly
//! without replacement; before `batch_size` transitions have been stored, sampling
//! reports that the buffer is not ready by returning `None`.
//!
//! ```
//! use tdrl_core::{replay_buffer::{ReplayBuffer, ReplayBufferConfig}, Transition};
//!
//! let config = ReplayBufferConfig::default().capacity(4).batch_size(2);
//! let mut buffer = ReplayBuffer::build(&config).unwrap();
//!
//! buffer.remember(Transition::new(0, 1, 0.5, 1, false));
//! assert!(buffer.sample_batch().is_none());
//!
//! buffer.remember(Transition::new(1, 0, 1.0, 2, true));
//! assert_eq!(buffer.sample_batch().unwrap().len(), 2);
//! ```
mod base;
mod config;
pub use base::ReplayBuffer;
pub use config::ReplayBufferConfig;
