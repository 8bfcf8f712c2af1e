//! Metrics emitted while learning.
//!
//! Every episode produces a [`Record`], a map from string keys to [`RecordValue`]s.
//! The [`Trainer`](crate::trainer::Trainer) merges the record of the algorithm
//! (e.g. the loss of deep Q-learning) with its own bookkeeping (episode index, number
//! of steps, discounted return) and hands it to a [`Recorder`].
//!
//! * [`NullRecorder`] discards everything.
//! * [`BufferedRecorder`] keeps written records in memory and aggregates stored
//!   records with [`RecordStorage`] whenever it is flushed.
//!
//! ```rust
//! use tdrl_core::record::{Record, RecordValue};
//!
//! let mut record = Record::from_scalar("episode_return", 0.81);
//! record.insert("episode_steps", RecordValue::Scalar(3.0));
//! assert_eq!(record.get_scalar("episode_steps").unwrap(), 3.0);
//! assert!(record.get_scalar("loss").is_err());
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
pub use storage::RecordStorage;
