//! Tabular action-value function.
//!
//! [`QTable`] maps hashable states to vectors of action values. States are
//! materialized lazily on first access with an [`Initializer`], and values change only
//! through the bounded updates [`QTable::update`] and [`QTable::update_all`].
//!
//! ```
//! use tdrl_core::{q_table::{QTable, QTableConfig}, schedule::Schedule};
//!
//! let config = QTableConfig::default().clip_min(-1.0).clip_max(1.0);
//! let mut q = QTable::<u32>::build(&config, 3, Schedule::constant(1.0)).unwrap();
//!
//! q.update(&0, 2, 1000.0);
//! assert_eq!(q.values(&0), &[0.0, 0.0, 1.0]);
//! assert_eq!(q.max_action(&0), 2);
//! ```
mod base;
mod config;
pub use base::QTable;
pub use config::{Initializer, QTableConfig};
