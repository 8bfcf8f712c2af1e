//! Action-value functions backed by a trainable predictor.
//!
//! [`DeepQ`] implements [`NeuralQ`](crate::NeuralQ) on top of any
//! [`QPredictor`](crate::QPredictor). With [`DeepQConfig::double`] unset, a single
//! network both selects and evaluates the greedy next action (DQN). With it set, an
//! action network selects the next action, the target network evaluates it and is
//! trained, and the action network is synchronized with the target network at the end
//! of every episode (double DQN).
mod base;
mod config;
pub use base::DeepQ;
pub use config::DeepQConfig;
