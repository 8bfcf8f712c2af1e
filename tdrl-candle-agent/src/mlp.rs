//! Multilayer perceptron.
mod base;
mod config;
pub use base::{init_parameters, Mlp};
pub use config::MlpConfig;
