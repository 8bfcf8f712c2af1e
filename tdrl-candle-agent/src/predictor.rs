//! Multilayer perceptron predicting action values.
mod base;
mod config;
pub use base::MlpPredictor;
pub use config::MlpPredictorConfig;
