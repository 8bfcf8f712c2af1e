//! Core functionalities.
mod policy;
mod predictor;
mod q_function;
mod replay_buffer;
mod task;
mod transition;
pub use policy::Policy;
pub use predictor::QPredictor;
pub use q_function::{Episodic, NeuralQ, QFunction};
pub use replay_buffer::ExperienceBufferBase;
pub use task::{Step, Task};
pub use transition::Transition;
