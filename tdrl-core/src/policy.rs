//! Exploration policies.
//!
//! Every policy implements [`Policy`](crate::Policy) and carries its own schedule
//! parameter, recomputed at the end of each episode:
//!
//! * [`EpsilonGreedy`] - uniform random action with probability epsilon.
//! * [`Boltzmann`] - softmax over action values with a temperature.
//! * [`Pursuit`] - learned per-state action preferences pursuing the greedy action.
//! * [`Greedy`] - the deterministic greedy policy, used for evaluation.
//!
//! [`ExplorationPolicy`] wraps the variants in a single type built from
//! [`PolicyConfig`], for configuration-driven experiments.
mod boltzmann;
mod config;
mod epsilon_greedy;
mod greedy;
mod pursuit;
pub use boltzmann::Boltzmann;
pub use config::{ExplorationPolicy, PolicyConfig};
pub use epsilon_greedy::EpsilonGreedy;
pub use greedy::Greedy;
pub use pursuit::{Pursuit, StateKey};
