//! Learned policy for the speedrun agent.
//!
//! This crate owns the trainable half of the decision core:
//!
//! - [`PolicyNetwork`]: feed-forward scorer mapping feature vectors to one
//!   score per behavior, with a single-sample gradient update
//! - [`EpsilonGreedy`]: exploration/exploitation selection over the
//!   network's scores
//! - [`TdLearner`]: one-step temporal-difference target computation driving
//!   the network's update
//!
//! Parameters are owned exclusively by [`PolicyNetwork`] and mutated only
//! through [`TdLearner::update`]; the single-threaded cooperative cycle in
//! the runtime crate guarantees no overlapping access.
pub mod learner;
pub mod network;
pub mod selector;

pub use learner::TdLearner;
pub use network::{BehaviorScores, PolicyNetwork};
pub use selector::{EpsilonGreedy, SelectionKind, argmax};
