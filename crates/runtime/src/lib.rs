//! Runtime orchestration for the speedrun agent's decision core.
//!
//! This crate wires the encoder, policy, and learner from the agent crates
//! into a cohesive decision cycle, and defines the narrow collaborator traits
//! the host must implement (world queries, navigation, primitive actions,
//! behavior handlers). Hosts embed [`DecisionEngine`] and drive it through
//! two calls: [`DecisionEngine::run_decision_cycle`] and
//! [`DecisionEngine::observe_threat`].
//!
//! Modules are organized by responsibility:
//! - [`engine`] hosts the decision-cycle orchestrator
//! - [`oracle`] and [`actuator`] define the collaborator traits
//! - [`handler`] binds behaviors to their external handlers
//! - [`threat`] and [`tactics`] implement the combat sub-episode
//! - [`events`] provides a broadcast bus for observability
pub mod actuator;
pub mod engine;
pub mod error;
pub mod events;
pub mod handler;
pub mod oracle;
pub mod tactics;
pub mod threat;

pub use actuator::{Actuator, Navigator};
pub use engine::{Collaborators, CycleOutcome, DecisionEngine};
pub use error::{BehaviorError, Result, RuntimeError};
pub use events::{AgentEvent, EventBus};
pub use handler::{BehaviorHandler, BehaviorRegistry};
pub use oracle::WorldOracle;
pub use tactics::{CombatDriver, Tactic, TacticSelector};
pub use threat::ThreatPredictor;
