//! Pure data model and state encoding for the speedrun agent.
//!
//! `agent-core` defines the canonical types the decision core operates on
//! (behaviors, feature vectors, transitions, attack samples) and exposes pure
//! APIs that can be reused by both the runtime and offline tools. Nothing in
//! this crate performs I/O or holds async state; world access happens through
//! read-only snapshots produced by the host.
pub mod config;
pub mod encoder;
pub mod snapshot;
pub mod types;

pub use config::{AgentConfig, BehaviorPriority, ConfigError};
pub use encoder::StateEncoder;
pub use snapshot::{InventorySnapshot, ThreatSnapshot, WorldSnapshot};
pub use types::{AttackSample, Behavior, FeatureVector, Forecast, Transition, Vec3};
