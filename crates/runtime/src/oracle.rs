//! Read-only world access.
//!
//! The oracle is the decision core's only window into the game world. Hosts
//! implement it over whatever entity/inventory queries their game client
//! offers; simulation fixtures implement it over scripted state.

use agent_core::snapshot::{ThreatSnapshot, WorldSnapshot};

/// Synchronous world/entity/inventory queries.
///
/// Implementations return the host's current cached view; the core calls
/// [`snapshot`](Self::snapshot) once at ENCODE and once at OBSERVE, so two
/// calls within one cycle may legitimately differ.
pub trait WorldOracle: Send + Sync {
    /// Current observation of the agent and its surroundings.
    fn snapshot(&self) -> WorldSnapshot;

    /// The boss entity, if currently tracked by the host.
    fn boss(&self) -> Option<ThreatSnapshot>;
}
