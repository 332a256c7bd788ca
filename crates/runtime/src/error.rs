//! Error types surfaced by the runtime.
//!
//! Collaborator failures ([`BehaviorError`]) are recoverable by design: the
//! decision cycle absorbs them into the reward signal and continues. Only
//! orchestration problems ([`RuntimeError`]) propagate to the host.

use agent_core::config::ConfigError;
use agent_core::types::Vec3;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Typed failure modes of the external collaborators.
///
/// Each variant maps explicitly to a reward contribution (see the decision
/// engine), so the penalty accounting stays auditable instead of hiding in
/// generic catch-all handling.
#[derive(Debug, Error)]
pub enum BehaviorError {
    /// A goal-reaching navigation call did not settle.
    #[error("navigation to {goal} failed: {reason}")]
    NavigationFailed { goal: Vec3, reason: String },

    /// The world rejected a primitive action (equip, look, attack, block).
    #[error("{action} rejected: {reason}")]
    ActionRejected {
        action: &'static str,
        reason: String,
    },

    /// A precondition for acting was missing (no weapon, no ammunition,
    /// no visible target). Treated as a zero-reward no-op, not a failure.
    #[error("precondition unmet: {0}")]
    PreconditionUnmet(&'static str),
}

impl BehaviorError {
    /// True for missing-precondition no-ops, which carry no penalty.
    pub fn is_precondition(&self) -> bool {
        matches!(self, BehaviorError::PreconditionUnmet(_))
    }
}

/// Orchestration failures that cannot be absorbed into rewards.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid agent configuration")]
    InvalidConfig(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_is_distinguished_from_failures() {
        assert!(BehaviorError::PreconditionUnmet("no ammunition").is_precondition());
        assert!(
            !BehaviorError::NavigationFailed {
                goal: Vec3::ORIGIN,
                reason: "unreachable".into(),
            }
            .is_precondition()
        );
    }
}
