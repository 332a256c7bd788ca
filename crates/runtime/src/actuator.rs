//! Asynchronous navigation and primitive-action collaborators.
//!
//! These traits wrap the host's pathfinding and low-level action calls. Every
//! operation is independently failable; the decision core converts failures
//! into reward penalties rather than propagating them (see the decision
//! engine). Timeouts are the collaborator's responsibility: a call that
//! never settles on the host side must eventually resolve to an error here.

use agent_core::types::Vec3;
use async_trait::async_trait;

use crate::error::BehaviorError;

/// Goal-reaching navigation.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Walks toward a full 3D goal, settling when the goal is reached.
    async fn go_to(&self, goal: Vec3) -> std::result::Result<(), BehaviorError>;

    /// Walks toward a horizontal goal, ignoring elevation.
    async fn go_to_xz(&self, x: f64, z: f64) -> std::result::Result<(), BehaviorError>;
}

/// Primitive world actions.
#[async_trait]
pub trait Actuator: Send + Sync {
    /// Equips the named item into the main hand.
    async fn equip(&self, item: &str) -> std::result::Result<(), BehaviorError>;

    /// Orients the agent toward a point.
    async fn look_at(&self, target: Vec3) -> std::result::Result<(), BehaviorError>;

    /// Melee-attacks the entity currently looked at.
    async fn melee_attack(&self) -> std::result::Result<(), BehaviorError>;

    /// Fires the equipped ranged weapon at the point currently looked at.
    ///
    /// Implementations must check ammunition and report
    /// [`BehaviorError::PreconditionUnmet`] when none is left.
    async fn ranged_attack(&self) -> std::result::Result<(), BehaviorError>;

    /// Places a block from the inventory at the given position.
    async fn place_block(&self, at: Vec3) -> std::result::Result<(), BehaviorError>;

    /// Breaks the block at the given position.
    async fn break_block(&self, at: Vec3) -> std::result::Result<(), BehaviorError>;
}
