//! World observation → feature vector encoding.
//!
//! The encoder is the numeric boundary of the decision core: every raw input
//! is normalized and clamped here, so downstream code can assume finite,
//! bounded values. A NaN or infinity past this point is a programming defect,
//! not a recoverable runtime condition.

use crate::config::AgentConfig;
use crate::snapshot::WorldSnapshot;
use crate::types::FeatureVector;

/// Encodes [`WorldSnapshot`]s into fixed-length [`FeatureVector`]s.
///
/// # Lane layout
///
/// | lane | content                        | range   |
/// |------|--------------------------------|---------|
/// | 0-2  | position x/y/z ÷ spatial scale | [-1, 1] |
/// | 3    | health ÷ max health            | [0, 1]  |
/// | 4    | food ÷ max food                | [0, 1]  |
/// | 5    | threat distance ÷ spatial scale (1.0 when no threat) | [0, 1] |
/// | 6-9  | inventory flags (iron tools, diamond tools, warp pearls, full armor) | {0, 1} |
///
/// Missing optional inputs substitute defined defaults; out-of-range raw
/// values are clamped, never passed through unbounded.
#[derive(Clone, Copy, Debug, Default)]
pub struct StateEncoder;

impl StateEncoder {
    pub const fn new() -> Self {
        Self
    }

    /// Encodes one snapshot. Never produces NaN or infinity.
    pub fn encode(&self, world: &WorldSnapshot) -> FeatureVector {
        let threat_distance = match world.threat_distance() {
            Some(distance) => unit(distance / AgentConfig::SPATIAL_SCALE),
            // Sentinel: no visible threat reads as "far".
            None => 1.0,
        };

        FeatureVector([
            signed_unit(world.position.x / AgentConfig::SPATIAL_SCALE),
            signed_unit(world.position.y / AgentConfig::SPATIAL_SCALE),
            signed_unit(world.position.z / AgentConfig::SPATIAL_SCALE),
            unit(world.health / AgentConfig::MAX_HEALTH),
            unit(world.food / AgentConfig::MAX_FOOD),
            threat_distance,
            flag(world.inventory.has_iron_tools),
            flag(world.inventory.has_diamond_tools),
            flag(world.inventory.has_warp_pearls),
            flag(world.inventory.has_full_armor),
        ])
    }
}

/// Clamps to [0, 1]; non-finite input collapses to 0.
fn unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Clamps to [-1, 1]; non-finite input collapses to 0.
fn signed_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

#[inline]
fn flag(set: bool) -> f64 {
    if set { 1.0 } else { 0.0 }
}
