//! Read-only world observations consumed by the encoder.
//!
//! The host (or a simulation fixture) assembles a [`WorldSnapshot`] once per
//! decision cycle from its own entity/inventory queries. The decision core
//! never reaches into the world directly; everything it knows about the
//! environment flows through this snapshot.

use serde::{Deserialize, Serialize};

use crate::types::Vec3;

/// Observation of the nearest hostile entity (or the boss).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThreatSnapshot {
    pub position: Vec3,
    pub velocity: Vec3,
    pub health: f64,
}

/// Equipment-possession flags mirrored from the host's inventory lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Mid-tier tool set (pickaxe/sword/axe) is present.
    pub has_iron_tools: bool,
    /// Top-tier tool set is present.
    pub has_diamond_tools: bool,
    /// Warp consumable used for escapes and the objective search.
    pub has_warp_pearls: bool,
    /// All four armor slots are filled.
    pub has_full_armor: bool,
}

impl InventorySnapshot {
    pub const EMPTY: Self = Self {
        has_iron_tools: false,
        has_diamond_tools: false,
        has_warp_pearls: false,
        has_full_armor: false,
    };
}

/// Everything the encoder needs to know about the world at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub position: Vec3,
    pub health: f64,
    pub food: f64,
    /// Nearest hostile within perception range, if any.
    pub nearest_threat: Option<ThreatSnapshot>,
    pub inventory: InventorySnapshot,
}

impl WorldSnapshot {
    /// Distance to the nearest visible threat, if any.
    pub fn threat_distance(&self) -> Option<f64> {
        self.nearest_threat
            .map(|threat| self.position.distance_to(threat.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threat_distance_requires_a_threat() {
        let snapshot = WorldSnapshot {
            position: Vec3::ORIGIN,
            health: 20.0,
            food: 20.0,
            nearest_threat: None,
            inventory: InventorySnapshot::EMPTY,
        };
        assert_eq!(snapshot.threat_distance(), None);

        let with_threat = WorldSnapshot {
            nearest_threat: Some(ThreatSnapshot {
                position: Vec3::new(6.0, 0.0, 8.0),
                velocity: Vec3::ORIGIN,
                health: 200.0,
            }),
            ..snapshot
        };
        let distance = with_threat.threat_distance().unwrap();
        assert!((distance - 10.0).abs() < 1e-12);
    }
}
