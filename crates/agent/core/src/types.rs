//! Canonical value types shared across the agent crates.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::config::AgentConfig;

/// Continuous world-space coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Vec3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

/// High-level behavior the agent can commit a decision cycle to.
///
/// The set is fixed at compile time and its size must equal the policy
/// network's output width; selection happens by index, so the declaration
/// order here is the canonical action ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum Behavior {
    /// Mine and collect the resources the run depends on.
    #[strum(serialize = "gather-resources")]
    GatherResources,
    /// Craft tool tiers from gathered materials.
    #[strum(serialize = "craft-tools")]
    CraftTools,
    /// Locate the objective structure that gates the boss encounter.
    #[strum(serialize = "find-objective")]
    FindObjective,
    /// Engage the boss.
    #[strum(serialize = "fight-boss")]
    FightBoss,
    /// Restore health/food and deal with nearby hostiles.
    #[strum(serialize = "survive")]
    Survive,
    /// Roam to uncover new terrain and resource deposits.
    #[strum(serialize = "explore")]
    Explore,
}

impl Behavior {
    /// Number of behaviors. Must match the policy network's output width.
    pub const COUNT: usize = 6;

    /// All behaviors in canonical index order.
    pub const ALL: [Behavior; Self::COUNT] = [
        Behavior::GatherResources,
        Behavior::CraftTools,
        Behavior::FindObjective,
        Behavior::FightBoss,
        Behavior::Survive,
        Behavior::Explore,
    ];

    /// Canonical index of this behavior within [`Behavior::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Behavior at the given canonical index, if in range.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Fixed reward penalty applied when this behavior's handler fails.
    ///
    /// Failures are absorbed into the reward signal rather than propagated;
    /// the magnitudes reflect how costly a wasted cycle of each behavior is.
    pub const fn failure_penalty(self) -> f64 {
        match self {
            Behavior::GatherResources => -2.0,
            Behavior::CraftTools => -1.0,
            Behavior::FindObjective => -1.0,
            Behavior::FightBoss => -5.0,
            Behavior::Survive => -2.0,
            Behavior::Explore => -1.0,
        }
    }
}

/// Fixed-length normalized observation fed to the policy network.
///
/// Length is fixed at compile time ([`AgentConfig::STATE_SIZE`]); the encoder
/// guarantees every lane is finite and within its documented range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f64; AgentConfig::STATE_SIZE]);

impl FeatureVector {
    pub const ZERO: Self = Self([0.0; AgentConfig::STATE_SIZE]);

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        AgentConfig::STATE_SIZE
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// True if every lane is a finite number.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

/// One observed decision outcome, consumed immediately by the learner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub state: FeatureVector,
    pub behavior: Behavior,
    pub reward: f64,
    pub next_state: FeatureVector,
}

/// One position/velocity observation of a hostile entity.
///
/// Timestamps are host-supplied monotonic milliseconds; the core never reads
/// a clock itself.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackSample {
    pub position: Vec3,
    pub velocity: Vec3,
    pub timestamp_ms: u64,
}

/// Short-horizon extrapolation of a hostile entity's motion.
///
/// `time_to_impact_ms` is the delta between the two most recent sample
/// timestamps, used as a lead-time proxy rather than a projected
/// time-to-collision. The predictor in the runtime crate documents this
/// known limitation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub predicted_position: Vec3,
    pub time_to_impact_ms: u64,
}
