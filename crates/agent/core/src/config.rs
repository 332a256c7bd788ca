//! Agent configuration constants and tunable parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Behavior;

/// Validation failures for [`AgentConfig`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("exploration rate {0} outside [0, 1]")]
    ExplorationRateOutOfRange(f64),

    #[error("discount factor {0} outside [0, 1]")]
    DiscountFactorOutOfRange(f64),

    #[error("learning rate {0} must be positive and finite")]
    InvalidLearningRate(f64),

    #[error("behavior {0} missing a priority entry")]
    MissingPriority(Behavior),
}

/// Priority weight for one behavior, used for deterministic tie-breaking
/// when multiple behaviors are equally eligible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorPriority {
    pub behavior: Behavior,
    pub weight: u32,
}

/// Tunable parameters of the decision core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Probability of taking a uniformly random behavior instead of the
    /// policy's argmax. Static; no decay schedule.
    pub exploration_rate: f64,

    /// Weight applied to the bootstrapped future value in the TD target.
    pub discount_factor: f64,

    /// Step size of the single-sample gradient update.
    pub learning_rate: f64,

    /// Total priority order over behaviors. Every behavior must appear
    /// exactly once; ties in weight resolve to the lower behavior index.
    pub priorities: Vec<BehaviorPriority>,
}

impl AgentConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of lanes in an encoded feature vector.
    pub const STATE_SIZE: usize = 10;
    /// Capacity of the hostile-motion sample ring.
    pub const ATTACK_HISTORY: usize = 10;

    // ===== normalization constants =====
    /// Spatial scale dividing positions and distances before encoding.
    pub const SPATIAL_SCALE: f64 = 100.0;
    /// Maximum health value the world reports.
    pub const MAX_HEALTH: f64 = 20.0;
    /// Maximum food value the world reports.
    pub const MAX_FOOD: f64 = 20.0;

    // ===== combat thresholds =====
    /// Lead times below this are treated as an imminent attack.
    pub const IMMINENT_IMPACT_MS: u64 = 1000;
    /// Distances beyond this prefer ranged engagement.
    pub const RANGED_DISTANCE: f64 = 20.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_EXPLORATION_RATE: f64 = 0.2;
    pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.95;
    pub const DEFAULT_LEARNING_RATE: f64 = 0.001;

    pub fn new() -> Self {
        Self {
            exploration_rate: Self::DEFAULT_EXPLORATION_RATE,
            discount_factor: Self::DEFAULT_DISCOUNT_FACTOR,
            learning_rate: Self::DEFAULT_LEARNING_RATE,
            priorities: Self::default_priorities(),
        }
    }

    /// Default priority order: survival first, boss fight and roaming last.
    pub fn default_priorities() -> Vec<BehaviorPriority> {
        vec![
            BehaviorPriority {
                behavior: Behavior::Survive,
                weight: 10,
            },
            BehaviorPriority {
                behavior: Behavior::GatherResources,
                weight: 8,
            },
            BehaviorPriority {
                behavior: Behavior::CraftTools,
                weight: 7,
            },
            BehaviorPriority {
                behavior: Behavior::FindObjective,
                weight: 6,
            },
            BehaviorPriority {
                behavior: Behavior::FightBoss,
                weight: 5,
            },
            BehaviorPriority {
                behavior: Behavior::Explore,
                weight: 4,
            },
        ]
    }

    /// Priority weight assigned to a behavior (0 if absent; `validate`
    /// rejects configs where any behavior is absent).
    pub fn priority_of(&self, behavior: Behavior) -> u32 {
        self.priorities
            .iter()
            .find(|p| p.behavior == behavior)
            .map(|p| p.weight)
            .unwrap_or(0)
    }

    /// Checks the documented ranges of every tunable field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.exploration_rate) || !self.exploration_rate.is_finite() {
            return Err(ConfigError::ExplorationRateOutOfRange(
                self.exploration_rate,
            ));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) || !self.discount_factor.is_finite() {
            return Err(ConfigError::DiscountFactorOutOfRange(self.discount_factor));
        }
        if !(self.learning_rate > 0.0) || !self.learning_rate.is_finite() {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        for behavior in Behavior::ALL {
            if !self.priorities.iter().any(|p| p.behavior == behavior) {
                return Err(ConfigError::MissingPriority(behavior));
            }
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
