//! Short-horizon hostile-motion prediction.

use agent_core::config::AgentConfig;
use agent_core::types::{AttackSample, Forecast, Vec3};
use arrayvec::ArrayVec;
use tracing::trace;

/// Rolling history of a hostile entity's motion with first-order
/// extrapolation.
///
/// Samples live in a bounded ring (capacity [`AgentConfig::ATTACK_HISTORY`]);
/// the oldest sample is evicted once the ring is full. A forecast needs at
/// least two samples and extrapolates one step ahead from the velocity delta
/// between the two most recent ones.
///
/// # Known limitation
///
/// `time_to_impact_ms` is the timestamp delta between the two most recent
/// samples, a lead-time proxy rather than a solved time-to-collision. Downstream
/// tactic selection is calibrated against this proxy, so it must not be
/// "corrected" into a real impact-time calculation.
#[derive(Clone, Debug, Default)]
pub struct ThreatPredictor {
    samples: ArrayVec<AttackSample, { AgentConfig::ATTACK_HISTORY }>,
}

impl ThreatPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one position/velocity observation, evicting the oldest sample
    /// if the ring is full.
    pub fn observe(&mut self, position: Vec3, velocity: Vec3, timestamp_ms: u64) {
        if self.samples.is_full() {
            self.samples.remove(0);
        }
        self.samples.push(AttackSample {
            position,
            velocity,
            timestamp_ms,
        });
        trace!(
            samples = self.samples.len(),
            %position,
            "threat sample recorded"
        );
    }

    /// Extrapolated next position and lead-time proxy, or `None` with fewer
    /// than two samples.
    pub fn forecast(&self) -> Option<Forecast> {
        if self.samples.len() < 2 {
            return None;
        }

        let last = self.samples[self.samples.len() - 1];
        let previous = self.samples[self.samples.len() - 2];

        let velocity_delta = last.velocity - previous.velocity;
        Some(Forecast {
            predicted_position: last.position + velocity_delta,
            time_to_impact_ms: last.timestamp_ms.saturating_sub(previous.timestamp_ms),
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drops all recorded samples (e.g. when the boss despawns).
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
