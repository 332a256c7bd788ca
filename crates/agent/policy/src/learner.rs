//! One-step temporal-difference learning.

use agent_core::types::Transition;
use tracing::trace;

use crate::network::PolicyNetwork;

/// Q-style single-step bootstrap driving [`PolicyNetwork`] updates.
///
/// The target is a copy of the current prediction with the taken behavior's
/// lane replaced by `reward + γ · max(predict(next_state))`. No eligibility
/// traces, no experience replay, no target network; each transition is
/// consumed exactly once.
#[derive(Clone, Copy, Debug)]
pub struct TdLearner {
    discount_factor: f64,
}

impl TdLearner {
    pub fn new(discount_factor: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&discount_factor) && discount_factor.is_finite(),
            "discount factor must be within [0, 1]"
        );
        Self { discount_factor }
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Applies one TD update for the observed transition.
    pub fn update(&self, network: &mut PolicyNetwork, transition: &Transition) {
        let current = network.predict(&transition.state);
        let next_scores = network.predict(&transition.next_state);
        let best_next = next_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut target = current;
        let lane = transition.behavior.index();
        target[lane] = transition.reward + self.discount_factor * best_next;

        trace!(
            behavior = %transition.behavior,
            reward = transition.reward,
            td_target = target[lane],
            previous = current[lane],
            "applying TD update"
        );

        network.train_step(&transition.state, &target);
    }
}
