//! Epsilon-greedy behavior selection.

use agent_core::types::{Behavior, FeatureVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::network::{BehaviorScores, PolicyNetwork};

/// Whether a selection came from exploration or exploitation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionKind {
    /// Uniformly random draw.
    Explore,
    /// Argmax over the network's scores.
    Exploit,
}

/// Epsilon-greedy policy over [`PolicyNetwork`] scores.
///
/// With probability ε the selector returns a uniformly random behavior;
/// otherwise it exploits the network's argmax. Equal scores break toward the
/// lowest behavior index, so exploitation is fully deterministic for a fixed
/// network.
///
/// ε is static in this design (no decay schedule) but exposed as mutable
/// state through [`set_epsilon`](Self::set_epsilon) for future annealing.
#[derive(Debug)]
pub struct EpsilonGreedy {
    epsilon: f64,
    rng: StdRng,
}

impl EpsilonGreedy {
    /// Creates a selector with an entropy-seeded RNG.
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon: validated_epsilon(epsilon),
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a selector with a fixed seed. Intended for tests and replay.
    pub fn seeded(epsilon: f64, seed: u64) -> Self {
        Self {
            epsilon: validated_epsilon(epsilon),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = validated_epsilon(epsilon);
    }

    /// Selects a behavior for the given state.
    pub fn select(
        &mut self,
        network: &PolicyNetwork,
        state: &FeatureVector,
    ) -> (Behavior, SelectionKind) {
        if self.rng.r#gen::<f64>() < self.epsilon {
            let index = self.rng.gen_range(0..Behavior::COUNT);
            let behavior = Behavior::from_index(index).expect("index drawn within COUNT");
            return (behavior, SelectionKind::Explore);
        }

        let scores = network.predict(state);
        (argmax(&scores), SelectionKind::Exploit)
    }
}

/// Highest-scored behavior; ties break to the lowest index.
pub fn argmax(scores: &BehaviorScores) -> Behavior {
    let mut best = 0;
    for (index, score) in scores.iter().enumerate().skip(1) {
        if *score > scores[best] {
            best = index;
        }
    }
    Behavior::from_index(best).expect("scores are indexed by behavior")
}

fn validated_epsilon(epsilon: f64) -> f64 {
    assert!(
        (0.0..=1.0).contains(&epsilon) && epsilon.is_finite(),
        "epsilon must be within [0, 1]"
    );
    epsilon
}
