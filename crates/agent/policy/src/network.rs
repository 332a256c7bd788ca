//! Feed-forward behavior scorer.

use agent_core::config::AgentConfig;
use agent_core::types::{Behavior, FeatureVector};
use ndarray::{Array1, Array2, Axis};
use rand::Rng;

/// One score per behavior, indexed by [`Behavior::index`].
pub type BehaviorScores = [f64; Behavior::COUNT];

/// Width of the first hidden layer.
const HIDDEN_1: usize = 64;
/// Width of the second hidden layer.
const HIDDEN_2: usize = 32;

/// Feed-forward scorer: `STATE_SIZE → 64 (ReLU) → 32 (ReLU) → COUNT` with a
/// linear output head.
///
/// Scores are unnormalized and only compared against each other for argmax
/// selection, so no softmax is applied. Training is a single-sample SGD step
/// on squared error against a full target score vector; the learner patches
/// exactly one lane of its copy of the current prediction, so the effective
/// gradient concentrates on the behavior that was taken.
///
/// # Ownership
///
/// Parameters mutate in place through [`train_step`](Self::train_step) and
/// are never shared; the decision cycle is the sole reader and writer.
#[derive(Clone, Debug)]
pub struct PolicyNetwork {
    w1: Array2<f64>,
    b1: Array1<f64>,
    w2: Array2<f64>,
    b2: Array1<f64>,
    w3: Array2<f64>,
    b3: Array1<f64>,
    learning_rate: f64,
}

impl PolicyNetwork {
    /// Creates a network with Xavier-uniform weights from a caller-supplied
    /// RNG. Tests pass a seeded RNG for reproducibility.
    pub fn with_rng<R: Rng + ?Sized>(learning_rate: f64, rng: &mut R) -> Self {
        assert!(
            learning_rate.is_finite() && learning_rate > 0.0,
            "learning rate must be positive and finite"
        );

        let w1 = xavier(HIDDEN_1, AgentConfig::STATE_SIZE, rng);
        let w2 = xavier(HIDDEN_2, HIDDEN_1, rng);
        let w3 = xavier(Behavior::COUNT, HIDDEN_2, rng);

        Self {
            w1,
            b1: Array1::zeros(HIDDEN_1),
            w2,
            b2: Array1::zeros(HIDDEN_2),
            w3,
            b3: Array1::zeros(Behavior::COUNT),
            learning_rate,
        }
    }

    /// Creates a network with entropy-seeded initialization.
    pub fn new(learning_rate: f64) -> Self {
        Self::with_rng(learning_rate, &mut rand::thread_rng())
    }

    /// Scores every behavior for the given state.
    pub fn predict(&self, state: &FeatureVector) -> BehaviorScores {
        assert!(state.is_finite(), "feature vector must be finite");

        let input = Array1::from(state.as_slice().to_vec());
        let (_, _, output) = self.forward(&input);

        let mut scores = [0.0; Behavior::COUNT];
        for (lane, value) in scores.iter_mut().zip(output.iter()) {
            *lane = *value;
        }
        scores
    }

    /// Performs one gradient step pulling `predict(state)` toward `target`.
    ///
    /// All intermediate activations are locals dropped on every exit path;
    /// nothing is retained between calls except the parameters themselves.
    pub fn train_step(&mut self, state: &FeatureVector, target: &BehaviorScores) {
        assert!(state.is_finite(), "feature vector must be finite");
        assert!(
            target.iter().all(|v| v.is_finite()),
            "target scores must be finite"
        );

        let input = Array1::from(state.as_slice().to_vec());
        let (h1, h2, output) = self.forward(&input);

        // Squared-error gradient at the linear head.
        let target = Array1::from(target.to_vec());
        let delta3 = &output - &target;

        // Backpropagate through the ReLU layers; h > 0 doubles as the
        // activation mask since ReLU is identity on the active side.
        let mut delta2 = self.w3.t().dot(&delta3);
        delta2.zip_mut_with(&h2, |d, &h| {
            if h <= 0.0 {
                *d = 0.0;
            }
        });
        let mut delta1 = self.w2.t().dot(&delta2);
        delta1.zip_mut_with(&h1, |d, &h| {
            if h <= 0.0 {
                *d = 0.0;
            }
        });

        let grad_w3 = outer(&delta3, &h2);
        let grad_w2 = outer(&delta2, &h1);
        let grad_w1 = outer(&delta1, &input);

        self.w3.scaled_add(-self.learning_rate, &grad_w3);
        self.b3.scaled_add(-self.learning_rate, &delta3);
        self.w2.scaled_add(-self.learning_rate, &grad_w2);
        self.b2.scaled_add(-self.learning_rate, &delta2);
        self.w1.scaled_add(-self.learning_rate, &grad_w1);
        self.b1.scaled_add(-self.learning_rate, &delta1);
    }

    fn forward(&self, input: &Array1<f64>) -> (Array1<f64>, Array1<f64>, Array1<f64>) {
        let h1 = (self.w1.dot(input) + &self.b1).mapv(relu);
        let h2 = (self.w2.dot(&h1) + &self.b2).mapv(relu);
        let output = self.w3.dot(&h2) + &self.b3;
        (h1, h2, output)
    }
}

#[inline]
fn relu(value: f64) -> f64 {
    value.max(0.0)
}

/// Column-vector × row-vector outer product.
fn outer(column: &Array1<f64>, row: &Array1<f64>) -> Array2<f64> {
    let column = column.view().insert_axis(Axis(1));
    let row = row.view().insert_axis(Axis(0));
    column.dot(&row)
}

/// Xavier-uniform initialization scaled by fan-in + fan-out.
fn xavier<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Array2<f64> {
    let scale = (2.0 / (rows + cols) as f64).sqrt();
    Array2::from_shape_fn((rows, cols), |_| rng.gen_range(-scale..scale))
}
