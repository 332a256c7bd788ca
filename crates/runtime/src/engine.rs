//! Decision-cycle orchestration.

use std::sync::Arc;

use agent_core::config::AgentConfig;
use agent_core::encoder::StateEncoder;
use agent_core::types::{Behavior, Forecast, Transition, Vec3};
use agent_policy::{EpsilonGreedy, PolicyNetwork, SelectionKind, TdLearner};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::actuator::{Actuator, Navigator};
use crate::error::{BehaviorError, Result};
use crate::events::{AgentEvent, EventBus};
use crate::handler::BehaviorRegistry;
use crate::oracle::WorldOracle;
use crate::tactics::CombatDriver;
use crate::threat::ThreatPredictor;

/// External collaborators the engine drives.
///
/// The oracle, navigator, and actuator wrap the host's game-interaction
/// layer; the registry binds the per-behavior handlers. All are shared
/// immutably; the engine owns every piece of mutable state itself.
pub struct Collaborators {
    pub world: Arc<dyn WorldOracle>,
    pub navigator: Arc<dyn Navigator>,
    pub actuator: Arc<dyn Actuator>,
    pub handlers: BehaviorRegistry,
}

/// Result of one completed decision cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleOutcome {
    /// Behavior that was dispatched (after any fallback resolution).
    pub behavior: Behavior,
    /// Reward observed for the attempt, penalties included.
    pub reward: f64,
    /// True when the behavior came from an exploration draw.
    pub exploratory: bool,
}

/// Orchestrates one decision cycle per call:
/// `ENCODE → SELECT → DISPATCH → OBSERVE → LEARN`.
///
/// # Concurrency
///
/// Cycles run one at a time on a single task; `&mut self` makes the
/// single-writer discipline explicit. DISPATCH suspends until the behavior
/// handler resolves, but no second cycle can start meanwhile, so the policy
/// parameters and the threat sample ring need no locking. If the host tears
/// the task down mid-cycle, the in-flight transition is dropped, giving
/// at-most-once update semantics per cycle.
pub struct DecisionEngine {
    config: AgentConfig,
    encoder: StateEncoder,
    network: PolicyNetwork,
    selector: EpsilonGreedy,
    learner: TdLearner,
    combat: CombatDriver,
    predictor: ThreatPredictor,
    events: EventBus,
    collaborators: Collaborators,
}

impl DecisionEngine {
    /// Creates an engine with entropy-seeded policy initialization.
    pub fn new(config: AgentConfig, collaborators: Collaborators) -> Result<Self> {
        config.validate()?;
        let network = PolicyNetwork::new(config.learning_rate);
        let selector = EpsilonGreedy::new(config.exploration_rate);
        Ok(Self::assemble(config, collaborators, network, selector))
    }

    /// Creates an engine with a fixed seed for network initialization and
    /// exploration draws. Intended for tests and reproducible runs.
    pub fn with_seed(config: AgentConfig, collaborators: Collaborators, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let network = PolicyNetwork::with_rng(config.learning_rate, &mut rng);
        let selector = EpsilonGreedy::seeded(config.exploration_rate, seed.wrapping_add(1));
        Ok(Self::assemble(config, collaborators, network, selector))
    }

    fn assemble(
        config: AgentConfig,
        collaborators: Collaborators,
        network: PolicyNetwork,
        selector: EpsilonGreedy,
    ) -> Self {
        let learner = TdLearner::new(config.discount_factor);
        Self {
            config,
            encoder: StateEncoder::new(),
            network,
            selector,
            learner,
            combat: CombatDriver::new(),
            predictor: ThreatPredictor::new(),
            events: EventBus::new(),
            collaborators,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Read-only view of the learned policy, for inspection and tests.
    pub fn policy(&self) -> &PolicyNetwork {
        &self.network
    }

    /// Subscribes to the engine's event stream.
    pub fn subscribe_events(&self) -> tokio::sync::broadcast::Receiver<AgentEvent> {
        self.events.subscribe()
    }

    /// Feeds one hostile-motion observation into the threat predictor.
    ///
    /// Timestamps are host-supplied monotonic milliseconds.
    pub fn observe_threat(&mut self, position: Vec3, velocity: Vec3, timestamp_ms: u64) {
        self.predictor.observe(position, velocity, timestamp_ms);
    }

    /// Current forecast of the tracked hostile, if enough history exists.
    pub fn threat_forecast(&self) -> Option<Forecast> {
        self.predictor.forecast()
    }

    /// Runs one full decision cycle.
    ///
    /// Handler failures never escape: transient failures become the
    /// behavior's fixed penalty, missing preconditions become a zero-reward
    /// no-op, and LEARN runs in every case.
    pub async fn run_decision_cycle(&mut self) -> Result<CycleOutcome> {
        // ENCODE
        let snapshot = self.collaborators.world.snapshot();
        let state = self.encoder.encode(&snapshot);

        // SELECT
        let (selected, kind) = self.selector.select(&self.network, &state);
        let behavior = self.resolve(selected);
        debug!(%behavior, selected = %selected, ?kind, "behavior selected");

        // DISPATCH: failures are absorbed into the reward signal.
        let reward = match self.dispatch(behavior).await {
            Ok(reward) => reward,
            Err(error) if error.is_precondition() => {
                debug!(%behavior, %error, "behavior skipped");
                0.0
            }
            Err(error) => {
                warn!(%behavior, %error, "behavior failed");
                behavior.failure_penalty()
            }
        };

        // OBSERVE
        let next_state = self.encoder.encode(&self.collaborators.world.snapshot());

        // LEARN
        let transition = Transition {
            state,
            behavior,
            reward,
            next_state,
        };
        self.learner.update(&mut self.network, &transition);

        let outcome = CycleOutcome {
            behavior,
            reward,
            exploratory: kind == SelectionKind::Explore,
        };
        self.events.publish(AgentEvent::CycleCompleted {
            behavior,
            reward,
            exploratory: outcome.exploratory,
        });
        Ok(outcome)
    }

    /// Resolves a selected behavior to a dispatchable one.
    ///
    /// `FightBoss` is always dispatchable (the built-in combat driver backs
    /// it). Any other behavior without a bound handler falls back to the
    /// highest-priority bound behavior, a deterministic total order: weight
    /// descending, then behavior index ascending.
    fn resolve(&self, selected: Behavior) -> Behavior {
        if selected == Behavior::FightBoss || self.collaborators.handlers.is_bound(selected) {
            return selected;
        }

        let fallback = self
            .collaborators
            .handlers
            .bound_behaviors()
            .max_by_key(|b| (self.config.priority_of(*b), std::cmp::Reverse(b.index())))
            .unwrap_or(Behavior::FightBoss);
        warn!(
            selected = %selected,
            fallback = %fallback,
            "no handler bound, falling back by priority"
        );
        fallback
    }

    async fn dispatch(&self, behavior: Behavior) -> std::result::Result<f64, BehaviorError> {
        if let Some(handler) = self.collaborators.handlers.get(behavior) {
            return handler.execute(self.collaborators.world.as_ref()).await;
        }

        // Only FightBoss reaches here unbound; resolve() guarantees it.
        self.combat
            .engage(
                self.collaborators.world.as_ref(),
                self.collaborators.navigator.as_ref(),
                self.collaborators.actuator.as_ref(),
                &self.predictor,
                &self.events,
            )
            .await
    }
}
