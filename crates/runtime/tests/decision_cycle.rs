//! End-to-end decision cycle scenarios against a scripted world.

use std::sync::{Arc, Mutex};

use agent_core::config::AgentConfig;
use agent_core::encoder::StateEncoder;
use agent_core::snapshot::{InventorySnapshot, ThreatSnapshot, WorldSnapshot};
use agent_core::types::{Behavior, Vec3};
use async_trait::async_trait;
use runtime::{
    Actuator, AgentEvent, BehaviorError, BehaviorHandler, BehaviorRegistry, Collaborators,
    CombatDriver, DecisionEngine, Navigator, Tactic, WorldOracle,
};

/// Boss state shared between the world oracle and the actuator so attacks
/// can inflict observable damage.
#[derive(Clone)]
struct SharedBoss(Arc<Mutex<Option<ThreatSnapshot>>>);

impl SharedBoss {
    fn new(boss: Option<ThreatSnapshot>) -> Self {
        Self(Arc::new(Mutex::new(boss)))
    }

    fn damage(&self, amount: f64) {
        if let Some(boss) = self.0.lock().unwrap().as_mut() {
            boss.health -= amount;
        }
    }
}

struct ScriptedWorld {
    position: Vec3,
    boss: SharedBoss,
}

impl WorldOracle for ScriptedWorld {
    fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            position: self.position,
            health: 20.0,
            food: 20.0,
            nearest_threat: *self.boss.0.lock().unwrap(),
            inventory: InventorySnapshot {
                has_iron_tools: true,
                has_diamond_tools: true,
                has_warp_pearls: true,
                has_full_armor: true,
            },
        }
    }

    fn boss(&self) -> Option<ThreatSnapshot> {
        *self.boss.0.lock().unwrap()
    }
}

/// Actuator that records every primitive call and damages the boss on hits.
struct RecordingActuator {
    log: Arc<Mutex<Vec<String>>>,
    boss: SharedBoss,
    damage_per_hit: f64,
}

#[async_trait]
impl Actuator for RecordingActuator {
    async fn equip(&self, item: &str) -> Result<(), BehaviorError> {
        self.log.lock().unwrap().push(format!("equip:{item}"));
        Ok(())
    }

    async fn look_at(&self, target: Vec3) -> Result<(), BehaviorError> {
        self.log.lock().unwrap().push(format!("look:{target}"));
        Ok(())
    }

    async fn melee_attack(&self) -> Result<(), BehaviorError> {
        self.log.lock().unwrap().push("melee".into());
        self.boss.damage(self.damage_per_hit);
        Ok(())
    }

    async fn ranged_attack(&self) -> Result<(), BehaviorError> {
        self.log.lock().unwrap().push("ranged".into());
        self.boss.damage(self.damage_per_hit);
        Ok(())
    }

    async fn place_block(&self, _at: Vec3) -> Result<(), BehaviorError> {
        Ok(())
    }

    async fn break_block(&self, _at: Vec3) -> Result<(), BehaviorError> {
        Ok(())
    }
}

struct RecordingNavigator {
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn go_to(&self, goal: Vec3) -> Result<(), BehaviorError> {
        self.log.lock().unwrap().push(format!("goto:{goal}"));
        Ok(())
    }

    async fn go_to_xz(&self, x: f64, z: f64) -> Result<(), BehaviorError> {
        self.log.lock().unwrap().push(format!("goto-xz:{x},{z}"));
        Ok(())
    }
}

struct FixedReward(f64);

#[async_trait]
impl BehaviorHandler for FixedReward {
    async fn execute(&self, _world: &dyn WorldOracle) -> Result<f64, BehaviorError> {
        Ok(self.0)
    }
}

struct AlwaysFails;

#[async_trait]
impl BehaviorHandler for AlwaysFails {
    async fn execute(&self, _world: &dyn WorldOracle) -> Result<f64, BehaviorError> {
        Err(BehaviorError::ActionRejected {
            action: "dig",
            reason: "tool broke".into(),
        })
    }
}

struct MissingPrecondition;

#[async_trait]
impl BehaviorHandler for MissingPrecondition {
    async fn execute(&self, _world: &dyn WorldOracle) -> Result<f64, BehaviorError> {
        Err(BehaviorError::PreconditionUnmet("no ammunition"))
    }
}

struct Fixture {
    boss: SharedBoss,
    actuator_log: Arc<Mutex<Vec<String>>>,
    navigator_log: Arc<Mutex<Vec<String>>>,
}

impl Fixture {
    fn collaborators(
        &self,
        agent_position: Vec3,
        damage_per_hit: f64,
        handlers: BehaviorRegistry,
    ) -> Collaborators {
        Collaborators {
            world: Arc::new(ScriptedWorld {
                position: agent_position,
                boss: self.boss.clone(),
            }),
            navigator: Arc::new(RecordingNavigator {
                log: Arc::clone(&self.navigator_log),
            }),
            actuator: Arc::new(RecordingActuator {
                log: Arc::clone(&self.actuator_log),
                boss: self.boss.clone(),
                damage_per_hit,
            }),
            handlers,
        }
    }
}

fn fixture(boss: Option<ThreatSnapshot>) -> Fixture {
    Fixture {
        boss: SharedBoss::new(boss),
        actuator_log: Arc::new(Mutex::new(Vec::new())),
        navigator_log: Arc::new(Mutex::new(Vec::new())),
    }
}

fn boss_at(position: Vec3, health: f64) -> ThreatSnapshot {
    ThreatSnapshot {
        position,
        velocity: Vec3::ORIGIN,
        health,
    }
}

fn greedy_config() -> AgentConfig {
    AgentConfig {
        exploration_rate: 0.0,
        ..AgentConfig::default()
    }
}

fn bind_all(handler: impl Fn() -> Arc<dyn BehaviorHandler>) -> BehaviorRegistry {
    let mut registry = BehaviorRegistry::new();
    for behavior in Behavior::ALL {
        registry = registry.bind(behavior, handler());
    }
    registry
}

#[tokio::test]
async fn successful_handler_reward_flows_to_learning() {
    let fixture = fixture(None);
    let registry = bind_all(|| Arc::new(FixedReward(5.0)));
    let mut engine = DecisionEngine::with_seed(
        greedy_config(),
        fixture.collaborators(Vec3::ORIGIN, 0.0, registry),
        42,
    )
    .unwrap();
    let mut events = engine.subscribe_events();

    let outcome = engine.run_decision_cycle().await.unwrap();
    assert_eq!(outcome.reward, 5.0);
    assert!(!outcome.exploratory);

    match events.recv().await.unwrap() {
        AgentEvent::CycleCompleted {
            behavior, reward, ..
        } => {
            assert_eq!(behavior, outcome.behavior);
            assert_eq!(reward, 5.0);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn failed_handler_becomes_fixed_penalty_and_learn_still_runs() {
    let fixture = fixture(None);
    let registry = bind_all(|| Arc::new(AlwaysFails));
    let mut engine = DecisionEngine::with_seed(
        greedy_config(),
        fixture.collaborators(Vec3::ORIGIN, 0.0, registry),
        7,
    )
    .unwrap();

    // Snapshot the policy's response before the failing cycle.
    let state = StateEncoder::new().encode(
        &ScriptedWorld {
            position: Vec3::ORIGIN,
            boss: fixture.boss.clone(),
        }
        .snapshot(),
    );
    let before = engine.policy().predict(&state);

    let outcome = engine.run_decision_cycle().await.unwrap();

    // The failure never escapes; it lands as the behavior's documented
    // penalty.
    assert_eq!(outcome.reward, outcome.behavior.failure_penalty());
    assert!(outcome.reward < 0.0);

    // LEARN executed with the penalty: parameters moved.
    let after = engine.policy().predict(&state);
    assert_ne!(before, after);
}

#[tokio::test]
async fn missing_precondition_is_zero_reward_noop() {
    let fixture = fixture(None);
    let registry = bind_all(|| Arc::new(MissingPrecondition));
    let mut engine = DecisionEngine::with_seed(
        greedy_config(),
        fixture.collaborators(Vec3::ORIGIN, 0.0, registry),
        9,
    )
    .unwrap();

    let outcome = engine.run_decision_cycle().await.unwrap();
    assert_eq!(outcome.reward, 0.0);
}

#[tokio::test]
async fn unbound_selection_falls_back_by_priority() {
    let fixture = fixture(None);
    // Only Survive (weight 10) is bound; anything else the selector picks
    // must resolve to it, except FightBoss which the combat driver backs.
    let registry = BehaviorRegistry::new().bind(Behavior::Survive, Arc::new(FixedReward(2.0)));
    let config = AgentConfig {
        exploration_rate: 1.0,
        ..AgentConfig::default()
    };
    let mut engine =
        DecisionEngine::with_seed(config, fixture.collaborators(Vec3::ORIGIN, 0.0, registry), 13)
            .unwrap();

    let mut saw_survive = false;
    for _ in 0..50 {
        let outcome = engine.run_decision_cycle().await.unwrap();
        assert!(
            matches!(outcome.behavior, Behavior::Survive | Behavior::FightBoss),
            "unexpected dispatch: {}",
            outcome.behavior
        );
        saw_survive |= outcome.behavior == Behavior::Survive;
    }
    assert!(saw_survive);
}

#[tokio::test]
async fn imminent_forecast_forces_defensive_engagement() {
    // Boss far away (distance 30 would normally mean ranged) but the fed
    // attack pattern predicts an imminent strike.
    let fixture = fixture(Some(boss_at(Vec3::new(30.0, 0.0, 0.0), 200.0)));
    let mut engine = DecisionEngine::with_seed(
        greedy_config(),
        fixture.collaborators(Vec3::ORIGIN, 0.0, BehaviorRegistry::new()),
        21,
    )
    .unwrap();
    let mut events = engine.subscribe_events();

    engine.observe_threat(Vec3::ORIGIN, Vec3::ORIGIN, 0);
    engine.observe_threat(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 500);
    engine.observe_threat(Vec3::new(3.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0), 900);

    let forecast = engine.threat_forecast().unwrap();
    assert_eq!(forecast.predicted_position, Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(forecast.time_to_impact_ms, 400);

    // No handlers bound: every selection resolves to FightBoss.
    let outcome = engine.run_decision_cycle().await.unwrap();
    assert_eq!(outcome.behavior, Behavior::FightBoss);
    assert_eq!(outcome.reward, CombatDriver::DEFENSIVE_REWARD);

    let mut tactic_seen = None;
    while let Ok(event) = events.try_recv() {
        if let AgentEvent::TacticChosen { tactic, .. } = event {
            tactic_seen = Some(tactic);
        }
    }
    assert_eq!(tactic_seen, Some(Tactic::Defensive));

    // The defensive maneuver retreated via the navigator.
    assert!(
        fixture
            .navigator_log
            .lock()
            .unwrap()
            .iter()
            .any(|entry| entry.starts_with("goto:"))
    );
}

#[tokio::test]
async fn close_engagement_melees_and_earns_damage_bonus() {
    let fixture = fixture(Some(boss_at(Vec3::new(5.0, 0.0, 0.0), 200.0)));
    let mut engine = DecisionEngine::with_seed(
        greedy_config(),
        fixture.collaborators(Vec3::ORIGIN, 24.0, BehaviorRegistry::new()),
        33,
    )
    .unwrap();

    // No samples fed: no forecast, distance 5 → melee.
    let outcome = engine.run_decision_cycle().await.unwrap();
    assert_eq!(outcome.behavior, Behavior::FightBoss);
    assert_eq!(
        outcome.reward,
        CombatDriver::MELEE_REWARD + 24.0 * CombatDriver::DAMAGE_BONUS_SCALE
    );

    let log = fixture.actuator_log.lock().unwrap();
    assert_eq!(log.len(), 3);
    assert_eq!(log[0], "equip:diamond-sword");
    assert_eq!(log[1], format!("look:{}", Vec3::new(5.0, 0.0, 0.0)));
    assert_eq!(log[2], "melee");
}

#[tokio::test]
async fn distant_engagement_leads_the_ranged_shot() {
    let fixture = fixture(Some(boss_at(Vec3::new(25.0, 0.0, 0.0), 200.0)));
    let mut engine = DecisionEngine::with_seed(
        greedy_config(),
        fixture.collaborators(Vec3::ORIGIN, 10.0, BehaviorRegistry::new()),
        37,
    )
    .unwrap();

    // Feed a slow pattern: forecast exists but is not imminent, so the
    // distance rule applies and the shot leads the predicted position.
    engine.observe_threat(Vec3::new(25.0, 0.0, 0.0), Vec3::ORIGIN, 0);
    engine.observe_threat(
        Vec3::new(25.0, 0.0, 2.0),
        Vec3::new(0.0, 0.0, 2.0),
        2000,
    );

    let outcome = engine.run_decision_cycle().await.unwrap();
    assert_eq!(
        outcome.reward,
        CombatDriver::RANGED_REWARD + 10.0 * CombatDriver::DAMAGE_BONUS_SCALE
    );

    let log = fixture.actuator_log.lock().unwrap();
    assert_eq!(log[0], "equip:bow");
    assert_eq!(
        log[1],
        format!("look:{}", Vec3::new(25.0, 0.0, 4.0)),
        "shot should lead the extrapolated position"
    );
    assert_eq!(log[2], "ranged");
}

#[tokio::test]
async fn repeated_failures_steer_the_greedy_policy_away() {
    // With every handler failing, the penalties should eventually push the
    // greedy argmax off the initially preferred behavior.
    let fixture = fixture(None);
    let registry = bind_all(|| Arc::new(AlwaysFails));
    let mut engine = DecisionEngine::with_seed(
        greedy_config(),
        fixture.collaborators(Vec3::ORIGIN, 0.0, registry),
        55,
    )
    .unwrap();

    let mut dispatched = std::collections::HashSet::new();
    for _ in 0..300 {
        let outcome = engine.run_decision_cycle().await.unwrap();
        dispatched.insert(outcome.behavior);
    }
    assert!(
        dispatched.len() >= 2,
        "penalties never moved the policy: {dispatched:?}"
    );
}
