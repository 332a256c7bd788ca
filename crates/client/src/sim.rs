//! Scripted simulation world for offline agent runs.
//!
//! Implements every collaborator trait over one shared state: the boss
//! orbits the arena on a fixed path, resources accumulate as the agent
//! gathers, and tool tiers unlock from gathered materials. Deterministic by
//! construction so repeated runs with the same seed reproduce.

use std::sync::{Arc, Mutex};

use agent_core::snapshot::{InventorySnapshot, ThreatSnapshot, WorldSnapshot};
use agent_core::types::Vec3;
use async_trait::async_trait;
use runtime::{Actuator, BehaviorError, BehaviorHandler, Navigator, WorldOracle};

/// Mutable simulation state behind one lock.
struct SimState {
    tick: u64,
    agent: Vec3,
    health: f64,
    food: f64,
    boss: ThreatSnapshot,
    raw_ore: u32,
    has_iron_tools: bool,
    has_diamond_tools: bool,
    has_warp_pearls: bool,
    has_full_armor: bool,
    arrows: u32,
}

/// Deterministic world the client binary runs the agent against.
pub struct SimulatedWorld {
    state: Mutex<SimState>,
}

impl SimulatedWorld {
    /// Boss orbit radius around the arena center.
    const ORBIT_RADIUS: f64 = 30.0;
    /// Milliseconds the scripted clock advances per tick.
    const TICK_MS: u64 = 400;

    pub fn new() -> Self {
        Self {
            state: Mutex::new(SimState {
                tick: 0,
                agent: Vec3::ORIGIN,
                health: 20.0,
                food: 20.0,
                boss: ThreatSnapshot {
                    position: Vec3::new(Self::ORBIT_RADIUS, 20.0, 0.0),
                    velocity: Vec3::ORIGIN,
                    health: 200.0,
                },
                raw_ore: 0,
                has_iron_tools: false,
                has_diamond_tools: false,
                has_warp_pearls: false,
                has_full_armor: false,
                arrows: 16,
            }),
        }
    }

    /// Advances the scripted clock one step and returns the boss's motion
    /// sample for `observe_threat`.
    pub fn advance(&self) -> (Vec3, Vec3, u64) {
        let mut state = self.state.lock().unwrap();
        state.tick += 1;

        // Scripted orbit; the angular step gives the boss a changing
        // velocity so forecasts stay non-trivial.
        let angle = state.tick as f64 * 0.2;
        let next = Vec3::new(
            Self::ORBIT_RADIUS * angle.cos(),
            20.0 + 4.0 * (angle * 0.5).sin(),
            Self::ORBIT_RADIUS * angle.sin(),
        );
        let velocity = next - state.boss.position;
        state.boss.position = next;
        state.boss.velocity = velocity;

        // Hunger drains slowly; survival has something to do.
        state.food = (state.food - 0.05).max(0.0);

        (next, velocity, state.tick * Self::TICK_MS)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut SimState) -> T) -> T {
        f(&mut self.state.lock().unwrap())
    }
}

impl Default for SimulatedWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldOracle for SimulatedWorld {
    fn snapshot(&self) -> WorldSnapshot {
        self.with_state(|state| WorldSnapshot {
            position: state.agent,
            health: state.health,
            food: state.food,
            nearest_threat: Some(state.boss),
            inventory: InventorySnapshot {
                has_iron_tools: state.has_iron_tools,
                has_diamond_tools: state.has_diamond_tools,
                has_warp_pearls: state.has_warp_pearls,
                has_full_armor: state.has_full_armor,
            },
        })
    }

    fn boss(&self) -> Option<ThreatSnapshot> {
        self.with_state(|state| (state.boss.health > 0.0).then_some(state.boss))
    }
}

#[async_trait]
impl Navigator for SimulatedWorld {
    async fn go_to(&self, goal: Vec3) -> Result<(), BehaviorError> {
        self.with_state(|state| state.agent = goal);
        Ok(())
    }

    async fn go_to_xz(&self, x: f64, z: f64) -> Result<(), BehaviorError> {
        self.with_state(|state| {
            state.agent = Vec3::new(x, state.agent.y, z);
        });
        Ok(())
    }
}

#[async_trait]
impl Actuator for SimulatedWorld {
    async fn equip(&self, _item: &str) -> Result<(), BehaviorError> {
        Ok(())
    }

    async fn look_at(&self, _target: Vec3) -> Result<(), BehaviorError> {
        Ok(())
    }

    async fn melee_attack(&self) -> Result<(), BehaviorError> {
        self.with_state(|state| {
            if state.agent.distance_to(state.boss.position) > 6.0 {
                return Err(BehaviorError::ActionRejected {
                    action: "melee-attack",
                    reason: "target out of reach".into(),
                });
            }
            state.boss.health -= 9.0;
            Ok(())
        })
    }

    async fn ranged_attack(&self) -> Result<(), BehaviorError> {
        self.with_state(|state| {
            if state.arrows == 0 {
                return Err(BehaviorError::PreconditionUnmet("no ammunition"));
            }
            state.arrows -= 1;
            state.boss.health -= 6.0;
            Ok(())
        })
    }

    async fn place_block(&self, _at: Vec3) -> Result<(), BehaviorError> {
        Ok(())
    }

    async fn break_block(&self, _at: Vec3) -> Result<(), BehaviorError> {
        Ok(())
    }
}

/// Mines ore; tool tiers unlock as material accumulates.
pub struct GatherHandler(pub Arc<SimulatedWorld>);

#[async_trait]
impl BehaviorHandler for GatherHandler {
    async fn execute(&self, _world: &dyn WorldOracle) -> Result<f64, BehaviorError> {
        self.0.with_state(|state| {
            state.raw_ore += 1;
            let reward = if state.raw_ore > 6 { 10.0 } else { 5.0 };
            Ok(reward)
        })
    }
}

/// Crafts the next tool tier out of gathered ore.
pub struct CraftHandler(pub Arc<SimulatedWorld>);

#[async_trait]
impl BehaviorHandler for CraftHandler {
    async fn execute(&self, _world: &dyn WorldOracle) -> Result<f64, BehaviorError> {
        self.0.with_state(|state| {
            if !state.has_iron_tools && state.raw_ore >= 3 {
                state.raw_ore -= 3;
                state.has_iron_tools = true;
                return Ok(5.0);
            }
            if state.has_iron_tools && !state.has_diamond_tools && state.raw_ore >= 3 {
                state.raw_ore -= 3;
                state.has_diamond_tools = true;
                state.has_full_armor = true;
                return Ok(10.0);
            }
            Err(BehaviorError::PreconditionUnmet("not enough material"))
        })
    }
}

/// Travels toward the objective, stocking up on warp pearls along the way.
pub struct FindObjectiveHandler {
    pub world: Arc<SimulatedWorld>,
    pub objective: Vec3,
}

#[async_trait]
impl BehaviorHandler for FindObjectiveHandler {
    async fn execute(&self, _world: &dyn WorldOracle) -> Result<f64, BehaviorError> {
        self.world.go_to_xz(self.objective.x, self.objective.z).await?;
        self.world.with_state(|state| {
            state.has_warp_pearls = true;
            Ok(3.0)
        })
    }
}

/// Eats and heals when the meters run low.
pub struct SurviveHandler(pub Arc<SimulatedWorld>);

#[async_trait]
impl BehaviorHandler for SurviveHandler {
    async fn execute(&self, _world: &dyn WorldOracle) -> Result<f64, BehaviorError> {
        self.0.with_state(|state| {
            let mut reward = 0.0;
            if state.health < 10.0 {
                state.health = (state.health + 6.0).min(20.0);
                reward += 5.0;
            }
            if state.food < 10.0 {
                state.food = (state.food + 8.0).min(20.0);
                reward += 3.0;
            }
            Ok(reward)
        })
    }
}

/// Wanders outward on a fixed spiral.
pub struct ExploreHandler(pub Arc<SimulatedWorld>);

#[async_trait]
impl BehaviorHandler for ExploreHandler {
    async fn execute(&self, _world: &dyn WorldOracle) -> Result<f64, BehaviorError> {
        let goal = self.0.with_state(|state| {
            let angle = state.tick as f64 * 0.7;
            let radius = 10.0 + (state.tick % 40) as f64;
            Vec3::new(radius * angle.cos(), state.agent.y, radius * angle.sin())
        });
        self.0.go_to_xz(goal.x, goal.z).await?;
        Ok(1.0)
    }
}
