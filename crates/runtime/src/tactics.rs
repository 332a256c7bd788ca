//! Combat tactic selection and execution.
//!
//! The boss encounter runs as a sub-episode inside the decision cycle: each
//! engagement consults the threat predictor, commits to one tactic, executes
//! it through the primitive-action collaborators, and accounts reward the
//! same way the outer DISPATCH step does (fixed reward on success, the
//! behavior's penalty on failure, plus a bonus proportional to damage
//! inflicted).

use agent_core::config::AgentConfig;
use agent_core::types::{Forecast, Vec3};
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::debug;

use crate::actuator::{Actuator, Navigator};
use crate::error::BehaviorError;
use crate::events::{AgentEvent, EventBus};
use crate::oracle::WorldOracle;
use crate::threat::ThreatPredictor;

/// How to engage the boss this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Tactic {
    #[strum(serialize = "melee")]
    Melee,
    #[strum(serialize = "ranged")]
    Ranged,
    #[strum(serialize = "defensive")]
    Defensive,
}

/// Pure tactic decision from the forecast and current distance.
pub struct TacticSelector;

impl TacticSelector {
    /// First match wins:
    ///
    /// 1. imminent forecast (lead time below
    ///    [`AgentConfig::IMMINENT_IMPACT_MS`]) → [`Tactic::Defensive`]
    /// 2. distance beyond [`AgentConfig::RANGED_DISTANCE`] → [`Tactic::Ranged`]
    /// 3. otherwise → [`Tactic::Melee`]
    ///
    /// An absent forecast skips rule 1: no history means no imminent threat.
    pub fn choose(agent_position: Vec3, threat_position: Vec3, forecast: Option<Forecast>) -> Tactic {
        if let Some(forecast) = forecast
            && forecast.time_to_impact_ms < AgentConfig::IMMINENT_IMPACT_MS
        {
            return Tactic::Defensive;
        }

        if agent_position.distance_to(threat_position) > AgentConfig::RANGED_DISTANCE {
            Tactic::Ranged
        } else {
            Tactic::Melee
        }
    }
}

/// Executes one boss engagement through the primitive-action collaborators.
pub struct CombatDriver;

impl CombatDriver {
    /// Reward for landing a melee strike.
    pub const MELEE_REWARD: f64 = 5.0;
    /// Reward for a ranged volley.
    pub const RANGED_REWARD: f64 = 4.0;
    /// Reward for a completed defensive maneuver.
    pub const DEFENSIVE_REWARD: f64 = 2.0;
    /// Reward per point of damage inflicted during the engagement.
    pub const DAMAGE_BONUS_SCALE: f64 = 0.5;
    /// How far a defensive maneuver retreats from the predicted position.
    const ESCAPE_DISTANCE: f64 = 8.0;

    const MELEE_WEAPON: &'static str = "diamond-sword";
    const RANGED_WEAPON: &'static str = "bow";

    pub fn new() -> Self {
        Self
    }

    /// Runs one engagement: consult the predictor, pick a tactic, execute.
    ///
    /// Requires the boss to be visible; otherwise reports
    /// [`BehaviorError::PreconditionUnmet`], which the engine treats as a
    /// zero-reward no-op.
    pub async fn engage(
        &self,
        world: &dyn WorldOracle,
        navigator: &dyn Navigator,
        actuator: &dyn Actuator,
        predictor: &ThreatPredictor,
        events: &EventBus,
    ) -> std::result::Result<f64, BehaviorError> {
        let boss = world
            .boss()
            .ok_or(BehaviorError::PreconditionUnmet("boss not in sight"))?;
        let agent = world.snapshot();
        let health_before = boss.health;

        let forecast = predictor.forecast();
        let tactic = TacticSelector::choose(agent.position, boss.position, forecast);
        debug!(%tactic, ?forecast, "engagement tactic chosen");
        events.publish(AgentEvent::TacticChosen { tactic, forecast });

        let base = match tactic {
            Tactic::Melee => {
                actuator.equip(Self::MELEE_WEAPON).await?;
                actuator.look_at(boss.position).await?;
                actuator.melee_attack().await?;
                Self::MELEE_REWARD
            }
            Tactic::Ranged => {
                actuator.equip(Self::RANGED_WEAPON).await?;
                // Lead the shot toward where the boss is headed.
                let aim = forecast
                    .map(|f| f.predicted_position)
                    .unwrap_or(boss.position);
                actuator.look_at(aim).await?;
                actuator.ranged_attack().await?;
                Self::RANGED_REWARD
            }
            Tactic::Defensive => {
                let danger = forecast
                    .map(|f| f.predicted_position)
                    .unwrap_or(boss.position);
                navigator
                    .go_to(escape_point(agent.position, danger))
                    .await?;
                Self::DEFENSIVE_REWARD
            }
        };

        let health_after = world.boss().map(|b| b.health).unwrap_or(0.0);
        let damage = (health_before - health_after).max(0.0);
        Ok(base + damage * Self::DAMAGE_BONUS_SCALE)
    }
}

impl Default for CombatDriver {
    fn default() -> Self {
        Self::new()
    }
}

/// Point [`CombatDriver::ESCAPE_DISTANCE`] away from the danger spot, along
/// the line from the danger through the agent. Falls back to a fixed lateral
/// offset when the two coincide.
fn escape_point(agent: Vec3, danger: Vec3) -> Vec3 {
    let away = agent - danger;
    let length = away.distance_to(Vec3::ORIGIN);
    if length < 1e-9 {
        return agent + Vec3::new(CombatDriver::ESCAPE_DISTANCE, 0.0, 0.0);
    }
    let scale = CombatDriver::ESCAPE_DISTANCE / length;
    agent + Vec3::new(away.x * scale, away.y * scale, away.z * scale)
}
