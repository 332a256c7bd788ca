//! Speedrun agent client binary.
//!
//! Composition root that wires the scripted simulation world into the
//! decision engine and drives it for a configurable number of cycles,
//! logging chosen behaviors and reward deltas.
//!
//! # Environment variables
//!
//! - `AGENT_CYCLES` - Number of decision cycles to run (default: 100)
//! - `AGENT_EXPLORATION_RATE` - Epsilon for the selector (default: 0.2)
//! - `AGENT_DISCOUNT_FACTOR` - TD discount factor (default: 0.95)
//! - `RUST_LOG` - Tracing filter (default: info)

mod sim;

use std::sync::Arc;

use agent_core::config::AgentConfig;
use agent_core::types::{Behavior, Vec3};
use anyhow::Result;
use runtime::{BehaviorRegistry, Collaborators, DecisionEngine};
use tracing::info;

use sim::{
    CraftHandler, ExploreHandler, FindObjectiveHandler, GatherHandler, SimulatedWorld,
    SurviveHandler,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cycles: u64 = read_env("AGENT_CYCLES").unwrap_or(100);
    let mut config = AgentConfig::default();
    if let Some(rate) = read_env("AGENT_EXPLORATION_RATE") {
        config.exploration_rate = rate;
    }
    if let Some(gamma) = read_env("AGENT_DISCOUNT_FACTOR") {
        config.discount_factor = gamma;
    }

    let world = Arc::new(SimulatedWorld::new());
    let handlers = BehaviorRegistry::new()
        .bind(
            Behavior::GatherResources,
            Arc::new(GatherHandler(Arc::clone(&world))),
        )
        .bind(
            Behavior::CraftTools,
            Arc::new(CraftHandler(Arc::clone(&world))),
        )
        .bind(
            Behavior::FindObjective,
            Arc::new(FindObjectiveHandler {
                world: Arc::clone(&world),
                objective: Vec3::new(80.0, 30.0, -40.0),
            }),
        )
        .bind(
            Behavior::Survive,
            Arc::new(SurviveHandler(Arc::clone(&world))),
        )
        .bind(
            Behavior::Explore,
            Arc::new(ExploreHandler(Arc::clone(&world))),
        );

    let collaborators = Collaborators {
        world: Arc::clone(&world) as Arc<dyn runtime::WorldOracle>,
        navigator: Arc::clone(&world) as Arc<dyn runtime::Navigator>,
        actuator: Arc::clone(&world) as Arc<dyn runtime::Actuator>,
        handlers,
    };

    let mut engine = DecisionEngine::new(config, collaborators)?;
    info!(cycles, "starting scripted run");

    let mut total_reward = 0.0;
    for cycle in 1..=cycles {
        let (position, velocity, timestamp_ms) = world.advance();
        engine.observe_threat(position, velocity, timestamp_ms);

        let outcome = engine.run_decision_cycle().await?;
        total_reward += outcome.reward;
        info!(
            cycle,
            behavior = %outcome.behavior,
            reward = outcome.reward,
            total_reward,
            exploratory = outcome.exploratory,
            "cycle complete"
        );
    }

    info!(total_reward, "run finished");
    Ok(())
}

/// Reads and parses an environment variable, ignoring unset or malformed
/// values.
fn read_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|value| value.parse().ok())
}
