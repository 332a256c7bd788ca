//! Behavior handler binding.
//!
//! Each high-level behavior is implemented by an external handler (gather,
//! craft, locate the objective, survive, explore). The registry binds one
//! handler per behavior; `FightBoss` may be left unbound, in which case the
//! engine routes it to the built-in combat driver.

use std::sync::Arc;

use agent_core::types::Behavior;
use async_trait::async_trait;

use crate::error::BehaviorError;
use crate::oracle::WorldOracle;

/// External implementation of one high-level behavior.
///
/// Handlers return the scalar reward earned by the attempt. Recoverable
/// failures surface as [`BehaviorError`] and are converted into penalty
/// rewards by the engine; handlers never abort the decision cycle.
#[async_trait]
pub trait BehaviorHandler: Send + Sync {
    async fn execute(&self, world: &dyn WorldOracle) -> std::result::Result<f64, BehaviorError>;
}

/// Maps behaviors to their bound handlers.
#[derive(Default)]
pub struct BehaviorRegistry {
    handlers: [Option<Arc<dyn BehaviorHandler>>; Behavior::COUNT],
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self {
            handlers: std::array::from_fn(|_| None),
        }
    }

    /// Binds a handler to a behavior (builder pattern). Rebinding replaces
    /// the previous handler.
    #[must_use]
    pub fn bind(mut self, behavior: Behavior, handler: Arc<dyn BehaviorHandler>) -> Self {
        self.handlers[behavior.index()] = Some(handler);
        self
    }

    pub fn get(&self, behavior: Behavior) -> Option<&Arc<dyn BehaviorHandler>> {
        self.handlers[behavior.index()].as_ref()
    }

    pub fn is_bound(&self, behavior: Behavior) -> bool {
        self.handlers[behavior.index()].is_some()
    }

    /// Behaviors with a bound handler, in canonical index order.
    pub fn bound_behaviors(&self) -> impl Iterator<Item = Behavior> + '_ {
        Behavior::ALL
            .into_iter()
            .filter(move |behavior| self.is_bound(*behavior))
    }
}
