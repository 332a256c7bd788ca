//! Broadcast event stream for observability.
//!
//! The host subscribes to log reward deltas and chosen behaviors; events are
//! best-effort and never block or fail the decision cycle.

use agent_core::types::{Behavior, Forecast};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::tactics::Tactic;

/// Events published by the decision engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AgentEvent {
    /// One full decision cycle finished.
    CycleCompleted {
        behavior: Behavior,
        reward: f64,
        /// True when the behavior came from an exploration draw.
        exploratory: bool,
    },
    /// The combat driver committed to a tactic for one engagement.
    TacticChosen {
        tactic: Tactic,
        forecast: Option<Forecast>,
    },
}

impl AgentEvent {
    /// JSON rendering for hosts that export events to external sinks.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Single-channel broadcast bus.
pub struct EventBus {
    tx: broadcast::Sender<AgentEvent>,
}

impl EventBus {
    /// Creates a bus with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publishes an event. Having no subscribers is normal, not an error.
    pub fn publish(&self, event: AgentEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("no event subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AgentEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
