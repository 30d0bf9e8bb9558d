//! Session event bus.
//!
//! The game loop publishes one [`GameEvent`] stream; frontends and tests
//! subscribe to it. Delivery is best-effort: with no subscribers events are
//! dropped, and a lagging subscriber loses the oldest events.

use game_core::{EntityId, Position};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Something observable that happened during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// One scheduler step finished.
    TurnCompleted {
        step: u64,
        actor: EntityId,
        /// Cell the actor stands on after the step.
        position: Option<Position>,
        consumed_time: bool,
    },
    /// A pass-through action the session does not handle itself.
    PassThrough { actor: EntityId, action: String },
    /// The world was written to a save slot.
    Saved { slot: String },
    /// Text produced by an action.
    Message(String),
    /// The session ended.
    Quit { step: u64 },
}

/// Broadcast bus for [`GameEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<GameEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: GameEvent) {
        if self.sender.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!("no event subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
