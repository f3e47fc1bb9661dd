//! Broadcast fan-out of encounter events.

use encounter_core::EncounterEvent;
use tokio::sync::broadcast;

/// Cloneable bus carrying every [`EncounterEvent`] to any number of
/// subscribers (UI, audio, logging). Delivery is best-effort: a slow
/// subscriber drops old events rather than stalling the simulation.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EncounterEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(128)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish one event. Having no subscribers is not an error.
    pub fn publish(&self, event: EncounterEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EncounterEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
