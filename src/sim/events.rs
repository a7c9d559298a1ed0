//! Typed game events and a fan-out bus
//!
//! The simulation publishes; the driver, HUD and anything else subscribe.
//! Observers must not call back into the game state while handling an event.

use serde::{Deserialize, Serialize};

use super::bird::DeathCause;
use super::phase::GamePhase;
use super::score::RunSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The bird went from alive to dead (fires once per run)
    BirdDied { cause: DeathCause },
    PhaseChanged { from: GamePhase, to: GamePhase },
    ScoreAdded { current: u32, new_best: bool },
    /// Emitted on entering GameOver, after the phase change
    RunEnded(RunSummary),
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Observer = Box<dyn FnMut(&GameEvent)>;

/// One emission, every observer, in registration order
#[derive(Default)]
pub struct EventBus {
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u32,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn publish(&mut self, event: &GameEvent) {
        for (_, observer) in &mut self.observers {
            observer(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}
