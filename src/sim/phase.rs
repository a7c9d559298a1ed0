//! Game phase state machine
//!
//! ```text
//!   Start ──jump──▶ Playing ──death──▶ GameOver
//!     ▲              │   ▲                 │
//!     │         pause│   │resume           │restart
//!     │              ▼   │                 │
//!     │             Paused                 │
//!     └────────────────────────────────────┘
//! ```
//!
//! Restart is two steps: GameOver -> Start immediately, then Start -> Playing
//! after a short delay. The second step is a [`PendingTransition`] that is
//! polled with the caller's clock and dropped if the phase moved on meanwhile.

use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first jump
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

impl GamePhase {
    /// Whether `self -> to` is an allowed transition
    pub fn can_transition_to(self, to: GamePhase) -> bool {
        use GamePhase::*;
        matches!(
            (self, to),
            (Start, Playing)
                | (Playing, GameOver)
                | (Playing, Paused)
                | (Paused, Playing)
                | (GameOver, Start)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Start => "START",
            GamePhase::Playing => "PLAYING",
            GamePhase::Paused => "PAUSED",
            GamePhase::GameOver => "GAME_OVER",
        }
    }
}

/// An accepted transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseChange {
    pub from: GamePhase,
    pub to: GamePhase,
}

/// A transition scheduled for later, only valid while the phase is still `expect`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingTransition {
    pub expect: GamePhase,
    pub target: GamePhase,
    pub due_ms: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhaseMachine {
    current: GamePhase,
    previous: Option<GamePhase>,
    pending: Option<PendingTransition>,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn current(&self) -> GamePhase {
        self.current
    }

    #[inline]
    pub fn previous(&self) -> Option<GamePhase> {
        self.previous
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.current == GamePhase::Playing
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Request a transition. Returns the change if it was accepted; requests
    /// for the current phase and illegal requests return `None`.
    pub fn transition(&mut self, to: GamePhase) -> Option<PhaseChange> {
        let from = self.current;
        if from == to {
            return None;
        }
        if !from.can_transition_to(to) {
            log::debug!("Rejected phase transition {} -> {}", from.as_str(), to.as_str());
            return None;
        }

        self.previous = Some(from);
        self.current = to;
        log::debug!("Phase {} -> {}", from.as_str(), to.as_str());
        Some(PhaseChange { from, to })
    }

    pub fn start(&mut self) -> Option<PhaseChange> {
        if self.current != GamePhase::Start {
            return None;
        }
        self.transition(GamePhase::Playing)
    }

    pub fn end(&mut self) -> Option<PhaseChange> {
        self.transition(GamePhase::GameOver)
    }

    pub fn pause(&mut self) -> Option<PhaseChange> {
        if self.current != GamePhase::Playing {
            return None;
        }
        self.transition(GamePhase::Paused)
    }

    pub fn resume(&mut self) -> Option<PhaseChange> {
        if self.current != GamePhase::Paused {
            return None;
        }
        self.transition(GamePhase::Playing)
    }

    /// GameOver -> Start now, and schedule Start -> Playing `delay_ms` later
    pub fn restart(&mut self, now_ms: f64, delay_ms: f64) -> Option<PhaseChange> {
        let change = self.transition(GamePhase::Start)?;
        self.pending = Some(PendingTransition {
            expect: GamePhase::Start,
            target: GamePhase::Playing,
            due_ms: now_ms + delay_ms,
        });
        Some(change)
    }

    /// Fire the pending transition if it is due. A stale one (the phase is no
    /// longer what it expected) is discarded without effect.
    pub fn poll(&mut self, now_ms: f64) -> Option<PhaseChange> {
        let pending = self.pending?;
        if self.current != pending.expect {
            self.pending = None;
            return None;
        }
        if now_ms < pending.due_ms {
            return None;
        }
        self.pending = None;
        self.transition(pending.target)
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }
}
