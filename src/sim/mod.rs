//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in from the caller, never from a clock
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bird;
pub mod events;
pub mod phase;
pub mod pipes;
pub mod rect;
pub mod score;
pub mod state;
pub mod tick;

pub use bird::{Bird, DeathCause};
pub use events::{EventBus, GameEvent, SubscriptionId};
pub use phase::{GamePhase, PendingTransition, PhaseChange, PhaseMachine};
pub use pipes::{Pipe, PipeManager};
pub use rect::Rect;
pub use score::{RunSummary, ScoreTracker, ScoreUpdate};
pub use state::{DebugInfo, GameState};
pub use tick::{InputEvent, handle_input, tick};
