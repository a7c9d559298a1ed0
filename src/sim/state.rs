//! Game state aggregate
//!
//! Everything the frame driver and renderer need lives here. The renderer only
//! reads; all mutation goes through [`super::tick`] and [`super::handle_input`].

use serde::Serialize;

use super::bird::Bird;
use super::events::{EventBus, GameEvent};
use super::phase::{GamePhase, PhaseMachine};
use super::pipes::PipeManager;
use super::score::ScoreTracker;
use crate::persistence::KeyValueStore;
use crate::tuning::{Tuning, TuningError};

/// Per-frame diagnostics for the debug overlay and logs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DebugInfo {
    pub phase: GamePhase,
    pub bird_y: f32,
    pub bird_velocity: f32,
    pub pipe_count: usize,
    pub pipe_speed: f32,
    pub gap_size: f32,
    pub spawn_interval_ms: f64,
    pub time_ticks: u64,
}

#[derive(Debug)]
pub struct GameState {
    /// Validated tuning this state was built with
    pub tuning: Tuning,
    /// Pipe RNG seed for reproducibility
    pub seed: u64,
    pub bird: Bird,
    pub pipes: PipeManager,
    pub phase: PhaseMachine,
    pub score: ScoreTracker,
    pub events: EventBus,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
    /// Ticks spent in Playing during the current run
    pub time_ticks: u64,
}

impl GameState {
    /// Build a new game. Fails fast on invalid tuning.
    pub fn new(
        tuning: Tuning,
        seed: u64,
        store: Box<dyn KeyValueStore>,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;

        Ok(Self {
            tuning,
            seed,
            bird: Bird::new(&tuning),
            pipes: PipeManager::new(&tuning, seed),
            phase: PhaseMachine::new(),
            score: ScoreTracker::new(store),
            events: EventBus::new(),
            idle_mode: false,
            time_ticks: 0,
        })
    }

    #[inline]
    pub fn current_phase(&self) -> GamePhase {
        self.phase.current()
    }

    /// Put bird, pipes and score back to the start of a run
    pub fn reset_run(&mut self) {
        self.bird.reset();
        self.pipes.reset();
        self.score.reset();
        self.time_ticks = 0;
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.publish(&event);
    }

    pub fn debug_info(&self) -> DebugInfo {
        DebugInfo {
            phase: self.phase.current(),
            bird_y: (self.bird.pos.y * 10.0).round() / 10.0,
            bird_velocity: (self.bird.velocity * 100.0).round() / 100.0,
            pipe_count: self.pipes.len(),
            pipe_speed: self.pipes.current_speed(),
            gap_size: self.pipes.current_gap_size(),
            spawn_interval_ms: self.pipes.current_spawn_interval_ms(),
            time_ticks: self.time_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_new_state() {
        let state = GameState::new(Tuning::default(), 1, Box::new(MemoryStore::new())).unwrap();
        assert_eq!(state.current_phase(), GamePhase::Start);
        assert!(state.bird.is_alive());
        assert!(state.pipes.is_empty());
        assert_eq!(state.score.current(), 0);
    }

    #[test]
    fn test_invalid_tuning_fails_fast() {
        let mut tuning = Tuning::default();
        tuning.pipe.gap_size = 1000.0;
        let result = GameState::new(tuning, 1, Box::new(MemoryStore::new()));
        assert!(matches!(result, Err(TuningError::GapTooLarge { .. })));
    }

    #[test]
    fn test_debug_info_rounding() {
        let mut state = GameState::new(Tuning::default(), 1, Box::new(MemoryStore::new())).unwrap();
        state.bird.pos.y = 123.456;
        state.bird.velocity = 1.23456;
        let info = state.debug_info();
        assert!((info.bird_y - 123.5).abs() < 1e-4);
        assert!((info.bird_velocity - 1.23).abs() < 1e-4);
        assert_eq!(info.pipe_count, 0);
        assert!(serde_json::to_string(&info).is_ok());
    }
}
