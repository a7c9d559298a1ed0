//! Frame driver contract
//!
//! The driver calls [`handle_input`] for each semantic input and [`tick`] once
//! per animation frame with an already-clamped delta and the current time.
//! Time is never read from a clock in here.

use super::autopilot;
use super::bird::DeathCause;
use super::events::GameEvent;
use super::phase::{GamePhase, PhaseChange};
use super::state::GameState;

/// Semantic inputs (device mapping lives in `platform::input`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Flap, start a run, or restart after game over
    Jump,
    Pause,
    Resume,
    /// Pause when playing, resume when paused
    TogglePause,
}

/// Apply one input
pub fn handle_input(state: &mut GameState, input: InputEvent, now_ms: f64) {
    let change = match input {
        InputEvent::Jump => match state.phase.current() {
            GamePhase::Start => state.phase.start(),
            GamePhase::Playing => {
                state.bird.jump();
                None
            }
            GamePhase::GameOver => state.phase.restart(now_ms, state.tuning.restart_delay_ms),
            GamePhase::Paused => None,
        },
        InputEvent::Pause => state.phase.pause(),
        InputEvent::Resume => state.phase.resume(),
        InputEvent::TogglePause => match state.phase.current() {
            GamePhase::Playing => state.phase.pause(),
            GamePhase::Paused => state.phase.resume(),
            _ => None,
        },
    };

    if let Some(change) = change {
        apply_phase_change(state, change);
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, delta_ms: f32, now_ms: f64) {
    // Deferred restart (Start -> Playing)
    if let Some(change) = state.phase.poll(now_ms) {
        apply_phase_change(state, change);
    }

    if state.idle_mode {
        drive_autopilot(state, now_ms);
    }

    let playing = state.phase.is_playing();
    if playing {
        state.time_ticks += 1;
    }

    if let Some(cause) = state.bird.update(delta_ms, playing) {
        on_bird_death(state, cause);
    }

    // Pipes keep moving for the rest of the frame the bird died in
    if !playing {
        return;
    }
    state.pipes.update(delta_ms, now_ms);

    if !state.bird.is_alive() {
        return;
    }

    let death = if state.pipes.check_collision(&state.bird.collision_rect()) {
        state.bird.die(DeathCause::Pipe)
    } else {
        None
    };

    // A pipe cleared on the fatal frame still counts and lands in the summary
    let passed = state.pipes.check_scoring(state.bird.leading_edge());
    if passed > 0 {
        let update = state.score.add_score(passed);
        state.emit(GameEvent::ScoreAdded {
            current: update.current,
            new_best: update.new_best,
        });
        state.pipes.apply_difficulty(update.current);
    }

    if let Some(cause) = death {
        on_bird_death(state, cause);
    }
}

fn drive_autopilot(state: &mut GameState, now_ms: f64) {
    match state.phase.current() {
        GamePhase::Start | GamePhase::GameOver => {
            // Don't re-trigger restart while the deferred start is pending
            if !state.phase.has_pending() {
                handle_input(state, InputEvent::Jump, now_ms);
            }
        }
        GamePhase::Playing => {
            if autopilot::should_jump(state) {
                state.bird.jump();
            }
        }
        GamePhase::Paused => {}
    }
}

fn on_bird_death(state: &mut GameState, cause: DeathCause) {
    log::debug!("Bird died: {:?}", cause);
    state.emit(GameEvent::BirdDied { cause });
    if let Some(change) = state.phase.end() {
        apply_phase_change(state, change);
    }
}

/// Publish the change, then run the bookkeeping tied to it
fn apply_phase_change(state: &mut GameState, change: PhaseChange) {
    state.emit(GameEvent::PhaseChanged {
        from: change.from,
        to: change.to,
    });

    match (change.from, change.to) {
        (GamePhase::Start, GamePhase::Playing) => state.reset_run(),
        (_, GamePhase::GameOver) => {
            let summary = state.score.on_run_end();
            state.emit(GameEvent::RunEnded(summary));
        }
        _ => {}
    }
}
