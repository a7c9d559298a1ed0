//! Idle/demo mode controller
//!
//! Aims the bird's center slightly below the center of the next gap and
//! flaps whenever it sinks past that line.

use super::state::GameState;

/// How far below the gap center the bird may sink before flapping,
/// as a fraction of the gap size
const SINK_FRACTION: f32 = 1.0 / 6.0;

/// Gap center of the next pipe ahead of the bird, or mid-field if none
pub fn target_y(state: &GameState) -> f32 {
    let bird_x = state.bird.pos.x;
    state
        .pipes
        .pipes()
        .iter()
        .find(|p| p.right() > bird_x)
        .map(|p| p.gap_y)
        .unwrap_or(state.tuning.floor_y() / 2.0)
}

/// Whether the autopilot wants to jump this tick
pub fn should_jump(state: &GameState) -> bool {
    if !state.bird.is_alive() || state.bird.velocity < 0.0 {
        return false;
    }

    let gap = state
        .pipes
        .pipes()
        .iter()
        .find(|p| p.right() > state.bird.pos.x)
        .map(|p| p.gap_size)
        .unwrap_or(state.pipes.current_gap_size());

    let center_y = state.bird.bounds().center().y;
    center_y > target_y(state) + gap * SINK_FRACTION
}
