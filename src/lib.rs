//! Flappy Canvas - A side-scrolling arcade game for the browser
//!
//! Core modules:
//! - `sim`: Simulation core (bird physics, pipes, phases, scoring)
//! - `tuning`: Data-driven game balance, validated up front
//! - `persistence`: Key-value stores for the best score
//! - `platform`: Frame clock and input mapping
//! - `renderer`: Canvas 2D draw list

pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use rand::Rng;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Logical canvas size
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Bird defaults
    pub const BIRD_X: f32 = 100.0;
    pub const BIRD_START_Y: f32 = 250.0;
    pub const BIRD_WIDTH: f32 = 30.0;
    pub const BIRD_HEIGHT: f32 = 24.0;
    pub const JUMP_VELOCITY: f32 = -8.0;
    pub const GRAVITY: f32 = 0.4;
    pub const MAX_FALL_SPEED: f32 = 8.0;
    /// Rotation applied per tick (radians), independent of frame time
    pub const ROTATION_STEP: f32 = 0.15;
    pub const MAX_ROTATION: f32 = 0.8;
    /// Hitbox inset on every side
    pub const HITBOX_MARGIN: f32 = 2.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 60.0;
    pub const PIPE_GAP: f32 = 150.0;
    /// Pixels per reference frame
    pub const PIPE_SPEED: f32 = 2.5;
    pub const PIPE_SPAWN_INTERVAL_MS: f64 = 1800.0;
    pub const PIPE_MIN_HEIGHT: f32 = 50.0;

    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Nominal frame duration physics is normalized against (60 Hz)
    pub const REFERENCE_FRAME_MS: f32 = 16.67;
    /// Largest delta fed to the simulation (30 Hz equivalent)
    pub const MAX_DELTA_MS: f32 = 1000.0 / 30.0;

    /// Delay between GameOver -> Start and the automatic Start -> Playing
    pub const RESTART_DELAY_MS: f64 = 100.0;

    /// Persistence key for the best score
    pub const BEST_SCORE_KEY: &str = "flappyBirdBestScore";
}

/// Clamp `value` into `[min, max]`
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Uniform random integer in the inclusive range `[min, max]`
///
/// Degenerate ranges (`max <= min`) collapse to `min`.
#[inline]
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(12.0, 0.0, 10.0), 10.0);
        // Asymmetric velocity band
        assert_eq!(clamp(-20.0, -16.0, 8.0), -16.0);
    }

    #[test]
    fn test_random_int_inclusive() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut saw_min = false;
        let mut saw_max = false;
        for _ in 0..2000 {
            let v = random_int(&mut rng, 3, 6);
            assert!((3..=6).contains(&v));
            saw_min |= v == 3;
            saw_max |= v == 6;
        }
        assert!(saw_min && saw_max);
    }

    #[test]
    fn test_random_int_degenerate_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(random_int(&mut rng, 125, 125), 125);
        assert_eq!(random_int(&mut rng, 10, 2), 10);
    }
}
