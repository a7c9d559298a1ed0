//! Data-driven game balance
//!
//! A `Tuning` is built once (defaults or JSON), validated, and then copied by
//! value into every simulation component. Nothing reads it from global state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Logical canvas dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasTuning {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

/// Bird physics and geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirdTuning {
    pub x: f32,
    pub start_y: f32,
    pub width: f32,
    pub height: f32,
    /// Velocity set (not added) on jump; negative is up
    pub jump_velocity: f32,
    /// Added to velocity per reference frame
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub rotation_step: f32,
    pub max_rotation: f32,
    pub hitbox_margin: f32,
}

impl Default for BirdTuning {
    fn default() -> Self {
        Self {
            x: BIRD_X,
            start_y: BIRD_START_Y,
            width: BIRD_WIDTH,
            height: BIRD_HEIGHT,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            max_fall_speed: MAX_FALL_SPEED,
            rotation_step: ROTATION_STEP,
            max_rotation: MAX_ROTATION,
            hitbox_margin: HITBOX_MARGIN,
        }
    }
}

/// Pipe geometry and spawning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeTuning {
    pub width: f32,
    pub gap_size: f32,
    /// Pixels per reference frame
    pub speed: f32,
    pub spawn_interval_ms: f64,
    /// Minimum visible height of either segment
    pub min_height: f32,
}

impl Default for PipeTuning {
    fn default() -> Self {
        Self {
            width: PIPE_WIDTH,
            gap_size: PIPE_GAP,
            speed: PIPE_SPEED,
            spawn_interval_ms: PIPE_SPAWN_INTERVAL_MS,
            min_height: PIPE_MIN_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundTuning {
    pub height: f32,
}

impl Default for GroundTuning {
    fn default() -> Self {
        Self {
            height: GROUND_HEIGHT,
        }
    }
}

/// Time normalization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub reference_frame_ms: f32,
    pub max_delta_ms: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            reference_frame_ms: REFERENCE_FRAME_MS,
            max_delta_ms: MAX_DELTA_MS,
        }
    }
}

/// Optional score-driven difficulty ramp
///
/// Every `score_step` points raises the level by one. Speed grows and the gap
/// and spawn interval shrink, each bounded by its limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    pub score_step: u32,
    pub speed_increment: f32,
    pub max_speed: f32,
    pub gap_decrement: f32,
    pub min_gap_size: f32,
    pub interval_decrement_ms: f64,
    pub min_spawn_interval_ms: f64,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            score_step: 5,
            speed_increment: 0.25,
            max_speed: 5.0,
            gap_decrement: 5.0,
            min_gap_size: 110.0,
            interval_decrement_ms: 100.0,
            min_spawn_interval_ms: 1200.0,
        }
    }
}

/// Complete game tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas: CanvasTuning,
    pub bird: BirdTuning,
    pub pipe: PipeTuning,
    pub ground: GroundTuning,
    pub physics: PhysicsTuning,
    pub restart_delay_ms: f64,
    /// Disabled when absent
    pub difficulty: Option<DifficultyTuning>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas: CanvasTuning::default(),
            bird: BirdTuning::default(),
            pipe: PipeTuning::default(),
            ground: GroundTuning::default(),
            physics: PhysicsTuning::default(),
            restart_delay_ms: RESTART_DELAY_MS,
            difficulty: None,
        }
    }
}

/// Tuning precondition violations
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// JSON could not be parsed
    Parse(String),
    /// A value that must be strictly positive is not
    NotPositive { field: &'static str, value: f64 },
    /// Gap plus both minimum segments does not fit above the ground
    GapTooLarge { required: f32, playable: f32 },
    /// Bird start position lies outside the playable band
    BirdOutOfBounds { start_y: f32, floor_y: f32 },
    /// A difficulty limit contradicts its base value
    DifficultyRange { field: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(msg) => write!(f, "invalid tuning JSON: {}", msg),
            TuningError::NotPositive { field, value } => {
                write!(f, "{} must be positive (got {})", field, value)
            }
            TuningError::GapTooLarge { required, playable } => write!(
                f,
                "pipe gap needs {}px but only {}px are playable",
                required, playable
            ),
            TuningError::BirdOutOfBounds { start_y, floor_y } => write!(
                f,
                "bird start y {} is outside the playable band [0, {}]",
                start_y, floor_y
            ),
            TuningError::DifficultyRange { field } => {
                write!(f, "difficulty limit {} contradicts its base value", field)
            }
        }
    }
}

impl std::error::Error for TuningError {}

fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::NotPositive { field, value })
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields take defaults) and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Y coordinate of the ground line
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.canvas.height - self.ground.height
    }

    /// Check every precondition the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("canvas.width", self.canvas.width as f64)?;
        positive("canvas.height", self.canvas.height as f64)?;
        positive("bird.width", self.bird.width as f64)?;
        positive("bird.height", self.bird.height as f64)?;
        positive("bird.max_fall_speed", self.bird.max_fall_speed as f64)?;
        positive("pipe.width", self.pipe.width as f64)?;
        positive("pipe.gap_size", self.pipe.gap_size as f64)?;
        positive("pipe.speed", self.pipe.speed as f64)?;
        positive("pipe.spawn_interval_ms", self.pipe.spawn_interval_ms)?;
        positive("physics.reference_frame_ms", self.physics.reference_frame_ms as f64)?;
        positive("physics.max_delta_ms", self.physics.max_delta_ms as f64)?;

        if self.ground.height < 0.0 || self.pipe.min_height < 0.0 || self.bird.hitbox_margin < 0.0 {
            return Err(TuningError::NotPositive {
                field: "ground.height/pipe.min_height/bird.hitbox_margin",
                value: self.ground.height.min(self.pipe.min_height).min(self.bird.hitbox_margin) as f64,
            });
        }
        if self.bird.hitbox_margin * 2.0 >= self.bird.width.min(self.bird.height) {
            return Err(TuningError::NotPositive {
                field: "bird hitbox",
                value: (self.bird.width.min(self.bird.height) - self.bird.hitbox_margin * 2.0) as f64,
            });
        }

        let playable = self.floor_y();
        let required = self.pipe.gap_size + self.pipe.min_height * 2.0;
        if required > playable {
            return Err(TuningError::GapTooLarge { required, playable });
        }

        if self.bird.start_y <= 0.0 || self.bird.start_y + self.bird.height >= playable {
            return Err(TuningError::BirdOutOfBounds {
                start_y: self.bird.start_y,
                floor_y: playable,
            });
        }

        if let Some(d) = &self.difficulty {
            if d.score_step == 0 {
                return Err(TuningError::DifficultyRange {
                    field: "difficulty.score_step",
                });
            }
            positive("difficulty.min_gap_size", d.min_gap_size as f64)?;
            positive("difficulty.min_spawn_interval_ms", d.min_spawn_interval_ms)?;
            if d.max_speed < self.pipe.speed {
                return Err(TuningError::DifficultyRange {
                    field: "difficulty.max_speed",
                });
            }
            if d.min_gap_size > self.pipe.gap_size {
                return Err(TuningError::DifficultyRange {
                    field: "difficulty.min_gap_size",
                });
            }
            if d.min_spawn_interval_ms > self.pipe.spawn_interval_ms {
                return Err(TuningError::DifficultyRange {
                    field: "difficulty.min_spawn_interval_ms",
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.floor_y(), 520.0);
    }

    #[test]
    fn test_gap_larger_than_playable_fails_fast() {
        let mut tuning = Tuning::default();
        tuning.pipe.gap_size = 500.0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::GapTooLarge { .. })
        ));
    }

    #[test]
    fn test_from_json_partial_overrides() {
        let tuning = Tuning::from_json(r#"{ "pipe": { "gap_size": 120.0 } }"#).unwrap();
        assert_eq!(tuning.pipe.gap_size, 120.0);
        // Untouched fields keep their defaults
        assert_eq!(tuning.pipe.width, PIPE_WIDTH);
        assert_eq!(tuning.bird.gravity, GRAVITY);
        assert!(tuning.difficulty.is_none());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_zero_speed_rejected() {
        let mut tuning = Tuning::default();
        tuning.pipe.speed = 0.0;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NotPositive {
                field: "pipe.speed",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_difficulty_limits_checked() {
        let mut tuning = Tuning::default();
        tuning.difficulty = Some(DifficultyTuning {
            max_speed: 1.0,
            ..Default::default()
        });
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::DifficultyRange { .. })
        ));

        tuning.difficulty = Some(DifficultyTuning::default());
        assert!(tuning.validate().is_ok());
    }
}
