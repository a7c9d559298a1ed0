//! The player's bird
//!
//! Physics is integrated in "reference frames": every quantity is tuned per
//! 16.67ms frame and scaled by `delta_ms / reference_frame_ms`, so the bird
//! falls the same distance per second at any frame rate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::clamp;
use crate::tuning::{BirdTuning, Tuning};

/// Why the bird died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Hit the ground line
    Ground,
    /// Flew into the top of the field
    Ceiling,
    /// Hit a pipe
    Pipe,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    /// Vertical velocity (px per reference frame, positive is down)
    pub velocity: f32,
    /// Radians, positive is nose-down
    pub rotation: f32,
    alive: bool,
    tuning: BirdTuning,
    floor_y: f32,
    reference_frame_ms: f32,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        let mut bird = Self {
            pos: Vec2::ZERO,
            velocity: 0.0,
            rotation: 0.0,
            alive: true,
            tuning: tuning.bird,
            floor_y: tuning.floor_y(),
            reference_frame_ms: tuning.physics.reference_frame_ms,
        };
        bird.reset();
        bird
    }

    /// Back to the start position, alive and level
    pub fn reset(&mut self) {
        self.pos = Vec2::new(self.tuning.x, self.tuning.start_y);
        self.velocity = 0.0;
        self.rotation = 0.0;
        self.alive = true;
    }

    /// Set the upward impulse, replacing whatever velocity we had
    pub fn jump(&mut self) {
        if self.alive {
            self.velocity = self.tuning.jump_velocity;
        }
    }

    /// Advance one frame. Returns the cause if the bird died at a boundary.
    pub fn update(&mut self, delta_ms: f32, is_playing: bool) -> Option<DeathCause> {
        if !is_playing || !self.alive {
            return None;
        }

        let frames = delta_ms / self.reference_frame_ms;
        let max_fall = self.tuning.max_fall_speed;

        self.velocity += self.tuning.gravity * frames;
        self.velocity = clamp(self.velocity, -max_fall * 2.0, max_fall);

        self.pos.y += self.velocity * frames;

        self.update_rotation();
        self.check_bounds()
    }

    /// Fixed step per tick, not scaled by delta
    fn update_rotation(&mut self) {
        let step = self.tuning.rotation_step;
        let max = self.tuning.max_rotation;
        if self.velocity < 0.0 {
            self.rotation = (self.rotation - step).max(-max);
        } else {
            self.rotation = (self.rotation + step).min(max);
        }
    }

    fn check_bounds(&mut self) -> Option<DeathCause> {
        let height = self.tuning.height;
        if self.pos.y + height >= self.floor_y {
            self.pos.y = self.floor_y - height;
            self.velocity = 0.0;
            return self.die(DeathCause::Ground);
        }
        if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
            self.velocity = 0.0;
            return self.die(DeathCause::Ceiling);
        }
        None
    }

    /// Kill the bird. Only the alive -> dead edge reports a cause, so the
    /// first cause in a tick wins and repeated calls are silent.
    pub fn die(&mut self, cause: DeathCause) -> Option<DeathCause> {
        let was_alive = self.alive;
        self.alive = false;
        was_alive.then_some(cause)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.tuning.width, self.tuning.height)
    }

    /// Visual bounding box
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size())
    }

    /// Hitbox, slightly smaller than the sprite
    pub fn collision_rect(&self) -> Rect {
        self.bounds().inset(self.tuning.hitbox_margin)
    }

    /// X of the beak, used to decide when a pipe has been passed
    #[inline]
    pub fn leading_edge(&self) -> f32 {
        self.pos.x + self.tuning.width
    }
}
