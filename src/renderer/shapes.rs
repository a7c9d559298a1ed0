//! Draw list generation
//!
//! Turns a [`GameState`] into an ordered list of 2D primitives. Nothing here
//! touches the browser, so the scene can be tested natively.

use glam::Vec2;

use crate::platform::FrameStats;
use crate::sim::{DebugInfo, GamePhase, GameState, Rect};

/// sRGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub mod palette {
    use super::Color;

    pub const SKY: Color = Color::hex(0x87CEEB);
    pub const PIPE: Color = Color::hex(0x228B22);
    pub const PIPE_OUTLINE: Color = Color::hex(0x006400);
    pub const PIPE_CAP: Color = Color::hex(0x32CD32);
    pub const GROUND: Color = Color::hex(0xDEB887);
    pub const GROUND_STRIPE: Color = Color::hex(0xD2B48C);
    pub const BIRD: Color = Color::hex(0xFFD700);
    pub const BIRD_OUTLINE: Color = Color::hex(0xFF8C00);
    pub const WHITE: Color = Color::hex(0xFFFFFF);
    pub const BLACK: Color = Color::hex(0x000000);
    pub const GAME_OVER: Color = Color::hex(0xFF4444);
    pub const BEST: Color = Color::hex(0xFFFF88);
    pub const HINT: Color = Color::hex(0xCCCCCC);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        rect: Rect,
        fill: Color,
        stroke: Option<Stroke>,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        /// Radians, clockwise in screen space
        rotation: f32,
        fill: Color,
        stroke: Option<Stroke>,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        bold: bool,
        align: TextAlign,
        fill: Color,
        stroke: Option<Stroke>,
    },
    /// Full-canvas dimming layer
    Overlay { alpha: f32 },
}

const PIPE_CAP_HEIGHT: f32 = 20.0;
const PIPE_CAP_OVERHANG: f32 = 5.0;
const GROUND_STRIPE_SPACING: f32 = 20.0;
const GROUND_STRIPE_WIDTH: f32 = 10.0;
const GROUND_STRIPE_INSET: f32 = 10.0;

/// Build the frame's draw list, back to front
pub fn scene(state: &GameState) -> Vec<Shape> {
    let canvas = state.tuning.canvas;
    let mut shapes = Vec::with_capacity(8 + state.pipes.len() * 4);

    shapes.push(Shape::Rect {
        rect: Rect::new(0.0, 0.0, canvas.width, canvas.height),
        fill: palette::SKY,
        stroke: None,
    });

    push_pipes(state, &mut shapes);
    push_ground(state, &mut shapes);
    push_bird(state, &mut shapes);
    push_hud(state, &mut shapes);

    match state.current_phase() {
        GamePhase::Paused => push_pause_overlay(state, &mut shapes),
        GamePhase::GameOver => push_game_over_overlay(state, &mut shapes),
        GamePhase::Start | GamePhase::Playing => {}
    }

    shapes
}

fn push_pipes(state: &GameState, shapes: &mut Vec<Shape>) {
    let outline = Some(Stroke {
        color: palette::PIPE_OUTLINE,
        width: 2.0,
    });

    for pipe in state.pipes.pipes() {
        let upper = pipe.upper_rect();
        let lower = pipe.lower_rect();

        for segment in [upper, lower] {
            if segment.h > 0.0 {
                shapes.push(Shape::Rect {
                    rect: segment,
                    fill: palette::PIPE,
                    stroke: outline,
                });
            }
        }

        // Caps sit on the gap side of each segment
        let cap_x = pipe.x - PIPE_CAP_OVERHANG;
        let cap_w = pipe.width + PIPE_CAP_OVERHANG * 2.0;
        if upper.h > 0.0 {
            shapes.push(Shape::Rect {
                rect: Rect::new(cap_x, upper.bottom() - PIPE_CAP_HEIGHT, cap_w, PIPE_CAP_HEIGHT),
                fill: palette::PIPE_CAP,
                stroke: outline,
            });
        }
        if lower.h > 0.0 {
            shapes.push(Shape::Rect {
                rect: Rect::new(cap_x, lower.y, cap_w, PIPE_CAP_HEIGHT),
                fill: palette::PIPE_CAP,
                stroke: outline,
            });
        }
    }
}

fn push_ground(state: &GameState, shapes: &mut Vec<Shape>) {
    let width = state.tuning.canvas.width;
    let floor_y = state.tuning.floor_y();
    let height = state.tuning.ground.height;

    shapes.push(Shape::Rect {
        rect: Rect::new(0.0, floor_y, width, height),
        fill: palette::GROUND,
        stroke: None,
    });

    let mut x = 0.0;
    while x < width {
        shapes.push(Shape::Rect {
            rect: Rect::new(
                x,
                floor_y + GROUND_STRIPE_INSET,
                GROUND_STRIPE_WIDTH,
                height - GROUND_STRIPE_INSET,
            ),
            fill: palette::GROUND_STRIPE,
            stroke: None,
        });
        x += GROUND_STRIPE_SPACING;
    }
}

fn push_bird(state: &GameState, shapes: &mut Vec<Shape>) {
    let bird = &state.bird;
    let center = bird.bounds().center();
    let rotation = bird.rotation;

    shapes.push(Shape::Ellipse {
        center,
        radii: bird.size() / 2.0,
        rotation,
        fill: palette::BIRD,
        stroke: Some(Stroke {
            color: palette::BIRD_OUTLINE,
            width: 2.0,
        }),
    });

    // Eye rotates with the body
    let eye = center + Vec2::from_angle(rotation).rotate(Vec2::new(5.0, -3.0));
    shapes.push(Shape::Ellipse {
        center: eye,
        radii: Vec2::splat(4.0),
        rotation: 0.0,
        fill: palette::WHITE,
        stroke: Some(Stroke {
            color: palette::BLACK,
            width: 1.0,
        }),
    });
    let pupil = center + Vec2::from_angle(rotation).rotate(Vec2::new(6.0, -2.0));
    shapes.push(Shape::Ellipse {
        center: pupil,
        radii: Vec2::splat(2.0),
        rotation: 0.0,
        fill: palette::BLACK,
        stroke: None,
    });
}

fn push_hud(state: &GameState, shapes: &mut Vec<Shape>) {
    let cx = state.tuning.canvas.width / 2.0;

    if state.current_phase() == GamePhase::Start {
        shapes.push(centered_text(
            "Press SPACE or tap to start",
            Vec2::new(cx, state.tuning.canvas.height / 3.0),
            24.0,
            false,
            palette::WHITE,
        ));
        return;
    }

    shapes.push(Shape::Text {
        text: state.score.current().to_string(),
        pos: Vec2::new(cx, 60.0),
        size: 48.0,
        bold: true,
        align: TextAlign::Center,
        fill: palette::WHITE,
        stroke: Some(Stroke {
            color: palette::BLACK,
            width: 3.0,
        }),
    });
}

fn push_pause_overlay(state: &GameState, shapes: &mut Vec<Shape>) {
    let center = Vec2::new(state.tuning.canvas.width, state.tuning.canvas.height) / 2.0;

    shapes.push(Shape::Overlay { alpha: 0.5 });
    shapes.push(centered_text("PAUSED", center, 48.0, true, palette::WHITE));
    shapes.push(centered_text(
        "Press P to resume",
        center + Vec2::new(0.0, 60.0),
        24.0,
        false,
        palette::WHITE,
    ));
}

fn push_game_over_overlay(state: &GameState, shapes: &mut Vec<Shape>) {
    let center = Vec2::new(state.tuning.canvas.width, state.tuning.canvas.height) / 2.0;
    let score = &state.score;

    shapes.push(Shape::Overlay { alpha: 0.7 });
    shapes.push(Shape::Text {
        text: "GAME OVER".to_string(),
        pos: center - Vec2::new(0.0, 50.0),
        size: 64.0,
        bold: true,
        align: TextAlign::Center,
        fill: palette::GAME_OVER,
        stroke: Some(Stroke {
            color: palette::WHITE,
            width: 3.0,
        }),
    });
    shapes.push(centered_text(
        &format!("Score: {}", score.current()),
        center + Vec2::new(0.0, 20.0),
        32.0,
        true,
        palette::WHITE,
    ));

    let best = if score.is_new_best() {
        format!("NEW BEST: {}", score.best())
    } else {
        format!("Best: {}", score.best())
    };
    shapes.push(centered_text(
        &best,
        center + Vec2::new(0.0, 60.0),
        28.0,
        false,
        palette::BEST,
    ));
    shapes.push(centered_text(
        "Press SPACE to restart",
        center + Vec2::new(0.0, 120.0),
        24.0,
        false,
        palette::HINT,
    ));
}

fn centered_text(text: &str, pos: Vec2, size: f32, bold: bool, fill: Color) -> Shape {
    Shape::Text {
        text: text.to_string(),
        pos,
        size,
        bold,
        align: TextAlign::Center,
        fill,
        stroke: None,
    }
}

/// Top-left diagnostics panel
pub fn debug_overlay(info: &DebugInfo, frame: &FrameStats) -> Vec<Shape> {
    let lines = [
        format!("fps: {}", frame.fps),
        format!(
            "frame: {:.1}ms dt: {:.1}ms",
            frame.frame_time_ms, frame.delta_ms
        ),
        format!("phase: {}", info.phase.as_str()),
        format!("bird y: {:.1} v: {:.2}", info.bird_y, info.bird_velocity),
        format!("pipes: {}", info.pipe_count),
        format!("speed: {:.2} gap: {:.0}", info.pipe_speed, info.gap_size),
        format!("spawn: {:.0}ms", info.spawn_interval_ms),
        format!("ticks: {}", info.time_ticks),
    ];

    let mut shapes = Vec::with_capacity(lines.len() + 1);
    shapes.push(Shape::Rect {
        rect: Rect::new(5.0, 5.0, 190.0, 10.0 + lines.len() as f32 * 16.0),
        fill: palette::BLACK.with_alpha(0.6),
        stroke: None,
    });
    for (i, line) in lines.into_iter().enumerate() {
        shapes.push(Shape::Text {
            text: line,
            pos: Vec2::new(10.0, 20.0 + i as f32 * 16.0),
            size: 12.0,
            bold: false,
            align: TextAlign::Left,
            fill: palette::WHITE,
            stroke: None,
        });
    }
    shapes
}
