//! Canvas 2D rendering module
//!
//! [`shapes`] builds a plain draw list from the game state; [`canvas`] paints
//! it onto a `CanvasRenderingContext2d` in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

pub use shapes::{Color, Shape, Stroke, TextAlign, debug_overlay, scene};
