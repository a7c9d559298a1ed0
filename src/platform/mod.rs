//! Platform abstraction layer
//!
//! Pure pieces of the browser/native glue so the driver stays thin:
//! - Frame time, delta clamping and FPS
//! - Device input to semantic [`InputEvent`](crate::sim::InputEvent) mapping
//! - Visibility/focus auto-pause
//!
//! Storage lives in [`crate::persistence`].

pub mod input;
pub mod time;

pub use input::{Key, PointerKind, input_for_key, input_for_pointer, input_for_visibility};
pub use time::{FpsCounter, FrameClock, FrameStats};
