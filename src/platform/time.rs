//! Frame timing

use serde::Serialize;

use crate::consts::MAX_DELTA_MS;

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Turns absolute frame timestamps into clamped deltas
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_delta_ms: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_DELTA_MS)
    }
}

impl FrameClock {
    pub fn new(max_delta_ms: f32) -> Self {
        Self {
            last_ms: None,
            max_delta_ms,
        }
    }

    /// Delta since the previous frame in ms, clamped to `[0, max_delta_ms]`.
    /// The first frame after construction or [`reset`](Self::reset) is 0.
    pub fn frame(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(last) => (now_ms - last) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        delta.clamp(0.0, self.max_delta_ms)
    }

    /// Forget the last timestamp (e.g. after the tab was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    #[inline]
    pub fn last_ms(&self) -> Option<f64> {
        self.last_ms
    }
}

/// Snapshot for the debug overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FrameStats {
    pub fps: u32,
    /// Wall time between the last two frames
    pub frame_time_ms: f32,
    /// Delta actually fed to the simulation (after clamping)
    pub delta_ms: f32,
}

/// Rolling FPS over the last [`FPS_WINDOW`] frame timestamps
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
    frame_time_ms: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
            frame_time_ms: 0.0,
        }
    }

    pub fn record(&mut self, now_ms: f64) {
        if self.frames_seen > 0 {
            let prev = self.frame_times[(self.frame_index + FPS_WINDOW - 1) % FPS_WINDOW];
            self.frame_time_ms = (now_ms - prev) as f32;
        }

        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen = (self.frames_seen + 1).min(FPS_WINDOW);

        // Oldest sample still in the window
        let oldest = if self.frames_seen < FPS_WINDOW {
            self.frame_times[0]
        } else {
            self.frame_times[self.frame_index]
        };
        let intervals = (self.frames_seen - 1) as f64;
        let elapsed = now_ms - oldest;
        if intervals > 0.0 && elapsed > 0.0 {
            self.fps = (intervals * 1000.0 / elapsed).round() as u32;
        }
    }

    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    #[inline]
    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms
    }

    pub fn stats(&self, delta_ms: f32) -> FrameStats {
        FrameStats {
            fps: self.fps,
            frame_time_ms: self.frame_time_ms,
            delta_ms,
        }
    }
}
