//! Frame timing for the host tick loop

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

/// One host frame: the wall-clock instant and the real time since the
/// previous frame.
#[derive(Debug, Clone)]
pub struct Tick {
    /// Current calendar instant in the host's local timezone.
    pub now: DateTime<Local>,
    /// Seconds elapsed since the previous tick (0 on the first tick).
    pub delta_secs: f32,
}

/// Monotonic tick source.
///
/// Deltas come from [`Instant`] so they never go backwards, even when the
/// wall clock is adjusted; the calendar instant is read separately.
pub struct FrameClock {
    last_frame: Option<Instant>,
    frame_count: u64,
    fps_timer: Instant,
    fps: f32,
    fps_frame_count: u32,
}

impl FrameClock {
    /// Create a new frame clock. The first [`tick`](Self::tick) reports a
    /// zero delta.
    pub fn new() -> Self {
        Self {
            last_frame: None,
            frame_count: 0,
            fps_timer: Instant::now(),
            fps: 0.0,
            fps_frame_count: 0,
        }
    }

    /// Call once per frame
    pub fn tick(&mut self) -> Tick {
        let now = Instant::now();
        let delta = self
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_frame = Some(now);
        self.frame_count += 1;
        self.fps_frame_count += 1;

        // Update FPS every second
        let fps_elapsed = now.saturating_duration_since(self.fps_timer);
        if fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_timer = now;
        }

        Tick {
            now: Local::now(),
            delta_secs: delta.as_secs_f32(),
        }
    }

    /// Get current FPS (updated every second)
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
