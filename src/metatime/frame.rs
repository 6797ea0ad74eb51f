//! Per-tick output for the presentation layer, plus a GPU-ready uniform.

use bytemuck::{Pod, Zeroable};
use chrono::TimeZone;

use crate::metatime::dial::{HandAngles, MetaTimeState};

// ---------------------------------------------------------------------------
// CPU-side frame
// ---------------------------------------------------------------------------

/// Everything the renderer and overlay need for one frame.
#[derive(Clone, Debug)]
pub struct ClockFrame<Tz: TimeZone> {
    pub meta: MetaTimeState<Tz>,
    pub angles: HandAngles,
    /// 1 = fully day, 0 = fully night.
    pub blend_factor: f32,
    pub transitioning: bool,
}

impl<Tz: TimeZone> ClockFrame<Tz> {
    /// Build a GPU-ready uniform from this frame.
    pub fn uniform(&self) -> ClockUniform {
        ClockUniform::from(self)
    }
}

// ---------------------------------------------------------------------------
// GPU uniform
// ---------------------------------------------------------------------------

/// Hand angles and theme blend packed for a shader.
///
/// Two 16-byte rows, so the struct can be bound directly as a WGSL uniform.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ClockUniform {
    // -- Hands + blend (16 bytes) --
    pub hour_angle: f32,
    pub minute_angle: f32,
    pub second_angle: f32,
    pub blend_factor: f32,

    // -- Dial (16 bytes) --
    pub meta_seconds_total: f32,
    pub real_seconds_per_meta_second: f32,
    pub is_day: u32,
    pub _pad: f32,
}

impl<Tz: TimeZone> From<&ClockFrame<Tz>> for ClockUniform {
    fn from(f: &ClockFrame<Tz>) -> Self {
        Self {
            hour_angle: f.angles.hour_angle as f32,
            minute_angle: f.angles.minute_angle as f32,
            second_angle: f.angles.second_angle as f32,
            blend_factor: f.blend_factor,
            meta_seconds_total: f.meta.meta_seconds_total as f32,
            real_seconds_per_meta_second: f.meta.real_seconds_per_meta_second as f32,
            is_day: f.meta.is_day as u32,
            _pad: 0.0,
        }
    }
}
