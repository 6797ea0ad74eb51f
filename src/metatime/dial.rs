//! Meta-time: the position of "now" on the 12-hour dial.
//!
//! Whatever the real length of the current phase, it is stretched onto
//! [`DIAL_SECONDS`] meta-seconds, so the dial reads `00:00:00` at sunrise
//! (or sunset) and arrives back at 12 o'clock exactly at the next boundary.

use std::f64::consts::TAU;

use chrono::{DateTime, TimeZone};

use crate::metatime::cycle::Cycle;
use crate::metatime::solar::SolarContext;

/// Meta-seconds on the dial (12 hours).
pub const DIAL_SECONDS: f64 = 43_200.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Everything derived from "now" for one tick. Rebuilt from scratch every
/// tick.
#[derive(Clone, Debug, PartialEq)]
pub struct MetaTimeState<Tz: TimeZone> {
    /// Dial position in `[0, 43200]`.
    pub meta_seconds_total: f64,
    pub meta_hours: u32,
    pub meta_minutes: u32,
    pub meta_seconds: u32,
    /// `HH:MM:SS`, zero-padded.
    pub meta_time_string: String,
    /// How many real seconds one meta-second lasts in this phase.
    pub real_seconds_per_meta_second: f64,
    pub is_day: bool,
    pub period_start: DateTime<Tz>,
    pub period_end: DateTime<Tz>,
    pub period_duration_ms: i64,
    pub sun_data: SolarContext<Tz>,
}

/// Pointer angles in radians, clockwise from 12 o'clock, each in `[0, 2π)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandAngles {
    pub hour_angle: f64,
    pub minute_angle: f64,
    pub second_angle: f64,
}

/// Compute the dial position of `now` within `cycle`.
pub fn compute_meta_time<Tz: TimeZone>(
    now: &DateTime<Tz>,
    cycle: &Cycle<Tz>,
    sun_data: SolarContext<Tz>,
) -> MetaTimeState<Tz> {
    let period_duration_ms = cycle.duration().num_milliseconds().max(1);
    // Clamp absorbs drift at the boundaries; the cycle itself is not
    // re-selected here.
    let elapsed_ms = (now.clone() - cycle.period_start.clone())
        .num_milliseconds()
        .clamp(0, period_duration_ms);

    let ms_per_meta_second = period_duration_ms as f64 / DIAL_SECONDS;
    let meta_seconds_total = elapsed_ms as f64 / ms_per_meta_second;

    let meta_hours = (meta_seconds_total / SECONDS_PER_HOUR).floor() as u32;
    let meta_minutes = ((meta_seconds_total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE).floor() as u32;
    let meta_seconds = (meta_seconds_total % SECONDS_PER_MINUTE).floor() as u32;

    MetaTimeState {
        meta_seconds_total,
        meta_hours,
        meta_minutes,
        meta_seconds,
        meta_time_string: format!("{meta_hours:02}:{meta_minutes:02}:{meta_seconds:02}"),
        real_seconds_per_meta_second: ms_per_meta_second / 1000.0,
        is_day: cycle.is_day,
        period_start: cycle.period_start.clone(),
        period_end: cycle.period_end.clone(),
        period_duration_ms,
        sun_data,
    }
}

/// Continuous (non-ticking) pointer angles for a dial position.
pub fn angles_from_meta_seconds(meta_seconds_total: f64) -> HandAngles {
    let hour = meta_seconds_total / DIAL_SECONDS;
    let minute = (meta_seconds_total % SECONDS_PER_HOUR) / SECONDS_PER_HOUR;
    let second = (meta_seconds_total % SECONDS_PER_MINUTE) / SECONDS_PER_MINUTE;

    HandAngles {
        hour_angle: (hour * TAU).rem_euclid(TAU),
        minute_angle: (minute * TAU).rem_euclid(TAU),
        second_angle: (second * TAU).rem_euclid(TAU),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
