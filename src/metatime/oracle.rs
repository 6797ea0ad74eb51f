//! Astronomical oracle for sunrise/sunset instants.
//!
//! The meta-clock does not care how sunrise and sunset are computed, only
//! that it can ask for them per date. [`SolarOracle`] is that seam;
//! [`SunCalcOracle`] is the default implementation, following the SunCalc
//! formulas (low-precision, good to about a minute outside the polar
//! circles).

use std::f64::consts::PI;

use chrono::{DateTime, TimeDelta, Utc};

use crate::metatime::location::GeoCoordinate;

/// Raw oracle answer for one date. `None` means the sun does not cross the
/// horizon that way on this date (polar day or polar night).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

/// Supplies sunrise/sunset for the date whose local midnight is `midnight`.
pub trait SolarOracle {
    fn sun_times(&self, midnight: DateTime<Utc>, coordinate: GeoCoordinate) -> SunTimes;
}

impl<F> SolarOracle for F
where
    F: Fn(DateTime<Utc>, GeoCoordinate) -> SunTimes,
{
    #[inline]
    fn sun_times(&self, midnight: DateTime<Utc>, coordinate: GeoCoordinate) -> SunTimes {
        self(midnight, coordinate)
    }
}

// ---------------------------------------------------------------------------
// SunCalc
// ---------------------------------------------------------------------------

const RAD: f64 = PI / 180.0;
const DAY_MS: f64 = 86_400_000.0;
const J1970: f64 = 2_440_588.0;
const J2000: f64 = 2_451_545.0;
const J0: f64 = 0.0009;
/// Obliquity of the Earth.
const OBLIQUITY: f64 = RAD * 23.4397;
/// Sun altitude at apparent sunrise/sunset, including refraction and the
/// solar disc radius.
const HORIZON_ALTITUDE_DEG: f64 = -0.833;

/// SunCalc sunrise/sunset oracle.
#[derive(Clone, Copy, Debug, Default)]
pub struct SunCalcOracle {
    /// Observer height above the horizon in metres. Raises the apparent
    /// horizon slightly, so sunrise comes earlier and sunset later.
    pub observer_height: f64,
}

impl SunCalcOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer_height(observer_height: f64) -> Self {
        Self { observer_height }
    }
}

impl SolarOracle for SunCalcOracle {
    fn sun_times(&self, midnight: DateTime<Utc>, coordinate: GeoCoordinate) -> SunTimes {
        let lw = RAD * -coordinate.longitude();
        let phi = RAD * coordinate.latitude();
        let dh = observer_angle(self.observer_height);

        // Evaluate at local noon so the Julian cycle rounds to this date
        // wherever the observer's midnight falls relative to UTC.
        let d = to_days(midnight + TimeDelta::hours(12));
        let n = julian_cycle(d, lw);
        let ds = approx_transit(0.0, lw, n);

        let m = solar_mean_anomaly(ds);
        let l = ecliptic_longitude(m);
        let dec = declination(l, 0.0);

        let j_noon = solar_transit_j(ds, m, l);

        let h0 = (HORIZON_ALTITUDE_DEG + dh) * RAD;
        let Some(w) = hour_angle(h0, phi, dec) else {
            return SunTimes::default();
        };
        let j_set = solar_transit_j(approx_transit(w, lw, n), m, l);
        let j_rise = j_noon - (j_set - j_noon);

        SunTimes {
            sunrise: from_julian(j_rise),
            sunset: from_julian(j_set),
        }
    }
}

fn to_julian(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / DAY_MS - 0.5 + J1970
}

fn from_julian(j: f64) -> Option<DateTime<Utc>> {
    let ms = (j + 0.5 - J1970) * DAY_MS;
    if !ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ms.round() as i64)
}

fn to_days(instant: DateTime<Utc>) -> f64 {
    to_julian(instant) - J2000
}

fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

fn solar_mean_anomaly(d: f64) -> f64 {
    RAD * (357.5291 + 0.985_600_28 * d)
}

fn ecliptic_longitude(m: f64) -> f64 {
    // Equation of center
    let c = RAD * (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    // Perihelion of the Earth
    let p = RAD * 102.9372;
    m + c + p + PI
}

fn julian_cycle(d: f64, lw: f64) -> f64 {
    (d - J0 - lw / (2.0 * PI)).round()
}

fn approx_transit(ht: f64, lw: f64, n: f64) -> f64 {
    J0 + (ht + lw) / (2.0 * PI) + n
}

fn solar_transit_j(ds: f64, m: f64, l: f64) -> f64 {
    J2000 + ds + 0.0053 * m.sin() - 0.0069 * (2.0 * l).sin()
}

/// Hour angle at which the sun reaches altitude `h`, or `None` when it
/// never does on this date.
fn hour_angle(h: f64, phi: f64, dec: f64) -> Option<f64> {
    let cos_w = (h.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
    if !cos_w.is_finite() || !(-1.0..=1.0).contains(&cos_w) {
        return None;
    }
    Some(cos_w.acos())
}

/// Horizon depression in degrees for an observer `height` metres up.
fn observer_angle(height: f64) -> f64 {
    if height <= 0.0 {
        return 0.0;
    }
    -2.076 * height.sqrt() / 60.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
