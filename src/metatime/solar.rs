//! Solar phase boundaries per calendar date.
//!
//! [`resolve_phase_bounds`] asks the oracle for one date and substitutes a
//! synthetic noon/midnight split when the sun does not rise or set.
//! [`SolarContext`] bundles the four instants needed to place any moment
//! of "today" into exactly one day- or night-phase.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};

use crate::metatime::location::GeoCoordinate;
use crate::metatime::oracle::SolarOracle;

/// Zero-based month indices (May through September) treated as northern
/// summer by the polar fallback.
const SUMMER_MONTHS: std::ops::RangeInclusive<u32> = 4..=8;

/// Which synthetic split was used for a date with no sunrise or sunset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolarFallback {
    /// Day-phase midnight → noon.
    PolarDay,
    /// Day-phase noon → midnight.
    PolarNight,
}

/// Sunrise and sunset for one date. `sunrise < sunset` always holds.
#[derive(Clone, Debug, PartialEq)]
pub struct SolarPhaseBounds<Tz: TimeZone> {
    pub sunrise: DateTime<Tz>,
    pub sunset: DateTime<Tz>,
    /// Set when the oracle had no answer and the bounds are synthetic.
    pub polar: Option<PolarFallback>,
}

/// Resolve sunrise/sunset for `date` in timezone `tz`.
pub fn resolve_phase_bounds<Tz, O>(
    date: NaiveDate,
    tz: &Tz,
    coordinate: GeoCoordinate,
    oracle: &O,
) -> SolarPhaseBounds<Tz>
where
    Tz: TimeZone,
    O: SolarOracle + ?Sized,
{
    let midnight = local_instant(tz, date.and_time(chrono::NaiveTime::MIN));
    let times = oracle.sun_times(midnight.with_timezone(&Utc), coordinate);

    match (times.sunrise, times.sunset) {
        (Some(sunrise), Some(sunset)) if sunrise < sunset => SolarPhaseBounds {
            sunrise: sunrise.with_timezone(tz),
            sunset: sunset.with_timezone(tz),
            polar: None,
        },
        _ => polar_fallback(date, tz, coordinate),
    }
}

/// Synthetic bounds for a date the oracle could not resolve.
///
/// Season comes from the calendar month alone, so the split flips abruptly
/// at the May and October boundaries.
pub fn polar_fallback<Tz: TimeZone>(
    date: NaiveDate,
    tz: &Tz,
    coordinate: GeoCoordinate,
) -> SolarPhaseBounds<Tz> {
    let start = date.and_time(chrono::NaiveTime::MIN);
    let midnight = local_instant(tz, start);
    let noon = local_instant(tz, start + TimeDelta::hours(12));

    let summer = SUMMER_MONTHS.contains(&date.month0());
    let kind = if coordinate.is_northern() == summer {
        PolarFallback::PolarDay
    } else {
        PolarFallback::PolarNight
    };
    log::debug!(
        "No sunrise/sunset for {date} at {:.2},{:.2}; using {kind:?} split",
        coordinate.latitude(),
        coordinate.longitude()
    );

    match kind {
        PolarFallback::PolarDay => SolarPhaseBounds {
            sunrise: midnight,
            sunset: noon,
            polar: Some(kind),
        },
        PolarFallback::PolarNight => SolarPhaseBounds {
            sunrise: noon,
            sunset: local_instant(tz, start + TimeDelta::days(1)),
            polar: Some(kind),
        },
    }
}

/// Map a local wall-clock time to an instant. A time skipped by a DST jump
/// resolves to the same wall time an hour later, which is the first valid
/// instant after an ordinary one-hour gap. The UTC reading is the last resort.
fn local_instant<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

// ---------------------------------------------------------------------------
// SolarContext
// ---------------------------------------------------------------------------

/// The four instants that bracket every moment of one local date.
#[derive(Clone, Debug, PartialEq)]
pub struct SolarContext<Tz: TimeZone> {
    pub today_sunrise: DateTime<Tz>,
    pub today_sunset: DateTime<Tz>,
    pub yesterday_sunset: DateTime<Tz>,
    pub tomorrow_sunrise: DateTime<Tz>,
    date: NaiveDate,
}

impl<Tz: TimeZone> SolarContext<Tz> {
    /// Resolve yesterday, today and tomorrow around `now`'s local date.
    pub fn resolve<O>(now: &DateTime<Tz>, coordinate: GeoCoordinate, oracle: &O) -> Self
    where
        O: SolarOracle + ?Sized,
    {
        let tz = now.timezone();
        let today = now.date_naive();
        let yesterday = today - TimeDelta::days(1);
        let tomorrow = today + TimeDelta::days(1);

        let today_bounds = resolve_phase_bounds(today, &tz, coordinate, oracle);
        let yesterday_bounds = resolve_phase_bounds(yesterday, &tz, coordinate, oracle);
        let tomorrow_bounds = resolve_phase_bounds(tomorrow, &tz, coordinate, oracle);

        Self {
            today_sunrise: today_bounds.sunrise,
            today_sunset: today_bounds.sunset,
            yesterday_sunset: yesterday_bounds.sunset,
            tomorrow_sunrise: tomorrow_bounds.sunrise,
            date: today,
        }
    }

    /// Build a context from explicit instants, dated by `today_sunrise`.
    pub fn from_instants(
        yesterday_sunset: DateTime<Tz>,
        today_sunrise: DateTime<Tz>,
        today_sunset: DateTime<Tz>,
        tomorrow_sunrise: DateTime<Tz>,
    ) -> Self {
        let date = today_sunrise.date_naive();
        Self {
            today_sunrise,
            today_sunset,
            yesterday_sunset,
            tomorrow_sunrise,
            date,
        }
    }

    /// Local date this context was resolved for.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metatime::oracle::{SunCalcOracle, SunTimes};
    use chrono::{FixedOffset, LocalResult, NaiveTime};

    fn coord(lat: f64, lng: f64) -> GeoCoordinate {
        GeoCoordinate::new(lat, lng).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(d: NaiveDate, h: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(&d.and_hms_opt(h, 0, 0).unwrap())
    }

    fn no_sun(_: DateTime<Utc>, _: GeoCoordinate) -> SunTimes {
        SunTimes::default()
    }

    #[test]
    fn test_oracle_result_used_when_valid() {
        let oracle = |midnight: DateTime<Utc>, _: GeoCoordinate| SunTimes {
            sunrise: Some(midnight + TimeDelta::hours(6)),
            sunset: Some(midnight + TimeDelta::hours(18)),
        };
        let d = date(2024, 3, 1);
        let b = resolve_phase_bounds(d, &Utc, coord(10.0, 0.0), &oracle);
        assert_eq!(b.sunrise, at(d, 6));
        assert_eq!(b.sunset, at(d, 18));
        assert_eq!(b.polar, None);
    }

    #[test]
    fn test_suncalc_bounds_on_same_date() {
        let tz = FixedOffset::east_opt(3600).unwrap();
        let d = date(2024, 10, 14);
        let b = resolve_phase_bounds(d, &tz, coord(48.8566, 2.3522), &SunCalcOracle::new());
        assert!(b.sunrise < b.sunset);
        assert_eq!(b.sunrise.date_naive(), d);
        assert_eq!(b.sunset.date_naive(), d);
        assert!(b.polar.is_none());
    }

    #[test]
    fn test_polar_day_north_in_summer() {
        let d = date(2024, 6, 21);
        let b = resolve_phase_bounds(d, &Utc, coord(78.2, 15.6), &no_sun);
        assert_eq!(b.polar, Some(PolarFallback::PolarDay));
        assert_eq!(b.sunrise, at(d, 0));
        assert_eq!(b.sunset, at(d, 12));
        assert!(b.sunrise < b.sunset);
    }

    #[test]
    fn test_polar_night_north_in_winter() {
        let d = date(2024, 12, 21);
        let b = resolve_phase_bounds(d, &Utc, coord(78.2, 15.6), &no_sun);
        assert_eq!(b.polar, Some(PolarFallback::PolarNight));
        assert_eq!(b.sunrise, at(d, 12));
        assert_eq!(b.sunset, at(date(2024, 12, 22), 0));
        assert!(b.sunrise < b.sunset);
    }

    #[test]
    fn test_southern_hemisphere_is_inverted() {
        let antarctic = coord(-77.8, 166.7);
        let december = resolve_phase_bounds(date(2024, 12, 21), &Utc, antarctic, &no_sun);
        let june = resolve_phase_bounds(date(2024, 6, 21), &Utc, antarctic, &no_sun);
        assert_eq!(december.polar, Some(PolarFallback::PolarDay));
        assert_eq!(june.polar, Some(PolarFallback::PolarNight));
    }

    #[test]
    fn test_summer_window_edges() {
        let north = coord(80.0, 0.0);
        let kind = |y, m, d| resolve_phase_bounds(date(y, m, d), &Utc, north, &no_sun).polar;

        assert_eq!(kind(2024, 4, 30), Some(PolarFallback::PolarNight));
        assert_eq!(kind(2024, 5, 1), Some(PolarFallback::PolarDay));
        assert_eq!(kind(2024, 9, 30), Some(PolarFallback::PolarDay));
        assert_eq!(kind(2024, 10, 1), Some(PolarFallback::PolarNight));
    }

    #[test]
    fn test_single_missing_field_triggers_fallback() {
        let half = |midnight: DateTime<Utc>, _: GeoCoordinate| SunTimes {
            sunrise: Some(midnight + TimeDelta::hours(1)),
            sunset: None,
        };
        let b = resolve_phase_bounds(date(2024, 7, 1), &Utc, coord(70.0, 0.0), &half);
        assert_eq!(b.polar, Some(PolarFallback::PolarDay));
    }

    #[test]
    fn test_suncalc_polar_uses_fallback() {
        let d = date(2024, 6, 21);
        let b = resolve_phase_bounds(d, &Utc, coord(69.6492, 18.9553), &SunCalcOracle::new());
        assert_eq!(b.polar, Some(PolarFallback::PolarDay));
        assert_eq!(b.sunrise.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_context_spans_three_dates() {
        let oracle = |midnight: DateTime<Utc>, _: GeoCoordinate| SunTimes {
            sunrise: Some(midnight + TimeDelta::hours(6)),
            sunset: Some(midnight + TimeDelta::hours(18)),
        };
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap();
        let ctx = SolarContext::resolve(&now, coord(0.0, 0.0), &oracle);

        assert_eq!(ctx.date(), date(2024, 3, 10));
        assert_eq!(ctx.yesterday_sunset, at(date(2024, 3, 9), 18));
        assert_eq!(ctx.today_sunrise, at(date(2024, 3, 10), 6));
        assert_eq!(ctx.today_sunset, at(date(2024, 3, 10), 18));
        assert_eq!(ctx.tomorrow_sunrise, at(date(2024, 3, 11), 6));
    }

    /// Santiago-style zone: at local midnight on 2024-09-08 clocks jump from
    /// UTC-04:00 straight to 01:00 UTC-03:00.
    #[derive(Clone, Copy, Debug)]
    struct MidnightGap;

    impl MidnightGap {
        const BEFORE: i32 = -4 * 3600;
        const AFTER: i32 = -3 * 3600;

        fn gap_date() -> NaiveDate {
            date(2024, 9, 8)
        }

        fn offset(secs: i32) -> FixedOffset {
            FixedOffset::east_opt(secs).unwrap()
        }
    }

    impl TimeZone for MidnightGap {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            MidnightGap
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            let secs = if *local < Self::gap_date() { Self::BEFORE } else { Self::AFTER };
            LocalResult::Single(Self::offset(secs))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let gap_start = Self::gap_date().and_time(NaiveTime::MIN);
            if *local < gap_start {
                LocalResult::Single(Self::offset(Self::BEFORE))
            } else if *local < gap_start + TimeDelta::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::offset(Self::AFTER))
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            let switch = Self::gap_date().and_hms_opt(4, 0, 0).unwrap();
            Self::offset(if *utc < switch { Self::BEFORE } else { Self::AFTER })
        }
    }

    #[test]
    fn test_skipped_midnight_resolves_after_gap() {
        let d = MidnightGap::gap_date();
        let midnight = local_instant(&MidnightGap, d.and_time(NaiveTime::MIN));
        assert_eq!(midnight.date_naive(), d);
        assert_eq!(midnight.time(), NaiveTime::from_hms_opt(1, 0, 0).unwrap());
        assert_eq!(midnight.with_timezone(&Utc), at(d, 4));

        // Noon on the same date is unaffected
        let noon = local_instant(&MidnightGap, d.and_hms_opt(12, 0, 0).unwrap());
        assert_eq!(noon.with_timezone(&Utc), at(d, 15));
    }

    #[test]
    fn test_polar_day_on_gap_date_stays_on_date() {
        let d = MidnightGap::gap_date();
        let b = resolve_phase_bounds(d, &MidnightGap, coord(78.2, 15.6), &no_sun);
        assert_eq!(b.polar, Some(PolarFallback::PolarDay));
        assert_eq!(b.sunrise.date_naive(), d);
        assert!(b.sunrise < b.sunset);
    }

    #[test]
    fn test_context_uses_local_date() {
        // 23:30 in UTC-05:00 is already the next day in UTC.
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 3, 10, 23, 30, 0).unwrap();
        let ctx = SolarContext::resolve(&now, coord(40.0, -75.0), &SunCalcOracle::new());
        assert_eq!(ctx.date(), date(2024, 3, 10));
        assert_eq!(ctx.today_sunrise.date_naive(), date(2024, 3, 10));
    }
}
