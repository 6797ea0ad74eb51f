//! Day/night phase selection.

use chrono::{DateTime, TimeDelta, TimeZone};

use crate::metatime::solar::SolarContext;

/// The day- or night-phase containing a given instant, as the half-open
/// interval `[period_start, period_end)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Cycle<Tz: TimeZone> {
    pub is_day: bool,
    pub period_start: DateTime<Tz>,
    pub period_end: DateTime<Tz>,
}

impl<Tz: TimeZone> Cycle<Tz> {
    /// Real length of the phase.
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.period_end.clone() - self.period_start.clone()
    }

    /// Whether `instant` falls inside `[period_start, period_end)`.
    #[inline]
    pub fn contains(&self, instant: &DateTime<Tz>) -> bool {
        *instant >= self.period_start && *instant < self.period_end
    }
}

/// Place `now` into exactly one phase.
///
/// The sunrise instant belongs to the day, the sunset instant to the night.
pub fn locate_cycle<Tz: TimeZone>(now: &DateTime<Tz>, ctx: &SolarContext<Tz>) -> Cycle<Tz> {
    if *now >= ctx.today_sunrise && *now < ctx.today_sunset {
        Cycle {
            is_day: true,
            period_start: ctx.today_sunrise.clone(),
            period_end: ctx.today_sunset.clone(),
        }
    } else if *now >= ctx.today_sunset {
        // After sunset: night runs until tomorrow's sunrise
        Cycle {
            is_day: false,
            period_start: ctx.today_sunset.clone(),
            period_end: ctx.tomorrow_sunrise.clone(),
        }
    } else {
        // Before sunrise: night started at yesterday's sunset
        Cycle {
            is_day: false,
            period_start: ctx.yesterday_sunset.clone(),
            period_end: ctx.today_sunrise.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn t(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, d, h, m, 0).unwrap()
    }

    /// Sunrise 06:00, sunset 18:30 every day.
    fn ctx() -> SolarContext<Utc> {
        SolarContext::from_instants(t(9, 18, 30), t(10, 6, 0), t(10, 18, 30), t(11, 6, 0))
    }

    #[test]
    fn test_daytime() {
        let c = locate_cycle(&t(10, 12, 0), &ctx());
        assert!(c.is_day);
        assert_eq!(c.period_start, t(10, 6, 0));
        assert_eq!(c.period_end, t(10, 18, 30));
    }

    #[test]
    fn test_after_sunset() {
        let c = locate_cycle(&t(10, 22, 0), &ctx());
        assert!(!c.is_day);
        assert_eq!(c.period_start, t(10, 18, 30));
        assert_eq!(c.period_end, t(11, 6, 0));
    }

    #[test]
    fn test_before_sunrise() {
        let c = locate_cycle(&t(10, 3, 15), &ctx());
        assert!(!c.is_day);
        assert_eq!(c.period_start, t(9, 18, 30));
        assert_eq!(c.period_end, t(10, 6, 0));
    }

    #[test]
    fn test_sunrise_instant_is_day() {
        let c = locate_cycle(&t(10, 6, 0), &ctx());
        assert!(c.is_day);
        assert_eq!(c.period_start, t(10, 6, 0));
    }

    #[test]
    fn test_sunset_instant_is_night() {
        let c = locate_cycle(&t(10, 18, 30), &ctx());
        assert!(!c.is_day);
        assert_eq!(c.period_start, t(10, 18, 30));
    }

    #[test]
    fn test_interval_always_contains_now() {
        let ctx = ctx();
        let mut now = t(10, 0, 0);
        let end = t(11, 0, 0);
        while now < end {
            let c = locate_cycle(&now, &ctx);
            assert!(c.contains(&now), "{now} not in {c:?}");
            assert!(c.duration() > TimeDelta::zero());
            now += TimeDelta::minutes(7);
        }
    }

    #[test]
    fn test_just_before_sunset_is_day() {
        let now = t(10, 18, 30) - TimeDelta::milliseconds(1);
        assert!(locate_cycle(&now, &ctx()).is_day);
    }
}
