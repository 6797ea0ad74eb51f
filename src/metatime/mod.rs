//! Meta-time engine.
//!
//! Maps real time onto a 12-hour dial whose span is the current solar day-
//! or night-phase at the observer's location, and eases a day/night theme
//! blend whenever the phase flips. The main entry point is [`MetaClock`],
//! which the host ticks once per frame to get a [`ClockFrame`].

pub mod config;
pub mod cycle;
pub mod dial;
pub mod frame;
pub mod location;
pub mod oracle;
pub mod solar;
pub mod theme;

// Re-exports
pub use config::{LocationConfig, MetaClockConfig, ThemeConfig};
pub use cycle::{locate_cycle, Cycle};
pub use dial::{angles_from_meta_seconds, compute_meta_time, HandAngles, MetaTimeState, DIAL_SECONDS};
pub use frame::{ClockFrame, ClockUniform};
pub use location::{acquire_location, FixedLocation, GeoCoordinate, Location, LocationProvider};
pub use oracle::{SolarOracle, SunCalcOracle, SunTimes};
pub use solar::{resolve_phase_bounds, PolarFallback, SolarContext, SolarPhaseBounds};
pub use theme::{ThemePhase, ThemeTransitionController, TransitionState};

use chrono::{DateTime, TimeZone};

use crate::core::Result;

// ---------------------------------------------------------------------------
// MetaClock
// ---------------------------------------------------------------------------

/// Session object for one observer. Call [`tick`](Self::tick) each frame.
pub struct MetaClock<O: SolarOracle, Tz: TimeZone> {
    config: MetaClockConfig,
    coordinate: GeoCoordinate,
    oracle: O,
    theme: ThemeTransitionController,
    solar_cache: Option<SolarContext<Tz>>,
    last_is_day: bool,
}

impl<O: SolarOracle, Tz: TimeZone> MetaClock<O, Tz> {
    /// Create a clock whose theme starts settled in the phase of `start`.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not validate.
    pub fn new(
        config: MetaClockConfig,
        coordinate: GeoCoordinate,
        oracle: O,
        start: &DateTime<Tz>,
    ) -> Result<Self> {
        config.validate()?;

        let ctx = SolarContext::resolve(start, coordinate, &oracle);
        let is_day = locate_cycle(start, &ctx).is_day;
        let theme = ThemeTransitionController::new(is_day, config.theme.transition_duration_secs)?;

        log::info!(
            "MetaClock started at {:.4},{:.4} in {} phase",
            coordinate.latitude(),
            coordinate.longitude(),
            if is_day { "day" } else { "night" }
        );

        let solar_cache = config.cache_solar_context.then_some(ctx);
        Ok(Self {
            config,
            coordinate,
            oracle,
            theme,
            solar_cache,
            last_is_day: is_day,
        })
    }

    /// Advance one frame: `now` is the current instant, `delta_seconds` the
    /// real time since the previous tick.
    pub fn tick(&mut self, now: &DateTime<Tz>, delta_seconds: f32) -> ClockFrame<Tz> {
        let ctx = self.solar_context(now);
        let cycle = locate_cycle(now, &ctx);
        let meta = compute_meta_time(now, &cycle, ctx);
        let angles = angles_from_meta_seconds(meta.meta_seconds_total);

        if meta.is_day != self.last_is_day {
            log::info!(
                "Phase changed to {} (1 meta-second = {:.2}s real)",
                if meta.is_day { "day" } else { "night" },
                meta.real_seconds_per_meta_second
            );
            self.last_is_day = meta.is_day;
        }

        self.theme.tick(meta.is_day, delta_seconds);

        ClockFrame {
            meta,
            angles,
            blend_factor: self.theme.blend_factor(),
            transitioning: self.theme.is_transitioning(),
        }
    }

    #[inline]
    pub fn coordinate(&self) -> GeoCoordinate {
        self.coordinate
    }

    #[inline]
    pub fn theme(&self) -> &ThemeTransitionController {
        &self.theme
    }

    #[inline]
    pub fn config(&self) -> &MetaClockConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    /// Solar context for `now`'s local date, from cache when enabled.
    fn solar_context(&mut self, now: &DateTime<Tz>) -> SolarContext<Tz> {
        if !self.config.cache_solar_context {
            return SolarContext::resolve(now, self.coordinate, &self.oracle);
        }

        let today = now.date_naive();
        match &self.solar_cache {
            Some(ctx) if ctx.date() == today => ctx.clone(),
            _ => {
                log::trace!("Resolving solar context for {today}");
                let ctx = SolarContext::resolve(now, self.coordinate, &self.oracle);
                self.solar_cache = Some(ctx.clone());
                ctx
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
