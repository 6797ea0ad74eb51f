//! Day/night theme transition state machine.
//!
//! Turns the discrete `is_day` flag into a continuous blend factor that eases
//! between night (0) and day (1) over a fixed duration.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Default real seconds for a full day↔night blend.
pub const DEFAULT_TRANSITION_DURATION: f32 = 2.0;

/// Snapshot of the controller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionState {
    pub current_is_day: bool,
    pub target_is_day: bool,
    /// 1 = fully day, 0 = fully night.
    pub blend_factor: f32,
    pub transitioning: bool,
    /// Progress of the running transition, 0.0 to 1.0.
    pub progress: f32,
}

/// Coarse view of the controller state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThemePhase {
    Settled { is_day: bool },
    Transitioning { from_is_day: bool, to_is_day: bool, progress: f32 },
}

/// Eases the presentation blend toward whichever phase was last requested.
#[derive(Clone, Debug)]
pub struct ThemeTransitionController {
    current_is_day: bool,
    target_is_day: bool,
    blend_factor: f32,
    transitioning: bool,
    progress: f32,
    duration: f32,
}

impl ThemeTransitionController {
    /// Create a controller settled in the given phase.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransitionDuration`] unless
    /// `transition_duration` is finite and positive.
    pub fn new(initial_is_day: bool, transition_duration: f32) -> Result<Self> {
        if !transition_duration.is_finite() || transition_duration <= 0.0 {
            return Err(Error::InvalidTransitionDuration(transition_duration));
        }
        Ok(Self {
            current_is_day: initial_is_day,
            target_is_day: initial_is_day,
            blend_factor: settled_blend(initial_is_day),
            transitioning: false,
            progress: 1.0,
            duration: transition_duration,
        })
    }

    /// Feed this frame's phase flag and advance by `delta_seconds`.
    pub fn tick(&mut self, target_is_day: bool, delta_seconds: f32) {
        if target_is_day != self.target_is_day {
            // Retarget immediately; prior progress is discarded
            self.target_is_day = target_is_day;
            self.transitioning = true;
            self.progress = 0.0;
        }

        if !self.transitioning {
            return;
        }

        let dt = if delta_seconds.is_finite() { delta_seconds.max(0.0) } else { 0.0 };
        self.progress = (self.progress + dt / self.duration).min(1.0);

        let eased = ease_in_out(self.progress);
        self.blend_factor = if self.target_is_day { eased } else { 1.0 - eased };

        if self.progress >= 1.0 {
            self.transitioning = false;
            self.current_is_day = self.target_is_day;
            self.blend_factor = settled_blend(self.target_is_day);
        }
    }

    #[inline]
    pub fn blend_factor(&self) -> f32 {
        self.blend_factor
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn state(&self) -> TransitionState {
        TransitionState {
            current_is_day: self.current_is_day,
            target_is_day: self.target_is_day,
            blend_factor: self.blend_factor,
            transitioning: self.transitioning,
            progress: self.progress,
        }
    }

    pub fn phase(&self) -> ThemePhase {
        if self.transitioning {
            ThemePhase::Transitioning {
                from_is_day: self.current_is_day,
                to_is_day: self.target_is_day,
                progress: self.progress,
            }
        } else {
            ThemePhase::Settled { is_day: self.current_is_day }
        }
    }
}

#[inline]
fn settled_blend(is_day: bool) -> f32 {
    if is_day { 1.0 } else { 0.0 }
}

/// Symmetric quadratic ease-in-out on `[0, 1]`.
pub fn ease_in_out(p: f32) -> f32 {
    if p < 0.5 {
        2.0 * p * p
    } else {
        1.0 - (-2.0 * p + 2.0).powi(2) / 2.0
    }
}
