//! Meta-clock configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::metatime::location::{GeoCoordinate, Location};
use crate::metatime::theme::DEFAULT_TRANSITION_DURATION;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Full meta-clock configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaClockConfig {
    /// Location used when none is acquired from a provider.
    pub location: LocationConfig,
    /// Day/night transition parameters.
    pub theme: ThemeConfig,
    /// Reuse the solar context for every tick of the same local date
    /// instead of querying the oracle three times per tick.
    pub cache_solar_context: bool,
    /// How long to wait for a location provider before falling back.
    pub location_timeout_secs: f32,
}

impl Default for MetaClockConfig {
    fn default() -> Self {
        Self {
            location: LocationConfig::default(),
            theme: ThemeConfig::default(),
            cache_solar_context: true,
            location_timeout_secs: 10.0,
        }
    }
}

impl MetaClockConfig {
    /// Check every value that would otherwise produce nonsense output.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] naming the first bad field, or
    /// [`Error::InvalidCoordinate`] for the fallback location.
    pub fn validate(&self) -> Result<()> {
        let d = self.theme.transition_duration_secs;
        if !d.is_finite() || d <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "theme.transition_duration_secs must be positive, got {d}"
            )));
        }
        let t = self.location_timeout_secs;
        if !t.is_finite() || t < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "location_timeout_secs must be non-negative, got {t}"
            )));
        }
        self.location.to_location()?;
        Ok(())
    }

    /// Provider timeout. Negative or NaN values read as zero and values too
    /// large for a `Duration` saturate, so this never panics on an
    /// unvalidated config.
    pub fn location_timeout(&self) -> std::time::Duration {
        std::time::Duration::try_from_secs_f32(self.location_timeout_secs.max(0.0))
            .unwrap_or(std::time::Duration::MAX)
    }

    /// Save to file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file (sync) and validate.
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::debug!("Loaded meta-clock config from {}", path.display());
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Location config
// ---------------------------------------------------------------------------

/// Fallback observer location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        let loc = Location::default();
        Self {
            latitude: loc.coordinate.latitude(),
            longitude: loc.coordinate.longitude(),
            label: loc.label,
        }
    }
}

impl LocationConfig {
    pub fn to_location(&self) -> Result<Location> {
        Ok(Location {
            coordinate: GeoCoordinate::new(self.latitude, self.longitude)?,
            label: self.label.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Theme config
// ---------------------------------------------------------------------------

/// Configuration for the day/night blend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Real seconds for a full transition (default: 2.0).
    pub transition_duration_secs: f32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            transition_duration_secs: DEFAULT_TRANSITION_DURATION,
        }
    }
}
