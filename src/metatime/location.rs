//! Observer location.
//!
//! A [`GeoCoordinate`] is supplied once per session. Hosts that ask a user or
//! a device for it implement [`LocationProvider`]; [`acquire_location`] wraps
//! the request in a timeout and falls back to a default location, so the
//! clock always has somewhere to be.

use std::future::Future;
use std::time::Duration;

use crate::core::{Error, Result};

/// Latitude/longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Validate and build a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinate`] when either component is not
    /// finite or lies outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(Error::InvalidCoordinate { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Northern hemisphere test used by the polar fallback. The equator
    /// counts as southern.
    #[inline]
    pub fn is_northern(&self) -> bool {
        self.latitude > 0.0
    }
}

/// A coordinate plus a human-readable label for display.
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub coordinate: GeoCoordinate,
    pub label: String,
}

impl Location {
    /// Label a raw coordinate as `"lat°, lng°"` with two decimals.
    pub fn from_coordinate(coordinate: GeoCoordinate) -> Self {
        let label = format!(
            "{:.2}°, {:.2}°",
            coordinate.latitude(),
            coordinate.longitude()
        );
        Self { coordinate, label }
    }
}

impl Default for Location {
    /// New York City.
    fn default() -> Self {
        Self {
            coordinate: GeoCoordinate {
                latitude: 40.7128,
                longitude: -74.006,
            },
            label: "New York City".to_string(),
        }
    }
}

/// Source of the observer's coordinate (device geolocation, user prompt...).
pub trait LocationProvider {
    fn request(&self) -> impl Future<Output = Result<GeoCoordinate>> + Send;
}

/// Provider that always answers with the same coordinate.
#[derive(Clone, Copy, Debug)]
pub struct FixedLocation(pub GeoCoordinate);

impl LocationProvider for FixedLocation {
    fn request(&self) -> impl Future<Output = Result<GeoCoordinate>> + Send {
        let coordinate = self.0;
        async move { Ok(coordinate) }
    }
}

/// Ask `provider` for a location, giving up after `timeout`.
///
/// Denial, provider errors and timeouts all resolve to `fallback`; the
/// failure is only logged.
pub async fn acquire_location<P: LocationProvider>(
    provider: &P,
    fallback: Location,
    timeout: Duration,
) -> Location {
    match tokio::time::timeout(timeout, provider.request()).await {
        Ok(Ok(coordinate)) => {
            log::info!(
                "Location acquired: {:.4}, {:.4}",
                coordinate.latitude(),
                coordinate.longitude()
            );
            Location::from_coordinate(coordinate)
        }
        Ok(Err(e)) => {
            log::warn!("Location request failed ({e}), using {}", fallback.label);
            fallback
        }
        Err(_) => {
            log::warn!(
                "Location request timed out after {:.1}s, using {}",
                timeout.as_secs_f32(),
                fallback.label
            );
            fallback
        }
    }
}
