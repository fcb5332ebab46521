use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{EphemerisError, EphemerisResult};

/// A point on the Earth's surface: either an observer or a body's sub-point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeographicPosition {
    /// Degrees, [-90, 90], north positive.
    pub latitude: f64,
    /// Degrees, [-180, 180], east positive.
    pub longitude: f64,
}

impl GeographicPosition {
    pub fn new(latitude: f64, longitude: f64) -> EphemerisResult<Self> {
        let position = Self {
            latitude,
            longitude,
        };
        position.validate()?;
        Ok(position)
    }

    pub fn validate(&self) -> EphemerisResult<()> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(EphemerisError::invalid_observer(format!(
                "non-finite coordinates ({}, {})",
                self.latitude, self.longitude
            )));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(EphemerisError::invalid_observer(format!(
                "latitude {} outside [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(EphemerisError::invalid_observer(format!(
                "longitude {} outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// Lunar fundamental arguments, degrees in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FundamentalArguments {
    pub mean_longitude: f64,
    pub mean_elongation: f64,
    pub solar_mean_anomaly: f64,
    pub lunar_mean_anomaly: f64,
    pub argument_of_latitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EclipticCoordinates {
    /// Degrees, [0, 360).
    pub longitude: f64,
    /// Degrees, signed and unnormalised.
    pub latitude: f64,
}

/// Equatorial frame. Both fields are radians; right ascension in (-PI, PI].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EquatorialCoordinates {
    pub right_ascension: f64,
    pub declination: f64,
}

/// Observer-relative position. Azimuth from north, increasing eastward.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HorizontalPosition {
    pub azimuth: f64,
    pub elevation: f64,
}

/// First rise and set of a body within one UTC day. `None` means the
/// crossing does not happen that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RiseSet {
    pub rise: Option<DateTime<Utc>>,
    pub set: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Body {
    Sun,
    Moon,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RiseSetConfig {
    /// Elevation in degrees at which the body counts as rising or setting.
    pub horizon_elevation: f64,
}

impl Default for RiseSetConfig {
    fn default() -> Self {
        Self {
            horizon_elevation: -0.833,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanConfig {
    /// Sampling interval; anything below one minute is treated as one.
    pub step_minutes: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { step_minutes: 1 }
    }
}

impl ScanConfig {
    pub fn effective_step(&self) -> u32 {
        self.step_minutes.max(1)
    }
}
