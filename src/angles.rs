use crate::error::{EphemerisError, EphemerisResult};
use crate::types::{EquatorialCoordinates, GeographicPosition, HorizontalPosition};

pub const DEGREES_PER_HOUR: f64 = 15.0;

// Below this horizontal-vector length the body is at the zenith (or nadir)
// and azimuth is undefined.
const ZENITH_EPSILON: f64 = 1e-9;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

/// Reduce an angle to [0, 360).
pub fn normalize_angle(angle: f64) -> EphemerisResult<f64> {
    if !angle.is_finite() {
        return Err(EphemerisError::invalid_argument(format!(
            "cannot normalize non-finite angle {}",
            angle
        )));
    }
    let reduced = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if reduced >= 360.0 {
        Ok(0.0)
    } else {
        Ok(reduced)
    }
}

/// Reduce a longitude to (-180, 180].
pub fn normalize_longitude(longitude: f64) -> EphemerisResult<f64> {
    if longitude > -180.0 && longitude <= 180.0 {
        return Ok(longitude);
    }
    let reduced = normalize_angle(longitude)?;
    if reduced > 180.0 {
        Ok(reduced - 360.0)
    } else {
        Ok(reduced)
    }
}

/// Hour angle in degrees, west of the meridian positive, in (-180, 180].
pub fn hour_angle(local_sidereal_time: f64, right_ascension_deg: f64) -> EphemerisResult<f64> {
    normalize_longitude(local_sidereal_time - right_ascension_deg)
}

pub fn altitude_from_hour_angle(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_alt = lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    rad_to_deg(sin_alt.clamp(-1.0, 1.0).asin())
}

/// Azimuth from north, eastward, in [0, 360). A body at the zenith has no
/// defined azimuth; 0 is returned for it.
pub fn azimuth_from_hour_angle(
    latitude: f64,
    declination: f64,
    hour_angle: f64,
) -> EphemerisResult<f64> {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_az = -dec_rad.cos() * ha_rad.sin();
    let cos_az = dec_rad.sin() * lat_rad.cos() - dec_rad.cos() * lat_rad.sin() * ha_rad.cos();
    if sin_az.hypot(cos_az) < ZENITH_EPSILON {
        return Ok(0.0);
    }
    normalize_angle(rad_to_deg(sin_az.atan2(cos_az)))
}

/// Equatorial to horizontal for an observer, given Greenwich mean sidereal
/// time in degrees.
pub fn horizontal_from_equatorial(
    observer: &GeographicPosition,
    equatorial: &EquatorialCoordinates,
    gmst_deg: f64,
) -> EphemerisResult<HorizontalPosition> {
    let lst = normalize_angle(gmst_deg + observer.longitude)?;
    let ra_deg = normalize_angle(rad_to_deg(equatorial.right_ascension))?;
    let ha = hour_angle(lst, ra_deg)?;
    let dec_deg = rad_to_deg(equatorial.declination);
    Ok(HorizontalPosition {
        azimuth: azimuth_from_hour_angle(observer.latitude, dec_deg, ha)?,
        elevation: altitude_from_hour_angle(observer.latitude, dec_deg, ha),
    })
}

/// The geographic point with the body at its zenith.
pub fn sub_point(
    equatorial: &EquatorialCoordinates,
    gmst_deg: f64,
) -> EphemerisResult<GeographicPosition> {
    let ra_deg = normalize_angle(rad_to_deg(equatorial.right_ascension))?;
    Ok(GeographicPosition {
        latitude: rad_to_deg(equatorial.declination),
        longitude: normalize_longitude(ra_deg - gmst_deg)?,
    })
}
