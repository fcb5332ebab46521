use chrono::{DateTime, Duration, NaiveDate, Utc};
use log::debug;

use crate::angles::{
    deg_to_rad, hour_angle, horizontal_from_equatorial, normalize_angle, rad_to_deg, sub_point,
    DEGREES_PER_HOUR,
};
use crate::error::{EphemerisError, EphemerisResult};
use crate::time::{days_since_j2000, gmst, resolve_utc, utc_at_hours, Instant};
use crate::types::{
    EquatorialCoordinates, GeographicPosition, HorizontalPosition, RiseSet, RiseSetConfig,
};

pub fn mean_longitude(n: f64) -> EphemerisResult<f64> {
    normalize_angle(280.460 + 0.9856474 * n)
}

pub fn mean_anomaly(n: f64) -> EphemerisResult<f64> {
    normalize_angle(357.528 + 0.9856003 * n)
}

pub fn ecliptic_longitude(n: f64) -> EphemerisResult<f64> {
    let l = mean_longitude(n)?;
    let g = deg_to_rad(mean_anomaly(n)?);
    Ok(l + 1.915 * g.sin() + 0.020 * (2.0 * g).sin())
}

pub fn obliquity(n: f64) -> f64 {
    23.439 - 0.0000004 * n
}

pub fn equatorial_coordinates(utc: &DateTime<Utc>) -> EphemerisResult<EquatorialCoordinates> {
    let n = days_since_j2000(utc);
    let lambda = deg_to_rad(ecliptic_longitude(n)?);
    let epsilon = deg_to_rad(obliquity(n));
    Ok(EquatorialCoordinates {
        right_ascension: (epsilon.cos() * lambda.sin()).atan2(lambda.cos()),
        declination: (epsilon.sin() * lambda.sin()).asin(),
    })
}

pub fn subsolar_point(utc: &DateTime<Utc>) -> EphemerisResult<GeographicPosition> {
    sub_point(&equatorial_coordinates(utc)?, gmst(utc)?)
}

pub fn horizontal_position(
    observer: &GeographicPosition,
    utc: &DateTime<Utc>,
) -> EphemerisResult<HorizontalPosition> {
    horizontal_from_equatorial(observer, &equatorial_coordinates(utc)?, gmst(utc)?)
}

/// Local solar noon as hours after midnight UTC of `date`. The mean estimate
/// `12 - longitude / 15` is corrected by the Sun's hour angle at that moment.
fn transit_hours(observer: &GeographicPosition, date: NaiveDate) -> EphemerisResult<f64> {
    let estimate_hours = 12.0 - observer.longitude / DEGREES_PER_HOUR;
    let estimate = utc_at_hours(date, estimate_hours);
    let equatorial = equatorial_coordinates(&estimate)?;
    let lst = normalize_angle(gmst(&estimate)? + observer.longitude)?;
    let ra_deg = normalize_angle(rad_to_deg(equatorial.right_ascension))?;
    let ha = hour_angle(lst, ra_deg)?;
    Ok(estimate_hours - ha / DEGREES_PER_HOUR)
}

pub fn solar_transit(
    observer: &GeographicPosition,
    date: NaiveDate,
) -> EphemerisResult<DateTime<Utc>> {
    Ok(utc_at_hours(date, transit_hours(observer, date)?))
}

fn wrap_hours(hours: f64) -> f64 {
    let wrapped = hours.rem_euclid(24.0);
    if wrapped >= 24.0 {
        0.0
    } else {
        wrapped
    }
}

// Solar noon and half day arc in hours, or `None` when the Sun stays on one
// side of the horizon for the whole day.
fn day_arc(
    observer: &GeographicPosition,
    date: NaiveDate,
    horizon_elevation: f64,
) -> EphemerisResult<Option<(f64, f64)>> {
    let noon_hours = transit_hours(observer, date)?;
    let noon = utc_at_hours(date, noon_hours);
    let declination = equatorial_coordinates(&noon)?.declination;
    let lat = deg_to_rad(observer.latitude);
    let cos_h = (deg_to_rad(horizon_elevation).sin() - lat.sin() * declination.sin())
        / (lat.cos() * declination.cos());

    if cos_h > 1.0 {
        debug!(
            "sun stays below {:.3} deg at lat {:.3} on {}",
            horizon_elevation, observer.latitude, date
        );
        return Ok(None);
    }
    if cos_h < -1.0 {
        debug!(
            "sun stays above {:.3} deg at lat {:.3} on {}",
            horizon_elevation, observer.latitude, date
        );
        return Ok(None);
    }
    Ok(Some((noon_hours, rad_to_deg(cos_h.acos()) / DEGREES_PER_HOUR)))
}

// An event that falls outside the requested day belongs to the neighbouring
// day's arc; solve it there and shift it back by a whole day.
fn event_hours(
    observer: &GeographicPosition,
    date: NaiveDate,
    horizon_elevation: f64,
    hours: f64,
    direction: f64,
) -> EphemerisResult<f64> {
    if (0.0..24.0).contains(&hours) {
        return Ok(hours);
    }
    let shift_days: i64 = if hours < 0.0 { 1 } else { -1 };
    let neighbour = date + Duration::days(shift_days);
    let resolved = match day_arc(observer, neighbour, horizon_elevation)? {
        Some((noon, half_arc)) => noon + direction * half_arc + 24.0 * shift_days as f64,
        None => hours,
    };
    Ok(wrap_hours(resolved))
}

/// Closed-form sunrise and sunset for the UTC calendar day `date`.
///
/// Declination is taken at local solar noon. When the Sun stays on one side
/// of `horizon_elevation` all day both fields are `None`.
pub fn rise_set_on(
    observer: &GeographicPosition,
    date: NaiveDate,
    horizon_elevation: f64,
) -> EphemerisResult<RiseSet> {
    if !horizon_elevation.is_finite() {
        return Err(EphemerisError::invalid_argument(format!(
            "horizon elevation {} is not finite",
            horizon_elevation
        )));
    }
    observer.validate()?;

    let Some((noon_hours, half_arc_hours)) = day_arc(observer, date, horizon_elevation)? else {
        return Ok(RiseSet::default());
    };
    let rise = event_hours(
        observer,
        date,
        horizon_elevation,
        noon_hours - half_arc_hours,
        -1.0,
    )?;
    let set = event_hours(
        observer,
        date,
        horizon_elevation,
        noon_hours + half_arc_hours,
        1.0,
    )?;
    Ok(RiseSet {
        rise: Some(utc_at_hours(date, rise)),
        set: Some(utc_at_hours(date, set)),
    })
}

pub fn position(instant: Option<Instant>) -> EphemerisResult<GeographicPosition> {
    subsolar_point(&resolve_utc(instant))
}

pub fn azimuth_elevation(
    observer: &GeographicPosition,
    instant: Option<Instant>,
) -> EphemerisResult<HorizontalPosition> {
    observer.validate()?;
    horizontal_position(observer, &resolve_utc(instant))
}

pub fn rise_set(
    observer: &GeographicPosition,
    date: Option<Instant>,
    config: &RiseSetConfig,
) -> EphemerisResult<RiseSet> {
    rise_set_on(
        observer,
        resolve_utc(date).date_naive(),
        config.horizon_elevation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_hours_stays_in_day() {
        assert_eq!(wrap_hours(-1.0), 23.0);
        assert_eq!(wrap_hours(25.5), 1.5);
        assert!(wrap_hours(-1e-17) < 24.0);
    }

    #[test]
    fn wrapped_event_uses_neighbouring_day() {
        let observer = GeographicPosition::new(40.0, -179.0).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 21).unwrap();
        assert_eq!(event_hours(&observer, date, -0.833, 7.5, -1.0).unwrap(), 7.5);
        let shifted = event_hours(&observer, date, -0.833, 31.5, -1.0).unwrap();
        // The previous day's rise, not the raw value minus a day.
        assert!((shifted - 7.5).abs() > 1e-3, "shifted={}", shifted);
        assert!((0.0..24.0).contains(&shifted));
    }
}
