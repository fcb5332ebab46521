use chrono::{DateTime, Duration, NaiveDate, Utc};
use log::debug;

use crate::angles::{deg_to_rad, horizontal_from_equatorial, normalize_angle, sub_point};
use crate::error::EphemerisResult;
use crate::scan::first_crossings;
use crate::time::{gmst, julian_centuries, julian_date, resolve_utc, utc_midnight, Instant};
use crate::types::{
    EclipticCoordinates, EquatorialCoordinates, FundamentalArguments, GeographicPosition,
    HorizontalPosition, RiseSet, ScanConfig,
};

/// Coefficient in degrees and the multiples of D, M, M' and F in the argument.
type PeriodicTerm = (f64, [i8; 4]);

const LONGITUDE_TERMS: [PeriodicTerm; 13] = [
    (6.289, [0, 0, 1, 0]),
    (1.274, [2, 0, -1, 0]),
    (0.658, [2, 0, 0, 0]),
    (0.214, [0, 0, 2, 0]),
    (-0.186, [0, 1, 0, 0]),
    (-0.114, [0, 0, 0, 2]),
    (0.059, [2, 0, -2, 0]),
    (0.057, [2, -1, -1, 0]),
    (0.053, [2, 0, 1, 0]),
    (0.046, [2, -1, 0, 0]),
    (-0.041, [0, 1, -1, 0]),
    (-0.035, [1, 0, 0, 0]),
    (-0.030, [0, 1, 1, 0]),
];

const LATITUDE_TERMS: [PeriodicTerm; 8] = [
    (5.128, [0, 0, 0, 1]),
    (0.281, [0, 0, 1, 1]),
    (0.278, [0, 0, 1, -1]),
    (0.173, [2, 0, 0, -1]),
    (0.055, [2, 0, -1, 1]),
    (0.046, [2, 0, -1, -1]),
    (0.033, [2, 0, 0, 1]),
    (0.017, [0, 0, 2, 1]),
];

fn polynomial(t: f64, coefficients: [f64; 5]) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * t + c)
}

pub fn fundamental_arguments(t: f64) -> EphemerisResult<FundamentalArguments> {
    Ok(FundamentalArguments {
        mean_longitude: normalize_angle(polynomial(
            t,
            [218.3164477, 481267.88123421, -0.0015786, 1.0 / 538841.0, -1.0 / 65194000.0],
        ))?,
        mean_elongation: normalize_angle(polynomial(
            t,
            [297.8501921, 445267.1114034, -0.0018819, 1.0 / 545868.0, -1.0 / 113065000.0],
        ))?,
        solar_mean_anomaly: normalize_angle(polynomial(
            t,
            [357.5291092, 35999.0502909, -0.0001536, 1.0 / 24490000.0, 0.0],
        ))?,
        lunar_mean_anomaly: normalize_angle(polynomial(
            t,
            [134.9633964, 477198.8675055, 0.0087414, 1.0 / 69699.0, -1.0 / 14712000.0],
        ))?,
        argument_of_latitude: normalize_angle(polynomial(
            t,
            [93.2720950, 483202.0175233, -0.0036539, -1.0 / 3526000.0, 1.0 / 863310000.0],
        ))?,
    })
}

fn sum_terms(terms: &[PeriodicTerm], args: &FundamentalArguments) -> f64 {
    let angles = [
        deg_to_rad(args.mean_elongation),
        deg_to_rad(args.solar_mean_anomaly),
        deg_to_rad(args.lunar_mean_anomaly),
        deg_to_rad(args.argument_of_latitude),
    ];
    terms
        .iter()
        .map(|(coefficient, multiples)| {
            let argument: f64 = multiples
                .iter()
                .zip(angles.iter())
                .map(|(&k, angle)| k as f64 * angle)
                .sum();
            coefficient * argument.sin()
        })
        .sum()
}

pub fn ecliptic_coordinates(args: &FundamentalArguments) -> EphemerisResult<EclipticCoordinates> {
    Ok(EclipticCoordinates {
        longitude: normalize_angle(args.mean_longitude + sum_terms(&LONGITUDE_TERMS, args))?,
        latitude: sum_terms(&LATITUDE_TERMS, args),
    })
}

pub fn obliquity(t: f64) -> f64 {
    23.439291 - 0.0130042 * t - 0.00000016 * t * t + 0.000000504 * t * t * t
}

pub fn equatorial_coordinates(ecliptic: &EclipticCoordinates, t: f64) -> EquatorialCoordinates {
    let lambda = deg_to_rad(ecliptic.longitude);
    let beta = deg_to_rad(ecliptic.latitude);
    let epsilon = deg_to_rad(obliquity(t));
    EquatorialCoordinates {
        right_ascension: (lambda.sin() * epsilon.cos() - beta.tan() * epsilon.sin())
            .atan2(lambda.cos()),
        declination: (beta.sin() * epsilon.cos() + beta.cos() * epsilon.sin() * lambda.sin())
            .clamp(-1.0, 1.0)
            .asin(),
    }
}

pub fn equatorial_at(utc: &DateTime<Utc>) -> EphemerisResult<EquatorialCoordinates> {
    let t = julian_centuries(julian_date(utc));
    let ecliptic = ecliptic_coordinates(&fundamental_arguments(t)?)?;
    Ok(equatorial_coordinates(&ecliptic, t))
}

pub fn sublunar_point(utc: &DateTime<Utc>) -> EphemerisResult<GeographicPosition> {
    sub_point(&equatorial_at(utc)?, gmst(utc)?)
}

pub fn horizontal_position(
    observer: &GeographicPosition,
    utc: &DateTime<Utc>,
) -> EphemerisResult<HorizontalPosition> {
    horizontal_from_equatorial(observer, &equatorial_at(utc)?, gmst(utc)?)
}

fn minutes_after(start: DateTime<Utc>, minutes: f64) -> DateTime<Utc> {
    start + Duration::milliseconds((minutes * 60_000.0).round() as i64)
}

/// First moonrise and first moonset between 00:00 UTC on `date` and 00:00
/// UTC the following day, found by sampling elevation every `step_minutes`
/// and interpolating linearly across the first sign change of each kind.
///
/// A second rise or set inside the same window is not reported.
pub fn rise_set_scan(
    observer: &GeographicPosition,
    date: NaiveDate,
    step_minutes: u32,
) -> EphemerisResult<RiseSet> {
    observer.validate()?;
    let start = utc_midnight(date);
    let crossings = first_crossings(step_minutes, |minute| {
        let sample = start + Duration::minutes(minute as i64);
        Ok(horizontal_position(observer, &sample)?.elevation)
    })?;

    debug!(
        "moon scan on {} at ({:.3}, {:.3}): rise minute={:?}, set minute={:?}",
        date, observer.latitude, observer.longitude, crossings.rising, crossings.setting
    );

    Ok(RiseSet {
        rise: crossings.rising.map(|m| minutes_after(start, m)),
        set: crossings.setting.map(|m| minutes_after(start, m)),
    })
}

pub fn position(instant: Option<Instant>) -> EphemerisResult<GeographicPosition> {
    sublunar_point(&resolve_utc(instant))
}

pub fn azimuth_elevation(
    observer: &GeographicPosition,
    instant: Option<Instant>,
) -> EphemerisResult<HorizontalPosition> {
    observer.validate()?;
    horizontal_position(observer, &resolve_utc(instant))
}

/// Moonrise and moonset on the UTC date of `date` (today when `None`).
pub fn next_rise_set(
    observer: &GeographicPosition,
    date: Option<Instant>,
    config: &ScanConfig,
) -> EphemerisResult<RiseSet> {
    rise_set_scan(
        observer,
        resolve_utc(date).date_naive(),
        config.effective_step(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polynomial_is_horner() {
        assert_eq!(polynomial(2.0, [1.0, 1.0, 1.0, 1.0, 1.0]), 31.0);
        assert_eq!(polynomial(0.0, [5.0, 1.0, 1.0, 1.0, 1.0]), 5.0);
    }

    #[test]
    fn zero_arguments_give_no_perturbation() {
        let args = FundamentalArguments {
            mean_longitude: 100.0,
            mean_elongation: 0.0,
            solar_mean_anomaly: 0.0,
            lunar_mean_anomaly: 0.0,
            argument_of_latitude: 0.0,
        };
        let ecliptic = ecliptic_coordinates(&args).unwrap();
        assert!((ecliptic.longitude - 100.0).abs() < 1e-12);
        assert!(ecliptic.latitude.abs() < 1e-12);
    }
}
