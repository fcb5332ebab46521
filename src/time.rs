use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Timelike, Utc,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::angles::normalize_angle;
use crate::error::EphemerisResult;

/// Julian Date of 2000-01-01T12:00:00 UTC.
pub const J2000: f64 = 2451545.0;
pub const DAYS_PER_CENTURY: f64 = 36525.0;
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// A calendar timestamp as callers hand it in. Every variant resolves to a
/// single UTC instant through [`Instant::to_utc`]; an untagged timestamp is
/// read as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Instant {
    Utc(DateTime<Utc>),
    Local(DateTime<FixedOffset>),
    Unspecified(NaiveDateTime),
}

impl Instant {
    pub fn now() -> Self {
        Instant::Utc(Utc::now())
    }

    /// Tag a timestamp from any zone (e.g. a `chrono-tz` zone) with its
    /// offset at that moment.
    pub fn from_zoned<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        let offset = dt.offset().fix();
        Instant::Local(dt.with_timezone(&offset))
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            Instant::Utc(dt) => *dt,
            Instant::Local(dt) => dt.with_timezone(&Utc),
            Instant::Unspecified(naive) => Utc.from_utc_datetime(naive),
        }
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Instant::Utc(dt)
    }
}

impl From<DateTime<FixedOffset>> for Instant {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Instant::Local(dt)
    }
}

impl From<NaiveDateTime> for Instant {
    fn from(naive: NaiveDateTime) -> Self {
        Instant::Unspecified(naive)
    }
}

/// Boundary normalisation for public entry points: `None` means now.
pub fn resolve_utc(instant: Option<Instant>) -> DateTime<Utc> {
    instant.map_or_else(Utc::now, |i| i.to_utc())
}

/// Meeus' Gregorian calendar to Julian Date. `day` carries the time of day
/// as its fractional part.
pub fn julian_day(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y as f64 + 4716.0)).floor() + (30.6001 * (m as f64 + 1.0)).floor() + day + b
        - 1524.5
}

pub fn julian_date(utc: &DateTime<Utc>) -> f64 {
    let seconds = utc.num_seconds_from_midnight() as f64 + utc.nanosecond() as f64 / 1e9;
    julian_day(
        utc.year(),
        utc.month(),
        utc.day() as f64 + seconds / SECONDS_PER_DAY,
    )
}

/// Days since J2000.
pub fn days_since_j2000(utc: &DateTime<Utc>) -> f64 {
    julian_date(utc) - J2000
}

pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_CENTURY
}

/// IAU 1982 Greenwich mean sidereal time in degrees, [0, 360).
pub fn gmst_from_jd(jd: f64) -> EphemerisResult<f64> {
    let d = jd - J2000;
    let t = d / DAYS_PER_CENTURY;
    normalize_angle(
        280.46061837 + 360.98564736629 * d + 0.000387933 * t * t - t * t * t / 38710000.0,
    )
}

pub fn gmst(utc: &DateTime<Utc>) -> EphemerisResult<f64> {
    gmst_from_jd(julian_date(utc))
}

pub fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// `hours` after midnight UTC of `date`, to the millisecond. Negative or
/// >= 24 values land on the neighbouring days.
pub fn utc_at_hours(date: NaiveDate, hours: f64) -> DateTime<Utc> {
    utc_midnight(date) + Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn january_uses_previous_year_months() {
        // 1999-12-31T12:00 sits one day before J2000.
        assert_eq!(julian_day(1999, 12, 31.5), J2000 - 1.0);
        assert_eq!(julian_day(2000, 1, 1.5), J2000);
        assert_eq!(julian_day(2000, 3, 1.5) - julian_day(2000, 2, 28.5), 2.0);
    }

    #[test]
    fn hours_wrap_onto_neighbouring_days() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let before = utc_at_hours(date, -1.0);
        assert_eq!(before.day(), 31);
        assert_eq!(before.hour(), 23);
    }
}
