use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::America::Chicago;

use sky_tracker::time::*;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

// ── Julian Date ──

#[test]
fn test_julian_date_j2000_epoch() {
    assert_eq!(julian_date(&utc(2000, 1, 1, 12, 0, 0)), 2451545.0);
    assert_eq!(J2000, 2451545.0);
}

#[test]
fn test_julian_date_known_values() {
    assert_approx!(julian_date(&utc(1987, 1, 27, 0, 0, 0)), 2446822.5, 1e-9);
    assert_approx!(julian_date(&utc(1957, 10, 4, 19, 26, 24)), 2436116.31, 1e-6);
    assert_approx!(julian_date(&utc(1600, 12, 31, 0, 0, 0)), 2305812.5, 1e-9);
    assert_approx!(julian_date(&utc(2000, 1, 1, 0, 0, 0)), 2451544.5, 1e-9);
}

#[test]
fn test_julian_date_sub_second() {
    let base = utc(2024, 5, 5, 6, 0, 0);
    let later = base + chrono::Duration::milliseconds(500);
    assert_approx!(julian_date(&later) - julian_date(&base), 0.5 / 86400.0, 1e-8);
}

#[test]
fn test_julian_centuries() {
    assert_eq!(julian_centuries(J2000), 0.0);
    assert_approx!(julian_centuries(J2000 + 36525.0), 1.0, 1e-15);
}

// ── GMST ──

#[test]
fn test_gmst_at_j2000() {
    assert_approx!(gmst(&utc(2000, 1, 1, 12, 0, 0)).unwrap(), 280.46061837, 1e-9);
}

#[test]
fn test_gmst_known_value() {
    // 1987-04-10 19:21:00 UT: 8h34m57.0896s
    assert_approx!(gmst(&utc(1987, 4, 10, 19, 21, 0)).unwrap(), 128.7378734, 1e-5);
}

#[test]
fn test_gmst_advances_one_sidereal_day() {
    let a = gmst(&utc(2025, 1, 1, 0, 0, 0)).unwrap();
    let b = gmst(&utc(2025, 1, 2, 0, 0, 0)).unwrap();
    let advance = (b - a).rem_euclid(360.0);
    assert_approx!(advance, 0.98564736629, 1e-6);
}

// ── Instant boundary ──

#[test]
fn test_instant_utc_is_unchanged() {
    let t = utc(2025, 3, 20, 12, 0, 0);
    assert_eq!(Instant::from(t).to_utc(), t);
}

#[test]
fn test_instant_fixed_offset_is_converted() {
    let offset = FixedOffset::east_opt(2 * 3600).unwrap();
    let local = offset.with_ymd_and_hms(2025, 3, 20, 14, 0, 0).unwrap();
    assert_eq!(Instant::from(local).to_utc(), utc(2025, 3, 20, 12, 0, 0));
}

#[test]
fn test_instant_unspecified_is_read_as_utc() {
    let naive = NaiveDate::from_ymd_opt(2025, 3, 20)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    assert_eq!(Instant::from(naive).to_utc(), utc(2025, 3, 20, 12, 0, 0));
}

#[test]
fn test_instant_from_named_zone() {
    // Central Daylight Time is UTC-5 on 2026-03-21.
    let dt = Chicago.with_ymd_and_hms(2026, 3, 21, 12, 0, 0).unwrap();
    let instant = Instant::from_zoned(&dt);
    assert!(matches!(instant, Instant::Local(_)));
    assert_eq!(instant.to_utc(), utc(2026, 3, 21, 17, 0, 0));
}

#[test]
fn test_resolve_utc_defaults_to_now() {
    let before = Utc::now();
    let resolved = resolve_utc(None);
    let after = Utc::now();
    assert!(before <= resolved && resolved <= after);
}

// ── Calendar helpers ──

#[test]
fn test_utc_at_hours() {
    let date = NaiveDate::from_ymd_opt(2025, 6, 21).unwrap();
    assert_eq!(utc_midnight(date), utc(2025, 6, 21, 0, 0, 0));
    let t = utc_at_hours(date, 6.5);
    assert_eq!((t.hour(), t.minute()), (6, 30));
    assert_eq!(utc_at_hours(date, 24.0), utc(2025, 6, 22, 0, 0, 0));
}
