use chrono::TimeZone;
use chrono_tz::America::Chicago;

use sky_tracker::time::Instant;
use sky_tracker::types::{GeographicPosition, RiseSetConfig, ScanConfig};
use sky_tracker::{moon, sun, EphemerisResult};

fn main() -> EphemerisResult<()> {
    env_logger::init();

    let observer = GeographicPosition::new(39.8, -89.6)?;
    let dt = Chicago.with_ymd_and_hms(2026, 3, 21, 12, 0, 0).unwrap();
    let instant = Instant::from_zoned(&dt);

    let sun_point = sun::position(Some(instant))?;
    let sun_sky = sun::azimuth_elevation(&observer, Some(instant))?;
    let sun_times = sun::rise_set(&observer, Some(instant), &RiseSetConfig::default())?;

    let moon_point = moon::position(Some(instant))?;
    let moon_sky = moon::azimuth_elevation(&observer, Some(instant))?;
    let moon_times = moon::next_rise_set(&observer, Some(instant), &ScanConfig::default())?;

    println!("=== Sun and Moon ===");
    println!(
        "Location: Springfield, IL ({:.1}°N, {:.1}°W)",
        observer.latitude, -observer.longitude
    );
    println!("Date/Time: {} ({} UTC)", dt, instant.to_utc());
    println!();
    println!("--- Sun ---");
    println!(
        "Sub-solar point: {:.3}°, {:.3}°",
        sun_point.latitude, sun_point.longitude
    );
    println!("Azimuth: {:.2}° (0°=N, 90°=E, 180°=S)", sun_sky.azimuth);
    println!("Elevation: {:.2}°", sun_sky.elevation);
    println!("Sunrise (UTC): {}", format_time(sun_times.rise));
    println!("Sunset (UTC): {}", format_time(sun_times.set));
    println!();
    println!("--- Moon ---");
    println!(
        "Sub-lunar point: {:.3}°, {:.3}°",
        moon_point.latitude, moon_point.longitude
    );
    println!("Azimuth: {:.2}°", moon_sky.azimuth);
    println!("Elevation: {:.2}°", moon_sky.elevation);
    println!("Moonrise (UTC): {}", format_time(moon_times.rise));
    println!("Moonset (UTC): {}", format_time(moon_times.set));
    Ok(())
}

fn format_time(t: Option<chrono::DateTime<chrono::Utc>>) -> String {
    t.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "none".to_string())
}
