pub mod angles;
pub mod body;
pub mod error;
pub mod moon;
pub mod scan;
pub mod sun;
pub mod time;
pub mod types;

pub use angles::{
    altitude_from_hour_angle, azimuth_from_hour_angle, deg_to_rad, horizontal_from_equatorial,
    hour_angle, normalize_angle, normalize_longitude, rad_to_deg, sub_point, DEGREES_PER_HOUR,
};

pub use error::{EphemerisError, EphemerisResult};

pub use time::{
    gmst, gmst_from_jd, julian_centuries, julian_date, julian_day, resolve_utc, utc_at_hours,
    utc_midnight, Instant, J2000,
};

pub use types::{
    Body, EclipticCoordinates, EquatorialCoordinates, FundamentalArguments, GeographicPosition,
    HorizontalPosition, RiseSet, RiseSetConfig, ScanConfig,
};
