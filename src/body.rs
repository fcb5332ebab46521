use chrono::{DateTime, Utc};

use crate::angles::{horizontal_from_equatorial, sub_point};
use crate::error::EphemerisResult;
use crate::time::gmst;
use crate::types::{Body, EquatorialCoordinates, GeographicPosition, HorizontalPosition};
use crate::{moon, sun};

impl Body {
    pub fn equatorial(&self, utc: &DateTime<Utc>) -> EphemerisResult<EquatorialCoordinates> {
        match self {
            Body::Sun => sun::equatorial_coordinates(utc),
            Body::Moon => moon::equatorial_at(utc),
        }
    }

    pub fn sub_point(&self, utc: &DateTime<Utc>) -> EphemerisResult<GeographicPosition> {
        sub_point(&self.equatorial(utc)?, gmst(utc)?)
    }

    pub fn horizontal(
        &self,
        observer: &GeographicPosition,
        utc: &DateTime<Utc>,
    ) -> EphemerisResult<HorizontalPosition> {
        horizontal_from_equatorial(observer, &self.equatorial(utc)?, gmst(utc)?)
    }
}
