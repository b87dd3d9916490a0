//! Geographic coordinate types.

use std::fmt;

/// Mean Earth radius used for great-circle distances.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Error returned when constructing a coordinate outside the valid range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidPoint {
    reason: &'static str,
}

/// A validated latitude/longitude pair in decimal degrees.
///
/// Both components are finite, latitude is within -90..=90 and longitude
/// within -180..=180. Any `Point` value is valid by construction.
///
/// # Examples
///
/// ```
/// use sgbus_server::domain::Point;
///
/// let p = Point::new(1.2968, 103.8525).unwrap();
/// assert_eq!(p.lat(), 1.2968);
///
/// assert!(Point::new(91.0, 0.0).is_err());
/// assert!(Point::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Point {
    lat: f64,
    lng: f64,
}

impl Point {
    /// Create a point, rejecting non-finite or out-of-range components.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidPoint> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidPoint {
                reason: "latitude and longitude must be finite numbers",
            });
        }

        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidPoint {
                reason: "latitude must be between -90 and 90",
            });
        }

        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidPoint {
                reason: "longitude must be between -180 and 180",
            });
        }

        Ok(Point { lat, lng })
    }

    /// Parse a point from the textual latitude and longitude of a request.
    pub fn parse(lat: &str, lng: &str) -> Result<Self, InvalidPoint> {
        let lat = lat.trim().parse::<f64>().map_err(|_| InvalidPoint {
            reason: "latitude is not a decimal number",
        })?;
        let lng = lng.trim().parse::<f64>().map_err(|_| InvalidPoint {
            reason: "longitude is not a decimal number",
        })?;
        Self::new(lat, lng)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Squared planar distance in degree space.
    ///
    /// Only meaningful for ordering nearby points; at city scale it ranks
    /// candidates the same way as the great-circle distance.
    pub fn planar_distance_sq(&self, other: &Point) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        dlat * dlat + dlng * dlng
    }

    /// Great-circle distance in metres (haversine formula).
    pub fn haversine_metres(&self, other: &Point) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlng = (other.lng - self.lng).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_M * c
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.lat, self.lng)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
