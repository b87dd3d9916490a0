//! Bus stop type.

use super::Point;

/// One physical bus stop.
///
/// The coordinates are held as a validated [`Point`], so a `BusStop` always
/// sits somewhere on the globe.
#[derive(Debug, Clone, PartialEq)]
pub struct BusStop {
    /// Five-digit LTA stop code, e.g. "01012".
    pub code: String,

    /// Human-readable description, e.g. "Hotel Grand Pacific".
    pub name: String,

    /// Road the stop is on; empty when the dataset omits it.
    pub road_name: String,

    location: Point,
}

impl BusStop {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        road_name: impl Into<String>,
        location: Point,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            road_name: road_name.into(),
            location,
        }
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn latitude(&self) -> f64 {
        self.location.lat()
    }

    pub fn longitude(&self) -> f64 {
        self.location.lng()
    }
}
