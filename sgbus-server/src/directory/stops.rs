//! The bus stop directory.

use std::collections::BTreeMap;

use crate::domain::{BusStop, Point};

use super::error::DirectoryError;

/// Immutable collection of every known bus stop, keyed by stop code.
///
/// Stops are held in ascending code order. That order is the canonical
/// iteration order and decides ties in [`BusStopDirectory::closest`].
#[derive(Debug, Clone, Default)]
pub struct BusStopDirectory {
    stops: BTreeMap<String, BusStop>,
}

impl BusStopDirectory {
    /// Build a directory from stops. A later stop replaces an earlier one
    /// with the same code.
    pub fn from_stops(stops: impl IntoIterator<Item = BusStop>) -> Self {
        let stops = stops
            .into_iter()
            .map(|stop| (stop.code.clone(), stop))
            .collect();
        Self { stops }
    }

    /// Human-readable name for a stop code, or `""` if the code is unknown.
    pub fn name_for(&self, code: &str) -> &str {
        self.stops.get(code).map_or("", |s| s.name.as_str())
    }

    /// Look up a stop by code.
    pub fn get(&self, code: &str) -> Option<&BusStop> {
        self.stops.get(code)
    }

    /// Total number of stops.
    pub fn count(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Iterate stops in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = &BusStop> {
        self.stops.values()
    }

    /// Find the stop nearest to `p`.
    ///
    /// Scans every stop using planar distance in degree space. On an exact
    /// tie the stop with the lowest code wins.
    pub fn closest(&self, p: Point) -> Result<&BusStop, DirectoryError> {
        let mut best: Option<(&BusStop, f64)> = None;

        for stop in self.stops.values() {
            let dist = p.planar_distance_sq(&stop.location());
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((stop, dist)),
            }
        }

        best.map(|(stop, _)| stop).ok_or(DirectoryError::Empty)
    }
}
