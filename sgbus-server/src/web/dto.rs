//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datamall::{BusArrivals, NextBus, ServiceArrival};
use crate::directory::BusStopDirectory;

/// Query for the arrivals page.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IndexRequest {
    /// Bus stop code to show arrivals for
    pub id: Option<String>,
}

impl IndexRequest {
    /// The requested stop code, if one was given.
    pub fn stop_code(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Query for the nearest-stop redirect.
///
/// Kept as text so malformed input gets a readable error rather than an
/// extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ClosestRequest {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

/// Arrivals at a stop, as JSON.
#[derive(Debug, Serialize)]
pub struct ArrivalsResponse {
    pub stop_code: String,
    pub stop_name: String,
    pub road_name: String,
    pub total_stops: usize,
    pub services: Vec<ServiceResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One bus service in an arrivals response.
#[derive(Debug, Serialize)]
pub struct ServiceResult {
    pub service_no: String,
    pub operator: String,
    pub buses: Vec<BusResult>,
}

impl ServiceResult {
    pub fn from_arrival(
        service: &ServiceArrival,
        directory: &BusStopDirectory,
        now: &DateTime<Utc>,
    ) -> Self {
        Self {
            service_no: service.service_no.clone(),
            operator: service.operator.clone(),
            buses: service
                .upcoming()
                .map(|b| BusResult::from_next_bus(b, directory, now))
                .collect(),
        }
    }
}

/// One upcoming bus.
#[derive(Debug, Serialize)]
pub struct BusResult {
    pub estimated_arrival: String,
    pub minutes_away: Option<i64>,
    pub destination_code: String,
    pub destination_name: String,
    pub load: String,
    pub bus_type: String,
    pub wheelchair_accessible: bool,
}

impl BusResult {
    pub fn from_next_bus(bus: &NextBus, directory: &BusStopDirectory, now: &DateTime<Utc>) -> Self {
        Self {
            estimated_arrival: bus.estimated_arrival.clone(),
            minutes_away: bus.minutes_until(now),
            destination_code: bus.destination_code.clone(),
            destination_name: directory.name_for(&bus.destination_code).to_string(),
            load: bus.load.clone(),
            bus_type: bus.bus_type.clone(),
            wheelchair_accessible: bus.is_wheelchair_accessible(),
        }
    }
}

/// Build the JSON arrivals response.
pub fn arrivals_response(
    stop_code: &str,
    arrivals: &BusArrivals,
    directory: &BusStopDirectory,
    now: &DateTime<Utc>,
    error: Option<String>,
) -> ArrivalsResponse {
    let stop = directory.get(stop_code);
    ArrivalsResponse {
        stop_code: stop_code.to_string(),
        stop_name: stop.map(|s| s.name.clone()).unwrap_or_default(),
        road_name: stop.map(|s| s.road_name.clone()).unwrap_or_default(),
        total_stops: directory.count(),
        services: arrivals
            .services
            .iter()
            .map(|s| ServiceResult::from_arrival(s, directory, now))
            .collect(),
        error,
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
