//! DataMall `BusArrivalv2` response DTOs.
//!
//! Field names follow the upstream JSON exactly. DataMall sends empty
//! strings rather than omitting fields when a bus has no estimate, so every
//! field defaults to empty.

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};

/// Response from `BusArrivalv2`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusArrivals {
    #[serde(rename = "odata.metadata", default)]
    pub odata_metadata: String,

    #[serde(default)]
    pub bus_stop_code: String,

    #[serde(default)]
    pub services: Vec<ServiceArrival>,
}

impl BusArrivals {
    /// Sort services so the soonest next bus comes first.
    ///
    /// Services without an estimate keep their relative order and go last.
    pub fn sort_by_arrival(&mut self) {
        self.services.sort_by(|a, b| {
            let a = &a.next_bus.estimated_arrival;
            let b = &b.next_bus.estimated_arrival;
            (a.is_empty(), a).cmp(&(b.is_empty(), b))
        });
    }
}

/// One bus service calling at the stop, with up to three upcoming buses.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceArrival {
    #[serde(default)]
    pub service_no: String,

    /// Operator code, e.g. "SBST", "SMRT", "TTS", "GAS".
    #[serde(default)]
    pub operator: String,

    #[serde(default)]
    pub next_bus: NextBus,

    #[serde(default)]
    pub next_bus2: NextBus,

    #[serde(default)]
    pub next_bus3: NextBus,
}

impl ServiceArrival {
    /// The upcoming buses that carry an arrival estimate.
    pub fn upcoming(&self) -> impl Iterator<Item = &NextBus> {
        [&self.next_bus, &self.next_bus2, &self.next_bus3]
            .into_iter()
            .filter(|b| b.has_estimate())
    }
}

/// When a particular bus is coming.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NextBus {
    #[serde(default)]
    pub origin_code: String,

    #[serde(default)]
    pub destination_code: String,

    /// RFC 3339 timestamp, e.g. "2017-04-29T07:20:24+08:00".
    #[serde(default)]
    pub estimated_arrival: String,

    #[serde(default)]
    pub latitude: String,

    #[serde(default)]
    pub longitude: String,

    #[serde(default)]
    pub visit_number: String,

    /// "SEA", "SDA" or "LSD".
    #[serde(default)]
    pub load: String,

    /// "WAB" when wheelchair accessible.
    #[serde(default)]
    pub feature: String,

    /// "SD", "DD" or "BD".
    #[serde(rename = "Type", default)]
    pub bus_type: String,
}

impl NextBus {
    pub fn has_estimate(&self) -> bool {
        !self.estimated_arrival.is_empty()
    }

    /// Parsed arrival estimate, if present and well-formed.
    pub fn estimated_arrival_time(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.estimated_arrival).ok()
    }

    /// Whole minutes from `now` until arrival, clamped at zero.
    pub fn minutes_until<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<i64> {
        let eta = self.estimated_arrival_time()?;
        let mins = eta.signed_duration_since(now.clone()).num_minutes();
        Some(mins.max(0))
    }

    pub fn load_description(&self) -> &'static str {
        match self.load.as_str() {
            "SEA" => "Seats available",
            "SDA" => "Standing available",
            "LSD" => "Limited standing",
            _ => "",
        }
    }

    pub fn type_description(&self) -> &'static str {
        match self.bus_type.as_str() {
            "SD" => "Single deck",
            "DD" => "Double deck",
            "BD" => "Bendy",
            _ => "",
        }
    }

    pub fn is_wheelchair_accessible(&self) -> bool {
        self.feature == "WAB"
    }
}
