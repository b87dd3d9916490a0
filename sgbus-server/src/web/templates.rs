//! Askama templates for the web frontend.

use askama::Template;
use chrono::{DateTime, Utc};

use crate::datamall::{BusArrivals, NextBus, ServiceArrival};
use crate::directory::BusStopDirectory;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Arrivals page. Shows the search form, and the next buses when a stop
/// code was given.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stop_code: Option<String>,
    pub stop_name: String,
    pub road_name: String,
    pub total_stops: usize,
    pub services: Vec<ServiceView>,
    pub error: Option<String>,
}

impl IndexTemplate {
    /// Page for a stop, with whatever arrivals were fetched.
    pub fn for_stop(
        stop_code: Option<&str>,
        arrivals: &BusArrivals,
        directory: &BusStopDirectory,
        now: &DateTime<Utc>,
        error: Option<String>,
    ) -> Self {
        let stop = stop_code.and_then(|c| directory.get(c));
        Self {
            stop_code: stop_code.map(str::to_string),
            stop_name: stop.map(|s| s.name.clone()).unwrap_or_default(),
            road_name: stop.map(|s| s.road_name.clone()).unwrap_or_default(),
            total_stops: directory.count(),
            services: arrivals
                .services
                .iter()
                .map(|s| ServiceView::from_arrival(s, directory, now))
                .collect(),
            error,
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Bus service view model.
#[derive(Debug, Clone)]
pub struct ServiceView {
    pub service_no: String,
    pub operator: String,
    pub buses: Vec<BusView>,
}

impl ServiceView {
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
                .map(|b| BusView::from_next_bus(b, directory, now))
                .collect(),
        }
    }

    /// Destination of the first bus, for the service heading.
    pub fn destination(&self) -> &str {
        self.buses
            .first()
            .map(|b| b.destination_name.as_str())
            .unwrap_or("")
    }
}

/// Upcoming bus view model.
#[derive(Debug, Clone)]
pub struct BusView {
    pub minutes_away: Option<i64>,
    pub destination_name: String,
    pub load: &'static str,
    pub bus_type: &'static str,
    pub wheelchair_accessible: bool,
}

impl BusView {
    pub fn from_next_bus(bus: &NextBus, directory: &BusStopDirectory, now: &DateTime<Utc>) -> Self {
        Self {
            minutes_away: bus.minutes_until(now),
            destination_name: directory.name_for(&bus.destination_code).to_string(),
            load: bus.load_description(),
            bus_type: bus.type_description(),
            wheelchair_accessible: bus.is_wheelchair_accessible(),
        }
    }

    /// "Arr", "1 min", "12 mins", or "-" when the estimate is unreadable.
    pub fn display_minutes(&self) -> String {
        match self.minutes_away {
            None => "-".to_string(),
            Some(0) => "Arr".to_string(),
            Some(1) => "1 min".to_string(),
            Some(m) => format!("{m} mins"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BusStop, Point};

    fn bus(minutes_away: Option<i64>) -> BusView {
        BusView {
            minutes_away,
            destination_name: "Pasir Ris Int".into(),
            load: "",
            bus_type: "",
            wheelchair_accessible: false,
        }
    }

    #[test]
    fn display_minutes() {
        assert_eq!(bus(None).display_minutes(), "-");
        assert_eq!(bus(Some(0)).display_minutes(), "Arr");
        assert_eq!(bus(Some(1)).display_minutes(), "1 min");
        assert_eq!(bus(Some(12)).display_minutes(), "12 mins");
    }

    #[test]
    fn service_destination() {
        let view = ServiceView {
            service_no: "15".into(),
            operator: "GAS".into(),
            buses: vec![bus(Some(3))],
        };
        assert_eq!(view.destination(), "Pasir Ris Int");

        let empty = ServiceView {
            buses: vec![],
            ..view
        };
        assert_eq!(empty.destination(), "");
    }

    #[test]
    fn index_renders_stop_and_arrivals() {
        let directory = BusStopDirectory::from_stops([
            BusStop::new("77009", "Pasir Ris Int", "", Point::new(1.373, 103.949).unwrap()),
            BusStop::new("83139", "Blk 19", "Pasir Ris Dr 1", Point::new(1.316, 103.906).unwrap()),
        ]);
        let arrivals: BusArrivals = serde_json::from_str(
            r#"{"Services": [{"ServiceNo": "15", "Operator": "GAS",
                "NextBus": {"DestinationCode": "77009", "EstimatedArrival": "2017-06-05T14:57:09+08:00",
                            "Load": "SEA", "Type": "DD", "Feature": "WAB"}}]}"#,
        )
        .unwrap();
        let now = DateTime::parse_from_rfc3339("2017-06-05T14:50:00+08:00")
            .unwrap()
            .with_timezone(&Utc);

        let html = IndexTemplate::for_stop(Some("83139"), &arrivals, &directory, &now, None)
            .render()
            .unwrap();

        assert!(html.contains("83139"));
        assert!(html.contains("Blk 19"));
        assert!(html.contains("Pasir Ris Dr 1"));
        assert!(html.contains("Pasir Ris Int"));
        assert!(html.contains("7 mins"));
        assert!(html.contains("Seats available"));
        assert!(html.contains("2 stops"));
    }

    #[test]
    fn index_renders_without_stop() {
        let directory = BusStopDirectory::default();
        let now = Utc::now();
        let html = IndexTemplate::for_stop(None, &BusArrivals::default(), &directory, &now, None)
            .render()
            .unwrap();

        assert!(html.contains("0 stops"));
        assert!(!html.contains("class=\"service\""));
    }

    #[test]
    fn index_renders_error_note() {
        let directory = BusStopDirectory::default();
        let now = Utc::now();
        let html = IndexTemplate::for_stop(
            Some("12345"),
            &BusArrivals::default(),
            &directory,
            &now,
            Some("bad response 500".into()),
        )
        .render()
        .unwrap();

        assert!(html.contains("Could not fetch arrivals"));
        // Unknown stop, so no road line
        assert!(!html.contains("class=\"road\""));
    }
}
