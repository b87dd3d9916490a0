//! Dataset loading.
//!
//! The dataset is a JSON array in the shape of the LTA DataMall `BusStops`
//! listing:
//!
//! ```json
//! [{"BusStopCode": "01012", "RoadName": "Victoria St",
//!   "Description": "Hotel Grand Pacific",
//!   "Latitude": 1.29684825487647, "Longitude": 103.85253591654006}]
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::domain::{BusStop, Point};

use super::error::DirectoryError;
use super::stops::BusStopDirectory;

/// One record of the dataset, as serialized.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopRecord {
    pub bus_stop_code: String,
    #[serde(default)]
    pub road_name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl StopRecord {
    fn into_stop(self) -> Result<BusStop, DirectoryError> {
        if self.bus_stop_code.trim().is_empty() {
            return Err(DirectoryError::Parse {
                message: format!("stop \"{}\" has an empty BusStopCode", self.description),
            });
        }

        let location =
            Point::new(self.latitude, self.longitude).map_err(|e| DirectoryError::Parse {
                message: format!("stop {}: {e}", self.bus_stop_code),
            })?;

        Ok(BusStop::new(
            self.bus_stop_code,
            self.description,
            self.road_name,
            location,
        ))
    }
}

/// Build a directory from a serialized dataset.
///
/// When two records share a stop code the later record wins.
pub fn load<R: Read>(reader: R) -> Result<BusStopDirectory, DirectoryError> {
    let records: Vec<StopRecord> = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            DirectoryError::Source(e.into())
        } else {
            DirectoryError::Parse {
                message: e.to_string(),
            }
        }
    })?;

    let stops = records
        .into_iter()
        .map(StopRecord::into_stop)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BusStopDirectory::from_stops(stops))
}

/// Build a directory from a dataset file on disk.
pub fn load_path(path: impl AsRef<Path>) -> Result<BusStopDirectory, DirectoryError> {
    let file = File::open(path)?;
    load(BufReader::new(file))
}
