//! In-memory bus stop directory.
//!
//! Built once at startup from the static `all.json` dataset (the LTA
//! DataMall bus stop listing) and shared read-only for the lifetime of the
//! process. Provides stop code → name lookup and nearest-stop search.

mod error;
mod loader;
mod stops;

pub use error::DirectoryError;
pub use loader::{StopRecord, load, load_path};
pub use stops::BusStopDirectory;
