//! Application state for the web layer.

use std::sync::Arc;

use crate::datamall::DatamallClient;
use crate::directory::BusStopDirectory;

/// Shared application state.
///
/// Contains all the services needed to handle requests. The directory is
/// built once at startup and only ever read afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Every known bus stop
    pub directory: Arc<BusStopDirectory>,

    /// DataMall arrivals client
    pub datamall: Arc<DatamallClient>,

    /// Whether search engines may index pages
    pub production: bool,
}

impl AppState {
    /// Create a new app state.
    pub fn new(directory: BusStopDirectory, datamall: DatamallClient, production: bool) -> Self {
        Self {
            directory: Arc::new(directory),
            datamall: Arc::new(datamall),
            production,
        }
    }
}
