use std::net::SocketAddr;
use std::process::ExitCode;

use sgbus_server::config::ServerConfig;
use sgbus_server::datamall::{DatamallClient, DatamallConfig};
use sgbus_server::directory;
use sgbus_server::logging;
use sgbus_server::web::{AppState, create_router};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::from_env();
    logging::init(config.json_logs());

    if config.account_key.is_empty() {
        warn!("accountkey not set. DataMall calls will be rejected.");
    }

    // Load the bus stop directory (fail fast if unavailable)
    let directory = match directory::load_path(&config.stops_path) {
        Ok(directory) => directory,
        Err(e) => {
            error!(error = %e, path = %config.stops_path.display(), "failed to load bus stops");
            return ExitCode::FAILURE;
        }
    };
    info!("Loaded {} bus stops", directory.count());

    let datamall = match DatamallClient::new(DatamallConfig::new(&config.account_key)) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create DataMall client");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(directory, datamall, config.is_production());
    let app = create_router(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %addr, "error listening");
            return ExitCode::FAILURE;
        }
    };
    info!("Bus arrivals listening on http://{addr}");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server stopped");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
