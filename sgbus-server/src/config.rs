//! Server configuration, read from the environment.

use std::path::PathBuf;

/// Port used when `PORT` is unset or unparsable.
const DEFAULT_PORT: u16 = 3000;

/// Dataset path used when `STOPS_PATH` is unset.
const DEFAULT_STOPS_PATH: &str = "all.json";

/// Static asset directory used when `STATIC_DIR` is unset.
const DEFAULT_STATIC_DIR: &str = "static";

/// Stage name under which pages may be indexed by search engines.
const PRODUCTION_STAGE: &str = "production";

/// Configuration for the web server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on (all interfaces)
    pub port: u16,

    /// Path to the bus stop dataset
    pub stops_path: PathBuf,

    /// Path to static assets served under `/static`
    pub static_dir: PathBuf,

    /// DataMall account key; empty means upstream calls will be rejected
    pub account_key: String,

    /// Deployment stage (`UP_STAGE`), if any
    pub stage: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            stops_path: PathBuf::from(DEFAULT_STOPS_PATH),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            account_key: String::new(),
            stage: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            port: non_empty("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            stops_path: non_empty("STOPS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.stops_path),
            static_dir: non_empty("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            account_key: non_empty("accountkey")
                .or_else(|| non_empty("ACCOUNT_KEY"))
                .unwrap_or_default(),
            stage: non_empty("UP_STAGE"),
        }
    }

    /// Whether this deployment is production (pages may be indexed).
    pub fn is_production(&self) -> bool {
        self.stage.as_deref() == Some(PRODUCTION_STAGE)
    }

    /// Whether logs should be emitted as JSON lines.
    ///
    /// Any deployed stage logs JSON; local runs log human-readable text.
    pub fn json_logs(&self) -> bool {
        self.stage.is_some()
    }
}
