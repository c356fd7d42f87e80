//! Configuration data structures for sinew.
//!
//! These types map directly to TOML (also JSON / YAML) configuration files. They are
//! intentionally serde-friendly and include defaults so that minimal configs remain concise.
//! Every `[database]` field can also be supplied through `SINEW__DATABASE__*` environment
//! variables (see [`crate::config::loader`]).
use serde::{Deserialize, Serialize};

fn default_listen_addr() -> String {
    "127.0.0.1:9000".to_string()
}

/// Top-level service configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// The address the HTTP service listens on
    pub listen_addr: String,
    /// Backend database connection settings
    pub database: DatabaseConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            database: DatabaseConfig::default(),
        }
    }
}

/// Connection settings for the backend database.
///
/// The address parts are kept as strings and assembled into a DSN at open
/// time; empty values are passed through to the client library and surface
/// as its connection error rather than being rejected here.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Backend driver id: "postgres", "mysql" or "sqlite"
    pub driver: String,
    /// Transport scheme; only "tcp" is supported for network drivers
    pub protocol: String,
    /// Backend host
    pub host: String,
    /// Backend port
    pub port: String,
    /// Database / schema name (file path for sqlite)
    pub name: String,
    /// Username
    pub user: String,
    /// Password
    pub password: String,
    /// Upper bound on concurrently open connections
    pub max_connections: u32,
    /// Warm connections the pool keeps ready between requests
    pub max_idle_connections: u32,
    /// Forced connection rotation age; also seeds the liveness-probe cache window
    pub conn_max_lifetime_secs: Option<u64>,
    /// Maximum time to wait for a connection checkout
    pub acquire_timeout_secs: u64,
    /// Independent override for the liveness-probe cache window; when unset the
    /// window follows `conn_max_lifetime_secs`
    pub ping_cache_secs: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: "postgres".to_string(),
            protocol: "tcp".to_string(),
            host: "localhost".to_string(),
            port: "5432".to_string(),
            name: String::new(),
            user: String::new(),
            password: String::new(),
            max_connections: 10,
            max_idle_connections: 1,
            conn_max_lifetime_secs: Some(1800),
            acquire_timeout_secs: 30,
            ping_cache_secs: None,
        }
    }
}
