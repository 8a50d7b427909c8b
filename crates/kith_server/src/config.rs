//! Server configuration
//!
//! Loaded from a TOML file named by `KITH_CONFIG` (default `kith.toml`),
//! then overridden from the environment. A missing file just means
//! defaults.

use std::env;
use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use kith_core::StoreConfig;

use crate::error::{ServerError, ServerResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "127.0.0.1:8080")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Record store backend
    #[serde(default)]
    pub store: StoreConfig,

    /// Log sinks
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Directory for the rolling log file; console-only when unset
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            request_timeout_secs: default_request_timeout(),
            store: StoreConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from file and environment.
    pub fn load() -> ServerResult<Self> {
        let path = env::var("KITH_CONFIG").unwrap_or_else(|_| "kith.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ServerError::Config(format!("failed to read {path}: {e}")))?;
            toml::from_str(&contents)
                .map_err(|e| ServerError::Config(format!("failed to parse {path}: {e}")))?
        } else {
            Self::default()
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(addr) = env::var("KITH_BIND_ADDRESS") {
            self.bind_address = addr;
        }
        if let Ok(path) = env::var("KITH_STORE_PATH") {
            self.store = StoreConfig::Embedded { path };
        }
        if let Ok(dir) = env::var("KITH_LOG_DIR") {
            self.log.directory = Some(dir);
        }
    }

    fn validate(&self) -> ServerResult<()> {
        self.bind_address
            .parse::<SocketAddr>()
            .map_err(|e| ServerError::Config(format!("invalid bind address: {e}")))?;
        if self.request_timeout_secs == 0 {
            return Err(ServerError::Config(
                "request timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
