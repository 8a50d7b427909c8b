//! Store configuration

use serde::{Deserialize, Serialize};

/// Configuration for the record store backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfig {
    /// Volatile in-memory engine, data is gone on shutdown
    Memory,
    /// Embedded surrealkv engine at a filesystem path
    Embedded {
        #[serde(default = "default_store_path")]
        path: String,
    },
    /// Remote SurrealDB server over websocket
    Remote {
        url: String,
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        password: Option<String>,
        namespace: String,
        database: String,
    },
}

fn default_store_path() -> String {
    "./kith.db".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Embedded {
            path: default_store_path(),
        }
    }
}

impl StoreConfig {
    /// Connection string for `surrealdb::engine::any::connect`.
    pub fn address(&self) -> String {
        match self {
            StoreConfig::Memory => "memory".to_string(),
            StoreConfig::Embedded { path } => format!("surrealkv://{path}"),
            StoreConfig::Remote { url, .. } => url.clone(),
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            StoreConfig::Remote { namespace, .. } => namespace,
            _ => "kith",
        }
    }

    pub fn database(&self) -> &str {
        match self {
            StoreConfig::Remote { database, .. } => database,
            _ => "kith",
        }
    }
}
