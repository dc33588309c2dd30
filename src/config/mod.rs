//! Configuration loading and management

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`ServerConfig::bind`]
pub const ENV_BIND: &str = "RESTAURANTS_BIND";
/// Environment variable overriding [`StoreConfig::uri`]
pub const ENV_MONGODB_URI: &str = "RESTAURANTS_MONGODB_URI";
/// Environment variable overriding [`StoreConfig::database`]
pub const ENV_DATABASE: &str = "RESTAURANTS_DATABASE";

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1:3000"
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Which store backend serves the venues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    InMemory,
    Mongodb,
}

impl Default for StoreBackend {
    fn default() -> Self {
        if cfg!(feature = "mongodb_backend") {
            StoreBackend::Mongodb
        } else {
            StoreBackend::InMemory
        }
    }
}

/// Document store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            uri: "mongodb://127.0.0.1:27017".to_string(),
            database: "tutorial".to_string(),
            collection: "restaurants".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an optional file, then apply environment overrides
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => {
                tracing::info!("No config file given, using defaults");
                Self::default()
            }
        };
        let config = config.with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides looked up by environment variable name
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = lookup(ENV_BIND) {
            tracing::info!("{} set, binding to {}", ENV_BIND, bind);
            self.server.bind = bind;
        }
        if let Some(uri) = lookup(ENV_MONGODB_URI) {
            self.store.uri = uri;
        }
        if let Some(database) = lookup(ENV_DATABASE) {
            self.store.database = database;
        }
        self
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.server.bind.trim().is_empty() {
            bail!("server.bind must not be empty");
        }
        if self.store.backend == StoreBackend::Mongodb {
            if !cfg!(feature = "mongodb_backend") {
                bail!("store.backend is mongodb but the mongodb_backend feature is disabled");
            }
            if self.store.database.is_empty() || self.store.collection.is_empty() {
                bail!("store.database and store.collection must not be empty");
            }
        }
        Ok(())
    }
}
