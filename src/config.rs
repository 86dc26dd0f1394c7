//! Application-level configuration loading: listening port and storage backend selection.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "CATALOGO_JOGOS_CONFIG_PATH";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
const DEFAULT_MONGO_DB: &str = "catalogo_jogos";

/// Where catalog entries are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local storage, lost on restart.
    Memory,
    /// MongoDB, available with the `mongo-store` feature.
    #[serde(alias = "mongodb")]
    Mongo,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "mongo" | "mongodb" => Ok(StorageBackend::Mongo),
            other => Err(format!("unknown storage backend `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Immutable runtime configuration resolved at startup.
pub struct AppConfig {
    /// TCP port the HTTP server binds to.
    pub port: u16,
    /// Backend selected for catalog storage.
    pub storage: StorageBackend,
    /// Connection string used when `storage` is `mongo`.
    pub mongo_uri: String,
    /// Database name used when `storage` is `mongo`.
    pub mongo_db: String,
}

impl AppConfig {
    /// Load the configuration file, then apply environment overrides.
    ///
    /// A missing or unreadable file falls back to the built-in defaults.
    pub fn load() -> Self {
        let mut config = Self::from_file(&resolve_config_path());
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded configuration file");
                    raw.into()
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Apply `PORT`/`SERVER_PORT`, `STORAGE_BACKEND`, `MONGO_URI` and `MONGO_DB`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(port) = lookup("PORT")
            .or_else(|| lookup("SERVER_PORT"))
            .and_then(|value| value.parse::<u16>().ok())
        {
            self.port = port;
        }

        if let Some(value) = lookup("STORAGE_BACKEND") {
            match value.parse() {
                Ok(storage) => self.storage = storage,
                Err(err) => warn!(error = %err, "ignoring STORAGE_BACKEND override"),
            }
        }

        if let Some(uri) = lookup("MONGO_URI") {
            self.mongo_uri = uri;
        }
        if let Some(db) = lookup("MONGO_DB") {
            self.mongo_db = db;
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            storage: StorageBackend::Memory,
            mongo_uri: DEFAULT_MONGO_URI.to_owned(),
            mongo_db: DEFAULT_MONGO_DB.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    port: Option<u16>,
    storage: Option<StorageBackend>,
    mongo_uri: Option<String>,
    mongo_db: Option<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            port: value.port.unwrap_or(defaults.port),
            storage: value.storage.unwrap_or(defaults.storage),
            mongo_uri: value.mongo_uri.unwrap_or(defaults.mongo_uri),
            mongo_db: value.mongo_db.unwrap_or(defaults.mongo_db),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
