//! Watch list configuration (`apps.yaml`) and notifier settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

const DEFAULT_COUNTRY: &str = "cn";

/// Fatal configuration problems. Anything here aborts the run before any
/// store is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("No apps configured to monitor")]
    NoApps,
}

/// Top-level watch list.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    #[serde(default)]
    pub apps: Vec<AppEntry>,
}

/// One configured app. The id may be written as a number or a string in
/// YAML; it is normalized to a string either way.
#[derive(Debug, Clone, Deserialize)]
pub struct AppEntry {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,

    /// Fallback display name when the lookup response carries none.
    pub name: Option<String>,

    #[serde(default = "default_country")]
    pub country: String,
}

impl WatchConfig {
    /// Group configured apps by country so the lookup runs once per
    /// storefront.
    pub fn apps_by_country(&self) -> BTreeMap<&str, Vec<&AppEntry>> {
        let mut grouped: BTreeMap<&str, Vec<&AppEntry>> = BTreeMap::new();
        for app in &self.apps {
            grouped.entry(app.country.as_str()).or_default().push(app);
        }
        grouped
    }
}

/// Load and validate the watch list. An empty `apps` list is as fatal as a
/// missing file: the run must exit without side effects.
pub fn load(path: &Path) -> Result<WatchConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config: WatchConfig =
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if config.apps.is_empty() {
        return Err(ConfigError::NoApps);
    }

    Ok(config)
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Number(u64),
        Text(String),
    }

    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Number(n) => n.to_string(),
        IdRepr::Text(s) => s,
    })
}
