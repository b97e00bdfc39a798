//! JSON-file persistence for the snapshot and the daily timeline.
//!
//! Both stores share the same primitive: a whole-file JSON mapping that is
//! read in full and rewritten in full. Unreadable or corrupt files are
//! logged and treated as empty state, so a torn write never blocks the next
//! run.

mod snapshot;
mod timeline;

pub use snapshot::SnapshotStore;
pub use timeline::TimelineStore;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::warn;

/// Read a JSON mapping file, mapping absence and corruption to the default.
fn read_or_default<T>(path: &Path, what: &str) -> T
where
    T: Default + DeserializeOwned,
{
    if !path.exists() {
        return T::default();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read {} file {}: {}", what, path.display(), e);
            return T::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                "Corrupt {} file {}, starting from empty: {}",
                what,
                path.display(),
                e
            );
            T::default()
        }
    }
}

/// Write a JSON mapping file in full, creating parent directories.
fn write_json<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let content = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", what))?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {} file {}", what, path.display()))?;

    Ok(())
}
