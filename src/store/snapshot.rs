use std::path::PathBuf;

use anyhow::Result;

use crate::models::Snapshot;

/// Persists the latest known record per tracked app.
///
/// Exposes whole-snapshot load/save only; there are no partial-key
/// operations. Saving is a full overwrite and is not atomic -- `load`
/// tolerates whatever a crash mid-write leaves behind.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted snapshot. Missing or unreadable state comes back
    /// as an empty snapshot, never as an error.
    pub fn load(&self) -> Snapshot {
        super::read_or_default(&self.path, "snapshot")
    }

    /// Persist the full snapshot, replacing any prior content.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        super::write_json(&self.path, snapshot, "snapshot")
    }
}
