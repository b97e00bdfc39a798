use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Last-known facts for one tracked app. The App Store id is the map key,
/// not a field; a record is replaced wholesale on update, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRecord {
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub url: String,
    pub country: String,
}

/// Current known state of the world: app id -> last observed record.
///
/// Loaded once per run, merged in memory, persisted once per run as a full
/// overwrite.
pub type Snapshot = BTreeMap<String, AppRecord>;

/// Day-indexed archive: at most one Snapshot per calendar date. Re-archiving
/// a date overwrites that entry. `NaiveDate` keys serialize as `YYYY-MM-DD`
/// and the BTreeMap order is chronological, which windowed queries rely on.
pub type Timeline = BTreeMap<NaiveDate, Snapshot>;
