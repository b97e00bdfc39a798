// Pricewatch - App Store price watcher
// Checks configured apps against the iTunes lookup API, detects price
// changes, keeps a daily timeline of observations, and pushes alerts.

pub mod cli;
pub mod config;
pub mod cycle;
pub mod detector;
pub mod lookup;
pub mod models;
pub mod notify;
pub mod report;
pub mod store;

pub use anyhow::{Context, Result};

// Re-export commonly used types
pub use cycle::{CycleContext, CycleOutcome};
pub use models::{AppRecord, PriceChange, Snapshot, Timeline};
pub use store::{SnapshotStore, TimelineStore};
