use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;

use crate::models::{Snapshot, Timeline};

/// Persists the day-indexed archive of snapshots.
///
/// Every append is a read-modify-write over the entire archive, so cost
/// grows with total archive size rather than with one day's entry. Accepted
/// at this scale; the contract would survive an append-only log if that
/// ever changes.
pub struct TimelineStore {
    path: PathBuf,
}

impl TimelineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the full timeline. Missing or unreadable state comes back as an
    /// empty timeline, never as an error.
    pub fn load(&self) -> Timeline {
        super::read_or_default(&self.path, "timeline")
    }

    /// Record `snapshot` under `date`, overwriting any existing entry for
    /// that date. At most one snapshot per calendar day.
    pub fn append_daily_log(&self, date: NaiveDate, snapshot: &Snapshot) -> Result<()> {
        let mut timeline = self.load();
        timeline.insert(date, snapshot.clone());
        super::write_json(&self.path, &timeline, "timeline")
    }

    /// The `days` most recent dates present in the timeline, in ascending
    /// (chronological) order. Dates never recorded are absent, not
    /// synthesized as empty.
    pub fn get_recent_history(&self, days: usize) -> Vec<(NaiveDate, Snapshot)> {
        let timeline = self.load();
        let mut recent: Vec<(NaiveDate, Snapshot)> =
            timeline.into_iter().rev().take(days).collect();
        recent.reverse();
        recent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppRecord;

    fn record(price: f64) -> AppRecord {
        AppRecord {
            name: "AppX".to_string(),
            price,
            currency: "USD".to_string(),
            url: "https://apps.example/appx".to_string(),
            country: "us".to_string(),
        }
    }

    fn snapshot(price: f64) -> Snapshot {
        let mut snap = Snapshot::new();
        snap.insert("1".to_string(), record(price));
        snap
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_append_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = TimelineStore::new(dir.path().join("timeline.json"));

        store.append_daily_log(date("2024-01-01"), &snapshot(6.0)).unwrap();
        store.append_daily_log(date("2024-01-02"), &snapshot(8.0)).unwrap();

        let timeline = store.load();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[&date("2024-01-01")]["1"].price, 6.0);
        assert_eq!(timeline[&date("2024-01-02")]["1"].price, 8.0);
    }

    #[test]
    fn test_same_date_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = TimelineStore::new(dir.path().join("timeline.json"));

        let d = date("2024-01-05");
        store.append_daily_log(d, &snapshot(6.0)).unwrap();
        store.append_daily_log(d, &snapshot(9.0)).unwrap();

        let timeline = store.load();
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[&d]["1"].price, 9.0);
    }

    #[test]
    fn test_recent_history_window() {
        let dir = tempfile::tempdir().unwrap();
        let store = TimelineStore::new(dir.path().join("timeline.json"));

        for day in 1..=10 {
            let d = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
            store.append_daily_log(d, &snapshot(day as f64)).unwrap();
        }

        let recent = store.get_recent_history(7);
        assert_eq!(recent.len(), 7);
        assert_eq!(recent.first().unwrap().0, date("2024-01-04"));
        assert_eq!(recent.last().unwrap().0, date("2024-01-10"));
        // Ascending throughout, with the right snapshot at each date.
        for (i, (d, snap)) in recent.iter().enumerate() {
            assert_eq!(*d, NaiveDate::from_ymd_opt(2024, 1, 4 + i as u32).unwrap());
            assert_eq!(snap["1"].price, (4 + i) as f64);
        }
    }

    #[test]
    fn test_recent_history_shorter_than_window() {
        let dir = tempfile::tempdir().unwrap();
        let store = TimelineStore::new(dir.path().join("timeline.json"));

        for day in 1..=10 {
            let d = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
            store.append_daily_log(d, &snapshot(day as f64)).unwrap();
        }

        let recent = store.get_recent_history(20);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent.first().unwrap().0, date("2024-01-01"));
        assert_eq!(recent.last().unwrap().0, date("2024-01-10"));
    }

    #[test]
    fn test_corrupt_timeline_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timeline.json");
        std::fs::write(&path, "\0\0garbage").unwrap();

        let store = TimelineStore::new(&path);
        assert!(store.load().is_empty());
        assert!(store.get_recent_history(7).is_empty());
    }

    #[test]
    fn test_gap_dates_are_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = TimelineStore::new(dir.path().join("timeline.json"));

        store.append_daily_log(date("2024-01-01"), &snapshot(1.0)).unwrap();
        store.append_daily_log(date("2024-01-07"), &snapshot(7.0)).unwrap();

        let recent = store.get_recent_history(7);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].0, date("2024-01-01"));
        assert_eq!(recent[1].0, date("2024-01-07"));
    }
}
