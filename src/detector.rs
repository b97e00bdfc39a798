//! Price change detection between the previous snapshot and a fresh fetch.

use tracing::info;

use crate::models::{PriceChange, Snapshot};

/// Compare a fresh fetch against the previous snapshot and return one
/// `PriceChange` per app whose price differs.
///
/// Apps not seen before are logged as newly tracked and emit nothing; apps
/// present only in `previous` (delisted, or dropped from the lookup
/// response) also emit nothing and are left for the merge step to carry
/// forward. Comparison is strict value inequality, no tolerance band.
pub fn detect_changes(previous: &Snapshot, current: &Snapshot) -> Vec<PriceChange> {
    let mut changes = Vec::new();

    for (app_id, record) in current {
        match previous.get(app_id) {
            None => {
                info!(
                    "New app tracked: {} at {} {}",
                    record.name, record.price, record.currency
                );
            }
            Some(prev) if prev.price != record.price => {
                info!(
                    "Price change detected for {}: {} -> {}",
                    record.name, prev.price, record.price
                );
                changes.push(PriceChange {
                    name: record.name.clone(),
                    old_price: prev.price,
                    new_price: record.price,
                    currency: record.currency.clone(),
                    url: record.url.clone(),
                });
            }
            Some(_) => {}
        }
    }

    changes
}
