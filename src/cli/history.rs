//! `pricewatch history` - inspect the recent timeline window.

use std::path::Path;

use colored::Colorize;

use crate::store::TimelineStore;
use crate::Result;

pub fn run(timeline_path: &Path, days: usize) -> Result<()> {
    let timeline = TimelineStore::new(timeline_path);
    let recent = timeline.get_recent_history(days);

    if recent.is_empty() {
        println!("No timeline history recorded yet.");
        return Ok(());
    }

    for (date, snapshot) in &recent {
        println!("{}", date.to_string().cyan().bold());
        for record in snapshot.values() {
            println!("  {}: {} {}", record.name, record.price, record.currency);
        }
    }
    println!("\n{} day(s) shown", recent.len());

    Ok(())
}
