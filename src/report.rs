//! Weekly summary rendering over a recent-history window.

use chrono::NaiveDate;

use crate::models::Snapshot;

/// Render the recent-history window as a plain-text report: one dated
/// section per archived day, one line per app.
pub fn format_weekly_report(history: &[(NaiveDate, Snapshot)]) -> String {
    if history.is_empty() {
        return "Weekly price report: no observations recorded this week.".to_string();
    }

    let first = history.first().map(|(d, _)| *d);
    let last = history.last().map(|(d, _)| *d);

    let mut lines = match (first, last) {
        (Some(first), Some(last)) if first != last => {
            vec![format!("Weekly price report ({first} to {last}):")]
        }
        (Some(first), _) => vec![format!("Weekly price report ({first}):")],
        _ => unreachable!("history is non-empty"),
    };

    for (date, snapshot) in history {
        lines.push(String::new());
        lines.push(format!("{date}"));
        for record in snapshot.values() {
            lines.push(format!("  {}: {} {}", record.name, record.price, record.currency));
        }
    }

    lines.join("\n")
}
