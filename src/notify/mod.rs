//! Notification seams and the webhook channel family.
//!
//! Delivery is best effort: notifiers report nothing back to the caller and
//! never alter orchestration control flow. Success or failure is visible
//! only in the logs.

mod webhook;

pub use webhook::{WebhookFlavor, WebhookNotifier};

use chrono::NaiveDate;

use crate::models::{PriceChange, Snapshot};

/// One notification channel. Called with a non-empty change list; failures
/// are logged inside the implementation.
pub trait Notifier {
    fn notify(&self, changes: &[PriceChange]);
}

/// Destination for the weekly summary window.
pub trait ReportSink {
    fn deliver(&self, history: &[(NaiveDate, Snapshot)]);
}

/// Plain-text alert body shared by all webhook flavors.
pub fn format_alert(changes: &[PriceChange]) -> String {
    let mut lines = vec!["App Store Price Alert:".to_string()];
    for change in changes {
        lines.push(format!(
            "\n{}\n{} -> {} {}\n{}",
            change.name, change.old_price, change.new_price, change.currency, change.url
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_alert_lists_each_change() {
        let changes = vec![
            PriceChange {
                name: "AppX".to_string(),
                old_price: 6.0,
                new_price: 8.0,
                currency: "USD".to_string(),
                url: "https://apps.example/x".to_string(),
            },
            PriceChange {
                name: "AppY".to_string(),
                old_price: 3.0,
                new_price: 0.0,
                currency: "CNY".to_string(),
                url: "https://apps.example/y".to_string(),
            },
        ];

        let body = format_alert(&changes);
        assert!(body.starts_with("App Store Price Alert:"));
        assert!(body.contains("AppX\n6 -> 8 USD"));
        assert!(body.contains("AppY\n3 -> 0 CNY"));
        assert!(body.contains("https://apps.example/y"));
    }
}
