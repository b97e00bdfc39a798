//! `pricewatch run` - one full watch cycle.

use std::path::Path;

use chrono::{Local, Weekday};
use colored::Colorize;

use crate::config;
use crate::cycle::{run_cycle, CycleContext};
use crate::lookup::ItunesLookup;
use crate::notify::{Notifier, ReportSink, WebhookNotifier};
use crate::store::{SnapshotStore, TimelineStore};
use crate::Result;

/// Weekly reports go out on the last day of a Monday-start week.
const REPORT_DAY: Weekday = Weekday::Sun;

pub fn run(config_path: &Path, data_path: &Path, timeline_path: &Path) -> Result<()> {
    let config = config::load(config_path)?;

    let snapshots = SnapshotStore::new(data_path);
    let timeline = TimelineStore::new(timeline_path);
    let lookup = ItunesLookup::new()?;

    let webhook = match webhook_url_from_env() {
        Some(url) => Some(WebhookNotifier::new(url)?),
        None => None,
    };
    let notifiers: Vec<&dyn Notifier> = webhook
        .iter()
        .map(|hook| hook as &dyn Notifier)
        .collect();
    let report_sink = webhook.as_ref().map(|hook| hook as &dyn ReportSink);

    let ctx = CycleContext {
        snapshots: &snapshots,
        timeline: &timeline,
        lookup: &lookup,
        notifiers: &notifiers,
        report_sink,
        today: Local::now().date_naive(),
        report_day: REPORT_DAY,
    };

    let outcome = run_cycle(&config, &ctx)?;

    let summary = format!(
        "Checked {} app(s): {} fetched, {} price change(s)",
        config.apps.len(),
        outcome.fetched,
        outcome.changes.len()
    );
    if outcome.changes.is_empty() {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.yellow());
        for change in &outcome.changes {
            println!("  {}", change.summary());
        }
    }

    Ok(())
}

fn webhook_url_from_env() -> Option<String> {
    std::env::var("WEBHOOK_URL").ok().filter(|url| !url.is_empty())
}
