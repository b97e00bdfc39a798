//! One watch cycle: fetch, detect, notify, persist, archive, and the
//! weekly report when the run date calls for it.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Weekday};
use tracing::{debug, info, warn};

use crate::config::WatchConfig;
use crate::detector::detect_changes;
use crate::lookup::PriceLookup;
use crate::models::{AppRecord, PriceChange, Snapshot};
use crate::notify::{Notifier, ReportSink};
use crate::store::{SnapshotStore, TimelineStore};

/// How many archived days feed the weekly report.
const REPORT_WINDOW_DAYS: usize = 7;

/// Everything one cycle needs. The run date and report day are injected so
/// the cycle never reads the system clock; only the CLI does.
pub struct CycleContext<'a> {
    pub snapshots: &'a SnapshotStore,
    pub timeline: &'a TimelineStore,
    pub lookup: &'a dyn PriceLookup,
    pub notifiers: &'a [&'a dyn Notifier],
    pub report_sink: Option<&'a dyn ReportSink>,
    pub today: NaiveDate,
    pub report_day: Weekday,
}

/// What one cycle did, for summary lines and tests.
pub struct CycleOutcome {
    pub fetched: usize,
    pub changes: Vec<PriceChange>,
    pub report_sent: bool,
}

/// Run one full cycle against the given context.
///
/// A whole-country lookup failure degrades to an empty result for that
/// country; ids missing from a response are skipped and keep their previous
/// record. Nothing here is fatal except store writes failing.
pub fn run_cycle(config: &WatchConfig, ctx: &CycleContext) -> Result<CycleOutcome> {
    let previous = ctx.snapshots.load();
    let mut current = Snapshot::new();

    for (country, apps) in config.apps_by_country() {
        let app_ids: Vec<String> = apps.iter().map(|app| app.id.clone()).collect();
        info!("Fetching data for {} apps in {}...", app_ids.len(), country);

        let results = ctx.lookup.fetch(&app_ids, country);

        for app in apps {
            let Some(details) = results.get(&app.id) else {
                warn!("Could not fetch details for app ID {}", app.id);
                continue;
            };

            let name = details
                .track_name
                .clone()
                .or_else(|| app.name.clone())
                .unwrap_or_else(|| "Unknown".to_string());

            current.insert(
                app.id.clone(),
                AppRecord {
                    name,
                    price: details.price,
                    currency: details.currency.clone(),
                    url: details.track_view_url.clone(),
                    country: country.to_string(),
                },
            );
        }
    }

    let changes = detect_changes(&previous, &current);

    if changes.is_empty() {
        info!("No price changes detected.");
    } else {
        info!("Sending notifications for {} changes...", changes.len());
        for notifier in ctx.notifiers {
            notifier.notify(&changes);
        }
    }

    // Merge the fresh fetch over the previous state. Apps the lookup did not
    // return this cycle keep their last-known record indefinitely.
    let mut merged = previous;
    let carried_over = merged.keys().filter(|id| !current.contains_key(*id)).count();
    if carried_over > 0 {
        debug!("Carrying over {} apps not seen this cycle", carried_over);
    }
    merged.extend(current.iter().map(|(id, record)| (id.clone(), record.clone())));
    ctx.snapshots.save(&merged)?;

    // The timeline archives what was fetched today, not the merged superset.
    ctx.timeline.append_daily_log(ctx.today, &current)?;
    info!("Saved daily log for {}", ctx.today);

    let mut report_sent = false;
    if ctx.today.weekday() == ctx.report_day {
        info!("Report day reached. Generating weekly report...");
        match ctx.report_sink {
            Some(sink) => {
                let recent = ctx.timeline.get_recent_history(REPORT_WINDOW_DAYS);
                sink.deliver(&recent);
                report_sent = true;
            }
            None => warn!("No report sink configured. Skipping weekly report."),
        }
    }

    Ok(CycleOutcome {
        fetched: current.len(),
        changes,
        report_sent,
    })
}
