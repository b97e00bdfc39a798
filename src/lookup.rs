//! Batch price lookup against the iTunes lookup API.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::error;

const ITUNES_BASE_URL: &str = "https://itunes.apple.com";

/// Per-request timeout, matching the webhook side.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Batch price-fetch seam. One call per country with that country's ids.
///
/// Implementations absorb transport failures: a whole-batch failure comes
/// back as an empty map, never as an error. The orchestrator handles
/// per-id gaps itself.
pub trait PriceLookup {
    fn fetch(&self, app_ids: &[String], country: &str) -> HashMap<String, FetchedApp>;
}

/// Raw attributes for one app as returned by the lookup API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedApp {
    pub track_id: Option<u64>,
    pub track_name: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub track_view_url: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    results: Vec<FetchedApp>,
}

/// iTunes lookup API client (`GET /lookup?id=...&country=...`).
pub struct ItunesLookup {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ItunesLookup {
    pub fn new() -> Result<Self> {
        Self::with_base_url(ITUNES_BASE_URL)
    }

    /// Point the client at a different endpoint (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn request(&self, app_ids: &[String], country: &str) -> Result<HashMap<String, FetchedApp>, reqwest::Error> {
        let response: LookupResponse = self
            .client
            .get(format!("{}/lookup", self.base_url))
            .query(&[("id", app_ids.join(",").as_str()), ("country", country)])
            .send()?
            .error_for_status()?
            .json()?;

        Ok(index_by_track_id(response))
    }
}

impl PriceLookup for ItunesLookup {
    fn fetch(&self, app_ids: &[String], country: &str) -> HashMap<String, FetchedApp> {
        if app_ids.is_empty() {
            return HashMap::new();
        }

        match self.request(app_ids, country) {
            Ok(results) => results,
            Err(e) => {
                error!("Error fetching data from App Store API: {}", e);
                HashMap::new()
            }
        }
    }
}

/// Key results by `trackId` rendered as a string; entries without one (the
/// API mixes in artist records for some lookups) are dropped.
fn index_by_track_id(response: LookupResponse) -> HashMap<String, FetchedApp> {
    response
        .results
        .into_iter()
        .filter_map(|app| app.track_id.map(|id| (id.to_string(), app)))
        .collect()
}
