use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::json;
use tracing::{error, info};

use crate::models::{PriceChange, Snapshot};
use crate::report::format_weekly_report;

use super::{format_alert, Notifier, ReportSink};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Payload dialect of the destination, sniffed from the URL. The payload
/// shaping for each destination lives here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookFlavor {
    /// Feishu/Lark bots: `{"msg_type": "text", "content": {"text": ...}}`
    Feishu,
    /// Slack incoming webhooks: `{"text": ...}`
    Slack,
    /// DingTalk bots: `{"msgtype": "text", "text": {"content": ...}}`
    DingTalk,
    /// Anything else gets the Slack-style `{"text": ...}` fallback.
    Generic,
}

impl WebhookFlavor {
    pub fn from_url(url: &str) -> Self {
        if url.contains("feishu") || url.contains("lark") {
            WebhookFlavor::Feishu
        } else if url.contains("slack") {
            WebhookFlavor::Slack
        } else if url.contains("dingtalk") {
            WebhookFlavor::DingTalk
        } else {
            WebhookFlavor::Generic
        }
    }

    fn payload(&self, text: &str) -> serde_json::Value {
        match self {
            WebhookFlavor::Feishu => json!({
                "msg_type": "text",
                "content": { "text": text }
            }),
            WebhookFlavor::DingTalk => json!({
                "msgtype": "text",
                "text": { "content": text }
            }),
            WebhookFlavor::Slack | WebhookFlavor::Generic => json!({ "text": text }),
        }
    }
}

/// Pushes plain-text messages to a single webhook URL.
pub struct WebhookNotifier {
    url: String,
    flavor: WebhookFlavor,
    client: reqwest::blocking::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let flavor = WebhookFlavor::from_url(&url);
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            url,
            flavor,
            client,
        })
    }

    fn post_text(&self, text: &str, what: &str) {
        let payload = self.flavor.payload(text);

        match self.client.post(&self.url).json(&payload).send() {
            Ok(response) if response.status().is_client_error() || response.status().is_server_error() => {
                let status = response.status();
                let body = response.text().unwrap_or_default();
                error!("Webhook {} failed with status {}: {}", what, status, body);
            }
            Ok(_) => info!("Webhook {} sent successfully.", what),
            Err(e) => error!("Failed to send webhook {}: {}", what, e),
        }
    }
}

impl Notifier for WebhookNotifier {
    fn notify(&self, changes: &[PriceChange]) {
        if changes.is_empty() {
            return;
        }
        self.post_text(&format_alert(changes), "notification");
    }
}

impl ReportSink for WebhookNotifier {
    fn deliver(&self, history: &[(NaiveDate, Snapshot)]) {
        self.post_text(&format_weekly_report(history), "weekly report");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flavor_detection() {
        assert_eq!(
            WebhookFlavor::from_url("https://open.feishu.cn/open-apis/bot/v2/hook/abc"),
            WebhookFlavor::Feishu
        );
        assert_eq!(
            WebhookFlavor::from_url("https://open.larksuite.com/open-apis/bot/v2/hook/abc"),
            WebhookFlavor::Feishu
        );
        assert_eq!(
            WebhookFlavor::from_url("https://hooks.slack.com/services/T0/B0/x"),
            WebhookFlavor::Slack
        );
        assert_eq!(
            WebhookFlavor::from_url("https://oapi.dingtalk.com/robot/send?access_token=t"),
            WebhookFlavor::DingTalk
        );
        assert_eq!(
            WebhookFlavor::from_url("https://example.com/hook"),
            WebhookFlavor::Generic
        );
    }

    #[test]
    fn test_payload_shapes() {
        assert_eq!(
            WebhookFlavor::Feishu.payload("hi"),
            json!({"msg_type": "text", "content": {"text": "hi"}})
        );
        assert_eq!(
            WebhookFlavor::DingTalk.payload("hi"),
            json!({"msgtype": "text", "text": {"content": "hi"}})
        );
        assert_eq!(WebhookFlavor::Slack.payload("hi"), json!({"text": "hi"}));
        assert_eq!(WebhookFlavor::Generic.payload("hi"), json!({"text": "hi"}));
    }
}
