use anyhow::Result;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::errors::ScrapeError;
use crate::models::Attachment;

/// Bot-token client for the Slack Web API.
pub struct SlackClient {
    http: Client,
    api_base: String,
    token: String,
}

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl SlackClient {
    pub fn new(http: Client, api_base: &str, token: String) -> Self {
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Post `text` with `attachments` to `channel` via `chat.postMessage`.
    /// Returns `false` without calling Slack when `text` or `channel` is empty.
    pub fn notify(&self, text: &str, channel: &str, attachments: &[Attachment]) -> Result<bool> {
        if text.is_empty() || channel.is_empty() {
            debug!("empty text or channel, not posting");
            return Ok(false);
        }

        let endpoint = format!("{}/chat.postMessage", self.api_base);
        let body = serde_json::json!({
            "channel": channel,
            "text": text,
            "attachments": attachments,
        });

        info!(%channel, "posting to Slack");
        let resp = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .map_err(|err| ScrapeError::Notification(format!("POST {endpoint}: {err}")))?;

        let status = resp.status();
        let raw = resp
            .text()
            .map_err(|err| ScrapeError::Notification(format!("read Slack response: {err}")))?;
        if !status.is_success() {
            warn!(%status, body = %raw, "Slack returned an error status");
            return Err(ScrapeError::Notification(format!("HTTP {status}: {raw}")).into());
        }

        let reply: ApiResponse = serde_json::from_str(&raw)
            .map_err(|err| ScrapeError::Notification(format!("parse Slack response: {err}")))?;
        if !reply.ok {
            let reason = reply.error.unwrap_or_else(|| "unknown error".to_string());
            return Err(ScrapeError::Notification(format!("chat.postMessage: {reason}")).into());
        }

        info!("Slack message sent");
        Ok(true)
    }
}
