pub mod config;
pub mod countdown;
pub mod errors;
pub mod fetcher;
pub mod logging;
pub mod message;
pub mod models;
pub mod notifier;
pub mod parser;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::models::NotificationPayload;
use crate::notifier::SlackClient;

#[derive(Debug)]
pub enum Outcome {
    /// No deal on the page today; nothing was posted.
    NoDeal,
    /// Payload built but not sent (`--dry-run`).
    DryRun(NotificationPayload),
    /// Slack accepted the message.
    Posted,
    /// Empty text or channel; Slack was not called.
    Skipped,
}

/// One pass: fetch the offer page, extract the book, compose and post.
pub fn run(config: &Config) -> Result<Outcome> {
    let http = fetcher::build_client(config.timeout)?;
    let doc = fetcher::fetch_document(&http, &config.url)?;
    let book = parser::parse_book(&doc, config.verbose);

    if book.title.is_none() {
        info!("no free book on offer, nothing to post");
        return Ok(Outcome::NoDeal);
    }

    let payload = message::compose(&book);
    if config.dry_run {
        return Ok(Outcome::DryRun(payload));
    }

    let token = config.token.clone().ok_or_else(|| {
        errors::ScrapeError::Config(format!("{} is not set", crate::config::TOKEN_ENV))
    })?;
    let slack = SlackClient::new(http, &config.slack_api, token);
    if slack.notify(&payload.text, &config.channel, &payload.attachments)? {
        Ok(Outcome::Posted)
    } else {
        Ok(Outcome::Skipped)
    }
}
