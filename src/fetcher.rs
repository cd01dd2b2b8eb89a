use std::time::Duration;

use anyhow::{Context as _, Result};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use scraper::Html;
use tracing::{info, warn};

use crate::config::USER_AGENT;
use crate::errors::ScrapeError;

// Keep failure logs readable when the server answers with a full error page.
const BODY_EXCERPT_LEN: usize = 2_000;

pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("build HTTP client")
}

/// GET `url` and return the body. Anything but `200 OK` is a fetch failure;
/// the body is logged so blocked requests can be diagnosed.
pub fn fetch_html(client: &Client, url: &str) -> Result<String> {
    info!(%url, "fetching offer page");
    let resp = client.get(url).send().with_context(|| ScrapeError::Fetch {
        url: url.to_owned(),
        status: None,
    })?;

    let status = resp.status();
    let body = resp.text().with_context(|| ScrapeError::Fetch {
        url: url.to_owned(),
        status: Some(status),
    })?;

    if status != StatusCode::OK {
        warn!(%status, body = %excerpt(&body), "stopped processing: status is not 200");
        return Err(ScrapeError::Fetch {
            url: url.to_owned(),
            status: Some(status),
        }
        .into());
    }

    info!(%status, bytes = body.len(), "offer page fetched");
    Ok(body)
}

pub fn fetch_document(client: &Client, url: &str) -> Result<Html> {
    let html = fetch_html(client, url)?;
    Ok(Html::parse_document(&html))
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
