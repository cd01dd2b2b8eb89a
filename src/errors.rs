use std::fmt;

use reqwest::StatusCode;

/// Failure kinds of a notifier run. Attached to `anyhow` errors as the
/// error itself or as context, so callers can recover the kind with
/// `downcast_ref`.
#[derive(Debug)]
pub enum ScrapeError {
    Fetch { url: String, status: Option<StatusCode> },
    Parse(String),
    Format(String),
    Notification(String),
    Config(String),
}

impl ScrapeError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ScrapeError::Fetch { .. } => 2,
            ScrapeError::Notification(_) => 3,
            ScrapeError::Config(_) => 4,
            ScrapeError::Parse(_) | ScrapeError::Format(_) => 1,
        }
    }
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::Fetch { url, status: Some(status) } => {
                write!(f, "fetch {url}: unexpected status {status}")
            }
            ScrapeError::Fetch { url, status: None } => write!(f, "fetch {url}"),
            ScrapeError::Parse(msg) => write!(f, "parse: {msg}"),
            ScrapeError::Format(msg) => write!(f, "format remaining time: {msg}"),
            ScrapeError::Notification(msg) => write!(f, "notify: {msg}"),
            ScrapeError::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for ScrapeError {}

/// Exit code for a failed run; `1` when no kind is attached.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ScrapeError>()
        .map(ScrapeError::exit_code)
        .unwrap_or(1)
}
