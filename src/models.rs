use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Fields read from the deal-of-the-day block. `None` means the element was
/// not on the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookRecord {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Offer end, local wall-clock time.
    pub countdown: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub fallback: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub title_link: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub text: String,
    pub attachments: Vec<Attachment>,
}
