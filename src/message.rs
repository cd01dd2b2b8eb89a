use tracing::warn;

use crate::config::PROMO_LINK;
use crate::countdown;
use crate::models::{Attachment, BookRecord, NotificationPayload};

pub const HEADLINE: &str = ":tada: A new Packt book is available for free!";
pub const FALLBACK: &str = "A new Packt book is available for free!";
pub const ACCENT_COLOR: &str = "#FD6A02";

/// Build the Slack message for a book. Missing fields are left out of the
/// attachment rather than replaced by placeholders.
pub fn compose(book: &BookRecord) -> NotificationPayload {
    let remaining = book.countdown.and_then(|ends| {
        countdown::format_remaining(ends, None)
            .map_err(|err| warn!(%err, "leaving remaining time out of the message"))
            .ok()
    });

    let attachment = Attachment {
        fallback: FALLBACK.to_string(),
        color: ACCENT_COLOR.to_string(),
        title: book.title.clone(),
        title_link: PROMO_LINK.to_string(),
        text: body(book.description.as_deref(), remaining.as_deref()),
        thumb_url: book.image_url.clone(),
    };

    NotificationPayload {
        text: HEADLINE.to_string(),
        attachments: vec![attachment],
    }
}

fn body(description: Option<&str>, remaining: Option<&str>) -> String {
    match (description, remaining) {
        (Some(desc), Some(left)) => format!("{desc}.\n \n{left}"),
        (Some(desc), None) => desc.to_string(),
        (None, Some(left)) => left.to_string(),
        (None, None) => String::new(),
    }
}
