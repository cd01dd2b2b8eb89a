use chrono::{DateTime, Local, NaiveDateTime};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use crate::errors::ScrapeError;
use crate::models::BookRecord;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Read the deal-of-the-day block. A page without the block yields an empty
/// record; each field is looked up independently and a missing element only
/// leaves that field unset.
pub fn parse_book(doc: &Html, verbose: bool) -> BookRecord {
    let mut book = BookRecord::default();

    match doc.select(&selector("div#deal-of-the-day")).next() {
        Some(deal) => {
            book.title = first(deal, "div.dotd-title").map(text_of);
            if book.title.is_none() {
                warn!("deal container has no title element");
            }

            book.image_url = image_url(deal);

            if let Some(summary) = first(deal, "div.dotd-main-book-summary") {
                book.description = description(summary);
                book.countdown = countdown(summary);
            } else {
                warn!("deal container has no summary element");
            }
        }
        None => info!("no deal of the day on the page"),
    }

    if verbose {
        info!(
            title = ?book.title,
            description = ?book.description,
            image_url = ?book.image_url,
            countdown = ?book.countdown,
            "extracted book"
        );
    } else {
        debug!(?book, "extracted book");
    }

    book
}

pub fn parse_book_html(html: &str, verbose: bool) -> BookRecord {
    parse_book(&Html::parse_document(html), verbose)
}

fn first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    scope.select(&selector(css)).next()
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn image_url(deal: ElementRef<'_>) -> Option<String> {
    let Some(container) = first(deal, "div.dotd-main-book-image") else {
        warn!("deal container has no image container");
        return None;
    };
    let src = first(container, "img.bookimage")
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string);
    if src.is_none() {
        warn!("image container has no book image");
    }
    src
}

/// The description is the third `div` below the summary, in document order.
fn description(summary: ElementRef<'_>) -> Option<String> {
    let desc = summary
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "div")
        .nth(2)
        .map(text_of);
    if desc.is_none() {
        warn!("summary has no description element");
    }
    desc
}

fn countdown(summary: ElementRef<'_>) -> Option<NaiveDateTime> {
    let Some(raw) = first(summary, "div.eighteen-days-countdown-bar")
        .and_then(|bar| first(bar, "span"))
        .and_then(|span| span.value().attr("data-countdown-to"))
    else {
        warn!("summary has no countdown timestamp");
        return None;
    };

    match parse_countdown(raw) {
        Ok(ends) => Some(ends),
        Err(err) => {
            warn!(%err, "ignoring countdown");
            None
        }
    }
}

/// Convert a Unix epoch (seconds, possibly fractional) to local wall-clock
/// time.
pub fn parse_countdown(raw: &str) -> Result<NaiveDateTime, ScrapeError> {
    let epoch: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ScrapeError::Parse(format!("countdown {raw:?} is not a number")))?;
    if !epoch.is_finite() {
        return Err(ScrapeError::Parse(format!("countdown {raw:?} is not finite")));
    }

    let secs = epoch.floor();
    let nanos = ((epoch - secs) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
        .map(|utc| utc.with_timezone(&Local).naive_local())
        .ok_or_else(|| ScrapeError::Parse(format!("countdown {raw:?} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEAL_PAGE: &str = r#"
        <html><body>
        <div id="deal-of-the-day">
          <div class="dotd-main-book-image">
            <a href="/book"><img class="bookimage imagecache" src="//cdn.example.com/cover.png"></a>
          </div>
          <div class="dotd-main-book-summary">
            <div class="dotd-title"><h2>
                Mastering Rust
            </h2></div>
            <div><br></div>
            <div>
                Learn ownership, traits and async the hard way
            </div>
            <div class="eighteen-days-countdown-bar">
              <span class="packt-js-countdown" data-countdown-to="1546300800"></span>
            </div>
          </div>
        </div>
        </body></html>
    "#;

    #[test]
    fn reads_every_field_of_the_deal() {
        let book = parse_book_html(DEAL_PAGE, false);
        assert_eq!(book.title.as_deref(), Some("Mastering Rust"));
        assert_eq!(book.image_url.as_deref(), Some("//cdn.example.com/cover.png"));
        assert_eq!(
            book.description.as_deref(),
            Some("Learn ownership, traits and async the hard way")
        );
        assert_eq!(book.countdown, Some(parse_countdown("1546300800").unwrap()));
    }

    #[test]
    fn page_without_deal_gives_empty_record() {
        let book = parse_book_html("<html><body><p>Come back later</p></body></html>", true);
        assert_eq!(book, BookRecord::default());
    }

    #[test]
    fn missing_image_container_keeps_title() {
        let html = r#"<div id="deal-of-the-day"><div class="dotd-title"> Go in Action </div></div>"#;
        let book = parse_book_html(html, false);
        assert_eq!(book.title.as_deref(), Some("Go in Action"));
        assert_eq!(book.image_url, None);
        assert_eq!(book.description, None);
        assert_eq!(book.countdown, None);
    }

    #[test]
    fn missing_countdown_does_not_fail() {
        let html = r#"
            <div id="deal-of-the-day">
              <div class="dotd-main-book-summary">
                <div class="dotd-title">Title</div><div></div><div>Desc</div>
              </div>
            </div>"#;
        let book = parse_book_html(html, false);
        assert_eq!(book.description.as_deref(), Some("Desc"));
        assert_eq!(book.countdown, None);
    }

    #[test]
    fn malformed_countdown_is_dropped() {
        let html = DEAL_PAGE.replace("1546300800", "soon");
        let book = parse_book_html(&html, false);
        assert_eq!(book.title.as_deref(), Some("Mastering Rust"));
        assert_eq!(book.countdown, None);
    }

    #[test]
    fn countdown_accepts_fractional_epoch() {
        let whole = parse_countdown("1546300800").unwrap();
        let frac = parse_countdown("1546300800.5").unwrap();
        assert_eq!((frac - whole).num_milliseconds(), 500);
        assert!(matches!(parse_countdown("NaN"), Err(ScrapeError::Parse(_))));
        assert!(matches!(parse_countdown(""), Err(ScrapeError::Parse(_))));
    }
}
