use chrono::{Datelike, Local, Months, NaiveDateTime};

use crate::errors::ScrapeError;

pub const EXPIRED: &str = "This offer has already expired.";

/// Calendar difference between two instants: whole months first (day of
/// month clamped to the month's end), then the remainder as days and clock
/// time. Near month boundaries this differs from a flat duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDiff {
    pub years: u32,
    pub months: u32,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CalendarDiff {
    /// `ends` must be after `now`.
    pub fn between(ends: NaiveDateTime, now: NaiveDateTime) -> Result<Self, ScrapeError> {
        if ends <= now {
            return Err(ScrapeError::Format(format!("{ends} is not after {now}")));
        }

        let span = (ends.year() - now.year()) * 12 + ends.month() as i32 - now.month() as i32;
        let mut months = u32::try_from(span.max(0))
            .map_err(|_| ScrapeError::Format(format!("month span {span} out of range")))?;
        let mut anchor = add_months(now, months)?;
        while anchor > ends {
            months -= 1;
            anchor = add_months(now, months)?;
        }

        let rest = (ends - anchor).num_seconds();
        Ok(Self {
            years: months / 12,
            months: months % 12,
            days: rest / 86_400,
            hours: rest % 86_400 / 3_600,
            minutes: rest % 3_600 / 60,
            seconds: rest % 60,
        })
    }
}

fn add_months(at: NaiveDateTime, months: u32) -> Result<NaiveDateTime, ScrapeError> {
    at.checked_add_months(Months::new(months))
        .ok_or_else(|| ScrapeError::Format(format!("{at} + {months} months overflows")))
}

/// Sentence telling how long the offer stays open. `now` defaults to the
/// current local time. Offers that already ended get [`EXPIRED`].
pub fn format_remaining(
    ends: NaiveDateTime,
    now: Option<NaiveDateTime>,
) -> Result<String, ScrapeError> {
    let now = now.unwrap_or_else(|| Local::now().naive_local());
    if ends <= now {
        return Ok(EXPIRED.to_string());
    }

    let diff = CalendarDiff::between(ends, now)?;
    let mut left = String::new();
    match diff.years {
        0 => {}
        1 => left.push_str("1 year, "),
        n => left.push_str(&format!("{n} years, ")),
    }
    match diff.months {
        0 => {}
        1 => left.push_str("1 month, "),
        n => left.push_str(&format!("{n} months, ")),
    }
    if diff.days != 0 {
        left.push_str(&format!("{} days, ", diff.days));
    }
    left.push_str(&format!(
        "{} hours, {} minutes and {} seconds",
        diff.hours, diff.minutes, diff.seconds
    ));

    Ok(format!("You have {left} left before this offer expires."))
}
