//! Display formatting for report and list projections.
//!
//! All formatting is locale-independent: English month abbreviations, `,`
//! thousands separator, `$` currency symbol, UTC for instants.

use crate::model::comment::Comment;
use chrono::{DateTime, NaiveDate, Utc};

const DATE_DISPLAY_FORMAT: &str = "%b %-d, %Y";
const TIMESTAMP_DISPLAY_FORMAT: &str = "%b %-d, %Y %H:%M";

/// Formats a calendar date as `MMM d, yyyy`, e.g. `Mar 1, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}

/// Formats an instant as `MMM d, yyyy HH:mm` (24-hour, UTC).
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_DISPLAY_FORMAT).to_string()
}

/// Formats `start - end` using `format_date` for both ends.
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", format_date(start), format_date(end))
}

/// Formats a non-negative amount as `$` plus grouped thousands.
///
/// Rounds to cents; the fraction is printed only when non-zero, with
/// trailing zeros trimmed (`1234.5` -> `$1,234.5`). Exact for every amount
/// `Project::validate()` accepts.
pub fn format_budget(amount: f64) -> String {
    // Saturating cast; only reachable beyond `MAX_BUDGET`.
    let cents = (amount.max(0.0) * 100.0).round() as u128;
    let whole = group_thousands(cents / 100);
    match cents % 100 {
        0 => format!("${whole}"),
        fraction if fraction % 10 == 0 => format!("${whole}.{}", fraction / 10),
        fraction => format!("${whole}.{fraction:02}"),
    }
}

/// Formats a completion percentage as `N%`.
pub fn format_progress(progress: u8) -> String {
    format!("{progress}%")
}

/// Returns `Attachments: a, b` for a comment, or `None` without attachments.
pub fn attachments_line(comment: &Comment) -> Option<String> {
    if comment.attachments.is_empty() {
        return None;
    }
    let names = comment
        .attachments
        .iter()
        .map(|attachment| attachment.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!("Attachments: {names}"))
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
