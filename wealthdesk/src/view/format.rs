//! Display formatting shared by grids and panels.

use chrono::NaiveDate;

use super::Tone;

/// Placeholder for missing values in read-only panels.
pub const NOT_AVAILABLE: &str = "N/A";

/// Whole rupees with Indian digit grouping, for example `₹12,34,567`.
///
/// # Examples
/// ```
/// use wealthdesk::view::format_inr;
///
/// assert_eq!(format_inr(999), "₹999");
/// assert_eq!(format_inr(100_000), "₹1,00,000");
/// assert_eq!(format_inr(12_345_678), "₹1,23,45,678");
/// ```
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    let split = digits.len().saturating_sub(3);
    let (head, tail) = digits.split_at(split);
    if head.is_empty() {
        return format!("\u{20b9}{tail}");
    }
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();
    format!("\u{20b9}{},{tail}", groups.join(","))
}

/// Long-form date, for example `March 5, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Badge colour for a status word, compared case-insensitively.
pub fn status_tone(status: &str) -> Tone {
    match status.to_ascii_lowercase().as_str() {
        "active" | "verified" | "success" => Tone::Success,
        "pending" | "warning" => Tone::Warning,
        "inactive" | "cancelled" | "blocked" | "error" => Tone::Error,
        "completed" | "info" => Tone::Info,
        _ => Tone::Default,
    }
}

/// `value`, or [`NOT_AVAILABLE`] when it is missing or blank.
pub fn or_not_available(value: Option<impl Into<String>>) -> String {
    value
        .map(Into::into)
        .filter(|text: &String| !text.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}
