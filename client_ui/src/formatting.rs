use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::warn;

/// Lenient date-time parsing of the backend's `submittedAt` text: RFC 3339
/// first, then a naive date-time, then a plain date.
pub fn parse_submitted_at(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.with_timezone(&Utc));
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&datetime));
    }
    NaiveDate::parse_from_str(value, "%F")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| Utc.from_utc_datetime(&datetime))
}

/// Submission date as shown on review cards; unparseable text is shown
/// as-is.
pub fn submitted_at_str(value: &str) -> String {
    match parse_submitted_at(value) {
        Some(datetime) => datetime.format("%B %-d, %Y %H:%M").to_string(),
        None => value.to_owned(),
    }
}

/// Star glyphs for a review score. Scores outside [1, 5] are a data-quality
/// problem; they are clamped and logged instead of producing a negative
/// repeat count.
pub fn rating_stars(score: i32) -> String {
    let clamped = score.clamp(0, 5);
    if clamped != score {
        warn!("review score {score} outside [1, 5]");
    }
    let filled = clamped as usize;
    "★".repeat(filled) + &"☆".repeat(5 - filled)
}
