use anyhow::Result;
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use chrono_english::{parse_date_string, Dialect};

/// Parse a calendar date from `%Y-%m-%d` or natural language
/// ("today", "tomorrow", "next friday").
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d") {
        return Ok(date);
    }
    parse_date_string(date_str, Local::now(), Dialect::Us)
        .map(|dt| dt.date_naive())
        .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {}", date_str, e))
}

/// Parse a time of day like "9:00", "2:30 PM", "9pm", "noon", "midnight"
pub fn parse_time(time_str: &str) -> Result<NaiveTime> {
    let input = time_str.trim().to_lowercase();

    // Handle special times first
    match input.as_str() {
        "noon" | "12pm" | "12:00pm" => return Ok(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
        "midnight" | "12am" | "12:00am" => return Ok(NaiveTime::from_hms_opt(0, 0, 0).unwrap()),
        _ => {}
    }

    let formats = [
        "%H:%M:%S",    // 14:30:00
        "%H:%M",       // 14:30
        "%I:%M:%S %p", // 9:00:00 AM
        "%I:%M %p",    // 9:00 AM
        "%I%p",        // 9AM, 9PM
        "%I %p",       // 9 AM, 9 PM
        "%H",          // 14 (hour only)
    ];

    for format in &formats {
        if let Ok(time) = NaiveTime::parse_from_str(time_str.trim(), format) {
            return Ok(time);
        }
    }
    for format in &formats {
        if let Ok(time) = NaiveTime::parse_from_str(&input, format) {
            return Ok(time);
        }
    }

    Err(anyhow::anyhow!(
        "Invalid time format: '{}'\n\nSupported formats:\n  • 24-hour: '14:30', '09:00'\n  • 12-hour: '2:30 PM', '9:00 AM'\n  • Compact: '2pm', '9am'\n  • Special: 'noon', 'midnight'",
        time_str
    ))
}

/// Default event end when only a start was given; wraps past midnight.
pub fn one_hour_after(start: NaiveTime) -> NaiveTime {
    start.overflowing_add_signed(Duration::hours(1)).0
}
