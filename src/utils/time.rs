use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

/// Time formats accepted by the feed's free-form time columns
const TIME_FORMATS: &[&str] = &[
    "%I:%M:%S %p",
    "%I:%M %p",
    "%I:%M:%S%p",
    "%I:%M%p",
    "%H:%M:%S",
    "%H:%M",
];

/// Anchor date of the last completed week relative to a reference date
pub fn last_sunday(reference_date: NaiveDate) -> NaiveDate {
    // A Sunday reference anchors to the day before it
    if reference_date.weekday() == Weekday::Sun {
        return reference_date - Duration::days(1);
    }

    let days_back = i64::from(reference_date.weekday().num_days_from_monday()) + 2;
    reference_date - Duration::days(days_back)
}

/// Normalize a free-form time string to zero-padded HH:MM:SS
pub fn normalize_time(time_str: &str) -> Option<String> {
    // Remove any extra whitespace
    let time_str = time_str.trim();
    if time_str.is_empty() {
        return None;
    }

    for format in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(time_str, format) {
            return Some(time.format("%H:%M:%S").to_string());
        }
    }

    None
}
