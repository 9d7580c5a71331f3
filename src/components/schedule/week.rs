use super::models::ScheduleRow;
use chrono::{Duration, NaiveDate};

/// Rows dated inside the inclusive window [start, start + 7 days]
pub fn filter_week(rows: &[ScheduleRow], window_start: NaiveDate) -> Vec<ScheduleRow> {
    let window_end = window_start + Duration::days(7);

    rows.iter()
        .filter(|row| row.date >= window_start && row.date <= window_end)
        .cloned()
        .collect()
}
