use super::models::ScheduleRow;
use crate::error::{feed_error, SyncResult};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

/// Raw CSV record as published by the feed
#[derive(Debug, Deserialize)]
struct FeedRecord {
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Day")]
    day: u32,
    #[serde(rename = "Fajr Iqama")]
    fajr: String,
    #[serde(rename = "Zuhr Iqama")]
    zuhr: String,
    #[serde(rename = "Asr Iqama")]
    asr: String,
    #[serde(rename = "Maghrib Iqama")]
    maghrib: String,
    #[serde(rename = "Isha Iqama")]
    isha: String,
}

/// Remote source of the published prayer-time table
pub struct ScheduleFeed {
    client: Client,
    url: String,
}

impl ScheduleFeed {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    /// Fetch the full published table, dating rows with the given year
    pub async fn fetch(&self, year: i32) -> SyncResult<Vec<ScheduleRow>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| feed_error(&format!("Failed to fetch schedule: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(feed_error(&format!(
                "Failed to fetch schedule: HTTP {} - {}",
                status, error_body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| feed_error(&format!("Failed to read schedule response: {}", e)))?;

        parse_feed(&body, year)
    }
}

/// Parse the CSV table into dated rows, preserving feed order
pub fn parse_feed(csv_text: &str, year: i32) -> SyncResult<Vec<ScheduleRow>> {
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let mut rows = Vec::new();

    for record in reader.deserialize::<FeedRecord>() {
        let record = record?;
        let date = row_date(&record.month, record.day, year)?;

        rows.push(ScheduleRow {
            date,
            fajr: record.fajr,
            zuhr: record.zuhr,
            asr: record.asr,
            maghrib: record.maghrib,
            isha: record.isha,
        });
    }

    Ok(rows)
}

/// Combine the feed's month/day fields with a year the feed does not carry
fn row_date(month: &str, day: u32, year: i32) -> SyncResult<NaiveDate> {
    let text = format!("{} {}, {}", month, day, year);
    NaiveDate::parse_from_str(&text, "%B %d, %Y")
        .map_err(|_| feed_error(&format!("Invalid schedule date: {}", text)))
}
