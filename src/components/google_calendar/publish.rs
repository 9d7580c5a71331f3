use super::models::CalendarEvent;
use crate::error::{google_calendar_error, SyncResult};
use reqwest::Client;
use url::Url;

/// Submits synthesized events to the Google Calendar API
pub struct CalendarPublisher {
    client: Client,
    access_token: String,
}

impl CalendarPublisher {
    pub fn new(access_token: String) -> Self {
        Self {
            client: Client::new(),
            access_token,
        }
    }

    /// Insert one event into the calendar; returns the created event id
    pub async fn create_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> SyncResult<String> {
        let url_str = format!(
            "https://www.googleapis.com/calendar/v3/calendars/{}/events",
            calendar_id
        );

        let url = Url::parse(&url_str)
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;

        // Make API request
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .json(event)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to create event: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to create event: HTTP {} - {}",
                status, error_body
            )));
        }

        let response_data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse event response: {}", e)))?;

        let id = response_data
            .get("id")
            .and_then(|id| id.as_str())
            .ok_or_else(|| google_calendar_error("No id in event response"))?
            .to_string();

        Ok(id)
    }
}
