use serde::{Deserialize, Serialize};

/// Event start or end as sent to the calendar API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDateTime {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

/// Calendar event payload for events.insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_api_field_names() {
        let event = CalendarEvent {
            summary: "Fajr Iqama".to_string(),
            start: EventDateTime {
                date_time: "2024-06-02T04:30:00".to_string(),
                time_zone: "America/Toronto".to_string(),
            },
            end: EventDateTime {
                date_time: "2024-06-02T04:45:00".to_string(),
                time_zone: "America/Toronto".to_string(),
            },
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["start"]["dateTime"], "2024-06-02T04:30:00");
        assert_eq!(json["end"]["timeZone"], "America/Toronto");
        assert_eq!(json["summary"], "Fajr Iqama");
    }
}
