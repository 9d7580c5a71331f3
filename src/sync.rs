use crate::components::google_calendar::{
    CalendarEvent, CalendarPublisher, ClientSecrets, EventDateTime, InstalledAppFlow, TokenManager,
};
use crate::components::schedule::{filter_week, Prayer, ScheduleFeed, ScheduleRow};
use crate::config::Config;
use crate::error::SyncResult;
use crate::utils::time::{last_sunday, normalize_time};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use tracing::{info, warn};

/// Run one full fetch-filter-synthesize-publish pass
pub async fn run(config: &Config) -> SyncResult<()> {
    let today = Local::now().date_naive();
    let window_start = last_sunday(today);
    info!("Week window starts {}", window_start);

    // One fetch per run, no caching
    let feed = ScheduleFeed::new(config.feed_url.clone());
    let rows = feed.fetch(today.year()).await?;
    info!("Fetched {} schedule rows", rows.len());

    let week_rows = filter_week(&rows, window_start);
    info!("{} rows fall inside the week window", week_rows.len());

    let secrets = ClientSecrets::load(&config.client_secrets_file)?;
    let token_manager = TokenManager::new(config.token_file.as_str(), secrets);
    let flow = InstalledAppFlow::new(config.oauth_listen_port);
    let credential = token_manager.get_credentials(&flow).await?;

    let publisher = CalendarPublisher::new(credential.access_token);
    let events = synthesize_week(&week_rows, config);

    for event in &events {
        info!(
            "Creating event for {} from {} to {}",
            event.summary, event.start.date_time, event.end.date_time
        );
        publisher
            .create_event(&config.google_calendar_id, event)
            .await?;
        info!("Event for {} created successfully", event.summary);
    }

    info!("Created {} events", events.len());

    Ok(())
}

/// Synthesize events for every (row, prayer) pair with a parsable time
pub fn synthesize_week(rows: &[ScheduleRow], config: &Config) -> Vec<CalendarEvent> {
    let mut events = Vec::new();

    for row in rows {
        for prayer in Prayer::ALL {
            let time_str = row.time(prayer);
            let Some(time) = normalize_time(time_str) else {
                warn!("Invalid time format for {}: {}", prayer.summary(), time_str);
                continue;
            };

            match synthesize_event(
                row.date,
                prayer.summary(),
                &time,
                config.duration_min(prayer),
                &config.timezone,
            ) {
                Some(event) => events.push(event),
                None => warn!(
                    "Could not compute timing for {} on {}",
                    prayer.summary(),
                    row.date
                ),
            }
        }
    }

    events
}

/// Build one event from a date, a normalized start time and a duration.
/// The timezone is attached as a label; the end time is naive addition.
pub fn synthesize_event(
    date: NaiveDate,
    summary: &str,
    time: &str,
    duration_min: i64,
    timezone: &str,
) -> Option<CalendarEvent> {
    let start = format!("{}T{}", date.format("%Y-%m-%d"), time);
    let start_dt = NaiveDateTime::parse_from_str(&start, "%Y-%m-%dT%H:%M:%S").ok()?;
    let end_dt = start_dt.checked_add_signed(Duration::minutes(duration_min))?;
    let end = end_dt.format("%Y-%m-%dT%H:%M:%S").to_string();

    Some(CalendarEvent {
        summary: summary.to_string(),
        start: EventDateTime {
            date_time: start,
            time_zone: timezone.to_string(),
        },
        end: EventDateTime {
            date_time: end,
            time_zone: timezone.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            google_calendar_id: "test_calendar_id".to_string(),
            feed_url: "http://localhost/feed.csv".to_string(),
            timezone: "America/Toronto".to_string(),
            client_secrets_file: "credentials.json".to_string(),
            token_file: "token.json".to_string(),
            oauth_listen_port: 8080,
            durations: Config::default_durations(),
        }
    }

    fn row(date: NaiveDate) -> ScheduleRow {
        ScheduleRow {
            date,
            fajr: "4:30 AM".to_string(),
            zuhr: "1:15 PM".to_string(),
            asr: "5:15 PM".to_string(),
            maghrib: "8:45 PM".to_string(),
            isha: "10:30 PM".to_string(),
        }
    }

    #[test]
    fn test_synthesize_event_timing() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let event = synthesize_event(date, "Zuhr Iqama", "13:15:00", 35, "America/Toronto").unwrap();

        assert_eq!(event.summary, "Zuhr Iqama");
        assert_eq!(event.start.date_time, "2024-06-02T13:15:00");
        assert_eq!(event.end.date_time, "2024-06-02T13:50:00");
        assert_eq!(event.start.time_zone, "America/Toronto");
        assert_eq!(event.end.time_zone, "America/Toronto");
    }

    #[test]
    fn test_synthesize_event_crosses_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let event = synthesize_event(date, "Isha Iqama", "23:40:00", 50, "America/Toronto").unwrap();

        assert_eq!(event.start.date_time, "2024-06-02T23:40:00");
        assert_eq!(event.end.date_time, "2024-06-03T00:30:00");
    }

    #[test]
    fn test_synthesize_week_full_row() {
        let config = test_config();
        let rows = vec![row(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap())];

        let events = synthesize_week(&rows, &config);
        assert_eq!(events.len(), 5);

        let summaries: Vec<&str> = events.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(
            summaries,
            vec![
                "Fajr Iqama",
                "Zuhr Iqama",
                "Asr Iqama",
                "Maghrib Iqama",
                "Isha Iqama"
            ]
        );
    }

    #[test]
    fn test_synthesize_week_skips_unparsable_time() {
        let config = test_config();
        let mut bad_row = row(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        bad_row.asr = "garbage".to_string();

        let events = synthesize_week(&[bad_row], &config);
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| e.summary != "Asr Iqama"));
    }

    #[test]
    fn test_synthesize_week_uses_configured_durations() {
        let mut config = test_config();
        config.durations.insert("Fajr Iqama".to_string(), 25);
        let rows = vec![row(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap())];

        let events = synthesize_week(&rows, &config);
        let fajr = events.iter().find(|e| e.summary == "Fajr Iqama").unwrap();
        assert_eq!(fajr.start.date_time, "2024-06-02T04:30:00");
        assert_eq!(fajr.end.date_time, "2024-06-02T04:55:00");
    }
}
