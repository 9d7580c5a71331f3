use iqamasync::components::schedule::Prayer;
use iqamasync::config::Config;
use iqamasync::sync::synthesize_event;
use chrono::NaiveDate;

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

/// Smoke test to verify the built-in duration table
#[test]
fn test_default_durations() {
    let durations = Config::default_durations();

    assert_eq!(durations.len(), 5);
    assert_eq!(durations.get("Fajr Iqama"), Some(&15));
    assert_eq!(durations.get("Zuhr Iqama"), Some(&35));
    assert_eq!(durations.get("Asr Iqama"), Some(&20));
    assert_eq!(durations.get("Maghrib Iqama"), Some(&30));
    assert_eq!(durations.get("Isha Iqama"), Some(&50));
}

/// Smoke test for per-prayer duration lookup with overrides
#[test]
fn test_duration_lookup() {
    let mut config = test_config();
    assert_eq!(config.duration_min(Prayer::Zuhr), 35);

    config.durations.insert("Zuhr Iqama".to_string(), 40);
    assert_eq!(config.duration_min(Prayer::Zuhr), 40);

    // A missing entry falls back to the built-in value
    config.durations.remove("Isha Iqama");
    assert_eq!(config.duration_min(Prayer::Isha), 50);
}

/// Smoke test for prayer ordering and naming
#[test]
fn test_prayer_order_and_names() {
    let names: Vec<&str> = Prayer::ALL.iter().map(|p| p.summary()).collect();
    assert_eq!(
        names,
        vec![
            "Fajr Iqama",
            "Zuhr Iqama",
            "Asr Iqama",
            "Maghrib Iqama",
            "Isha Iqama"
        ]
    );
}

/// Smoke test for event synthesis
#[test]
fn test_event_synthesis() {
    let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
    let event = synthesize_event(date, "Zuhr Iqama", "13:15:00", 35, "America/Toronto").unwrap();

    assert_eq!(event.start.date_time, "2024-06-02T13:15:00");
    assert_eq!(event.end.date_time, "2024-06-02T13:50:00");
}
