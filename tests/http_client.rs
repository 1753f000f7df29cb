//! HTTP round trips against a local mock server. No API key or network needed.
//!
//! The client is blocking, so every call runs on `spawn_blocking`.

use std::time::Duration;

use rescuetime::{AnalyticDataQuery, ClientConfig, Error, RescueTime, RowTimestamp};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, key: &str) -> ClientConfig {
    ClientConfig::new(key)
        .with_base_urls(
            format!("{}/anapi/data", server.uri()),
            format!("{}/anapi/daily_summary_feed", server.uri()),
        )
        .with_timeout(Duration::from_secs(5))
}

async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.expect("blocking task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn analytic_data_sends_filters_key_and_format() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anapi/data"))
        .and(query_param("key", "B63test"))
        .and(query_param("format", "json"))
        .and(query_param("perspective", "interval"))
        .and(query_param("resolution_time", "hour"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "notes": "data is an array of arrays (rows), column names for rows in row_headers",
            "row_headers": ["Date", "Time Spent (seconds)", "Number of People", "Activity", "Category", "Productivity"],
            "rows": [
                ["2023-05-01T10:00:00", 1800, 1, "vim", "Editing & IDEs", 2],
                ["2023-05-01T11:00:00", 600, 1, "youtube.com", "Video", -2]
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, "B63test");
    let data = blocking(move || {
        let query = AnalyticDataQuery::new()
            .perspective("interval")
            .resolution_time("hour");
        RescueTime::new(config).get_analytic_data(Some("America/New_York"), &query)
    })
    .await
    .unwrap();

    assert_eq!(data.rows.len(), 2);
    let first = &data.rows[0];
    assert!(matches!(first.date, Some(RowTimestamp::Zoned(_))));
    assert_eq!(
        first.date.unwrap().timezone(),
        Some(chrono_tz::America::New_York)
    );
    assert_eq!(first.time_spent_seconds, Some(1800));
    assert_eq!(first.activity.as_deref(), Some("vim"));
    assert_eq!(data.rows[1].productivity, Some(-2));
    assert!(first.rank.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn daily_summary_decodes_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anapi/daily_summary_feed"))
        .and(query_param("key", "B63test"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1682899200,
                "date": "2023-05-01",
                "productivity_pulse": 77,
                "software_development_hours": 4.25,
                "software_development_duration_formatted": "4h 15m",
                "total_hours": 7.5
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, "B63test");
    let summaries = blocking(move || RescueTime::new(config).get_daily_summary())
        .await
        .unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].productivity_pulse, 77.0);
    assert_eq!(summaries[0].software_development_duration_formatted, "4h 15m");
}

#[tokio::test(flavor = "multi_thread")]
async fn http_error_status_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = config_for(&server, "B63test");
    let err = blocking(move || RescueTime::new(config).get_daily_summary())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(err.is_retryable());
}

#[tokio::test(flavor = "multi_thread")]
async fn service_error_body_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anapi/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "# key not found",
            "messages": "key not found"
        })))
        .mount(&server)
        .await;

    let config = config_for(&server, "revoked");
    let err = blocking(move || {
        RescueTime::new(config).get_analytic_data(None, &AnalyticDataQuery::new())
    })
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Api { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_key_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server, "");
    let err = blocking(move || RescueTime::new(config).get_daily_summary())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingCredential));
}
