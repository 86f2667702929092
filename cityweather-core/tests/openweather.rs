use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use cityweather_core::{
    FetchError, HomeView, ObserverZone, OpenWeatherProvider, WeatherProvider, date_report,
    home_report,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn entry(dt: i64, temp: f64, icon: &str) -> serde_json::Value {
    json!({
        "dt": dt,
        "main": {"temp": temp, "feels_like": temp, "humidity": 55},
        "weather": [{"id": 800, "main": "Clear", "description": format!("sky {icon}"), "icon": icon}],
        "dt_txt": "ignored"
    })
}

/// Forecast for a city at UTC+0: 2024-03-10 00:00 .. 2024-03-14 21:00, every 3h.
fn forecast_body() -> serde_json::Value {
    let start = 1_710_028_800; // 2024-03-10T00:00:00Z
    let list: Vec<_> = (0..40)
        .map(|i| entry(start + i * 3 * 3600, i as f64, if i % 2 == 0 { "01d" } else { "02d" }))
        .collect();
    json!({
        "cod": "200",
        "cnt": list.len(),
        "list": list,
        "city": {"name": "London", "country": "GB", "timezone": 0}
    })
}

fn current_body() -> serde_json::Value {
    json!({
        "name": "London",
        "dt": 1_710_064_800,
        "main": {"temp": 9.5, "feels_like": 7.0, "humidity": 81},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "wind": {"speed": 4.1}
    })
}

async fn setup_mock_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("q", "Atlantis"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&server)
        .await;

    server
}

fn provider(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::with_base_url("TEST_KEY".into(), server.uri(), Duration::from_secs(5))
        .expect("client")
}

#[tokio::test]
async fn fetches_and_decodes_current_weather() {
    let server = setup_mock_server().await;

    let current = provider(&server).current("London").await.expect("current");
    assert_eq!(current.temperature_c, 9.5);
    assert_eq!(current.humidity_pct, 81);
    assert_eq!(current.condition.description, "light rain");
    assert_eq!(current.condition.icon, "10d");
}

#[tokio::test]
async fn forecast_is_sorted_and_carries_city_offset() {
    let server = setup_mock_server().await;

    let payload = provider(&server).forecast("London").await.expect("forecast");
    assert_eq!(payload.len(), 40);
    assert!(payload.samples().windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    assert_eq!(payload.city_offset().map(|o| o.local_minus_utc()), Some(0));
}

#[tokio::test]
async fn unknown_city_is_location_not_found() {
    let server = setup_mock_server().await;

    let err = provider(&server).forecast("Atlantis").await.unwrap_err();
    assert!(matches!(err, FetchError::LocationNotFound(city) if city == "Atlantis"));
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&server)
        .await;

    let err = provider(&server).current("London").await.unwrap_err();
    match err {
        FetchError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Invalid API key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn home_report_end_to_end() {
    let server = setup_mock_server().await;
    let now = DateTime::parse_from_rfc3339("2024-03-10T13:00:00Z")
        .expect("valid instant")
        .with_timezone(&Utc);

    let report = home_report(&provider(&server), "London", ObserverZone::City, now)
        .await
        .expect("report");

    assert_eq!(report.current.temperature_c, 9.5);
    assert_eq!(report.tomorrow.as_ref().map(|s| s.temperature_c), Some(8.0));
    assert_eq!(report.day_after.as_ref().map(|s| s.temperature_c), Some(16.0));
}

#[tokio::test]
async fn date_report_end_to_end() {
    let server = setup_mock_server().await;
    let provider = provider(&server);

    let inside = NaiveDate::from_ymd_opt(2024, 3, 12).expect("date");
    let report = date_report(&provider, "London", inside, ObserverZone::City)
        .await
        .expect("report");
    assert_eq!(report.sample.map(|s| s.temperature_c), Some(16.0));

    let beyond = NaiveDate::from_ymd_opt(2024, 3, 20).expect("date");
    let report = date_report(&provider, "London", beyond, ObserverZone::City)
        .await
        .expect("report");
    assert!(report.sample.is_none());
}

#[tokio::test]
async fn home_view_clears_after_unknown_city() {
    let server = setup_mock_server().await;
    let provider = provider(&server);
    let mut view = HomeView::default();

    let ticket = view.submit();
    let result = home_report(&provider, "London", ObserverZone::Local, Utc::now()).await;
    view.apply(ticket, result);
    assert!(view.has_weather());

    let ticket = view.submit();
    let result = home_report(&provider, "Atlantis", ObserverZone::Local, Utc::now()).await;
    view.apply(ticket, result);
    assert!(!view.has_weather());
    assert_eq!(view.error, Some(cityweather_core::view::HOME_ERROR));
}
