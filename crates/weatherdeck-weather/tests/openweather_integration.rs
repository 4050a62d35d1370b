//! Integration tests for OpenWeatherClient using wiremock.

use std::time::Duration;

use weatherdeck_weather::{
    LookupFailed, OpenWeatherClient, UnitPreference, WeatherError, WeatherLookup, WeatherSnapshot,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::new(
        format!("{}/data/2.5/weather", server.uri()),
        "test-key",
        Duration::from_secs(5),
    )
    .unwrap()
}

fn london_body(temp: f64) -> serde_json::Value {
    serde_json::json!({
        "name": "London",
        "sys": { "country": "GB" },
        "main": { "temp": temp }
    })
}

#[tokio::test]
async fn test_lookup_success_sends_expected_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body(15.0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let snapshot = client.lookup("London", UnitPreference::Metric).await.unwrap();

    assert_eq!(
        snapshot,
        WeatherSnapshot {
            name: "London".to_string(),
            country: "GB".to_string(),
            temp: 15.0,
            unit: UnitPreference::Metric,
        }
    );
}

#[tokio::test]
async fn test_lookup_imperial_tags_snapshot() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body(59.0)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let snapshot = client.lookup("London", UnitPreference::Imperial).await.unwrap();

    assert_eq!(snapshot.temp, 59.0);
    assert_eq!(snapshot.unit, UnitPreference::Imperial);
}

#[tokio::test]
async fn test_lookup_encodes_place_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("q", "São Paulo,BR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "São Paulo",
            "sys": { "country": "BR" },
            "main": { "temp": 24.3 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let snapshot = client.lookup("São Paulo,BR", UnitPreference::Metric).await.unwrap();
    assert_eq!(snapshot.name, "São Paulo");
}

#[tokio::test]
async fn test_lookup_not_found_collapses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    assert!(matches!(
        client.fetch("Atlantis", UnitPreference::Metric).await,
        Err(WeatherError::Status(404))
    ));
    assert_eq!(
        client.lookup("Atlantis", UnitPreference::Metric).await,
        Err(LookupFailed)
    );
}

#[tokio::test]
async fn test_lookup_server_error_collapses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert_eq!(
        client.lookup("London", UnitPreference::Metric).await,
        Err(LookupFailed)
    );
}

#[tokio::test]
async fn test_lookup_malformed_body_collapses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"name\": \"London\""))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    assert!(matches!(
        client.fetch("London", UnitPreference::Metric).await,
        Err(WeatherError::Parse(_))
    ));
    assert_eq!(
        client.lookup("London", UnitPreference::Metric).await,
        Err(LookupFailed)
    );
}

#[tokio::test]
async fn test_lookup_unreachable_service_collapses() {
    let client = OpenWeatherClient::new(
        "http://127.0.0.1:1/data/2.5/weather",
        "test-key",
        Duration::from_secs(2),
    )
    .unwrap();

    assert_eq!(
        client.lookup("London", UnitPreference::Metric).await,
        Err(LookupFailed)
    );
}
