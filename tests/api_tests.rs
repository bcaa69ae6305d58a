//! Integration tests for the weatherapi.com client using WireMock
//!
//! These tests mock `current.json` so request shape and error mapping are
//! checked without touching the real provider.

use pretty_assertions::assert_eq;
use weather_panel::api::{ProviderConfig, QueryError, WeatherApiClient};
use weather_panel::state::Reading;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn client_for(server: &MockServer) -> WeatherApiClient {
    WeatherApiClient::new(ProviderConfig {
        base_url: server.uri(),
        api_key: Some("test_key".to_string()),
        timeout_secs: 5,
    })
    .expect("Failed to create client")
}

fn current_response() -> serde_json::Value {
    serde_json::json!({
        "location": {
            "name": "Mumbai",
            "region": "Maharashtra",
            "country": "India",
            "lat": 18.98,
            "lon": 72.83
        },
        "current": {
            "temp_c": 29.0,
            "temp_f": 84.2,
            "humidity": 79,
            "wind_kph": 16.9,
            "condition": {
                "text": "Light rain shower",
                "icon": "//cdn.weatherapi.com/weather/64x64/day/353.png",
                "code": 1240
            }
        }
    })
}

fn provider_error(code: i64, message: &str) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "code": code,
            "message": message
        }
    })
}

// =============================================================================
// Success
// =============================================================================

#[tokio::test]
async fn test_current_returns_reading() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("key", "test_key"))
        .and(query_param("q", "Mumbai"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_response()))
        .expect(1)
        .mount(&server)
        .await;

    let reading = client_for(&server).current("Mumbai").await.unwrap();

    assert_eq!(
        reading,
        Reading {
            temperature_c: 29.0,
            humidity: 79,
            wind_kph: 16.9,
            city: "Mumbai".into(),
            condition: "Light rain shower".into(),
        }
    );
}

#[tokio::test]
async fn test_city_with_spaces_is_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", "Rio de Janeiro"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_response()))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client_for(&server).current("Rio de Janeiro").await.is_ok());
}

#[tokio::test]
async fn test_empty_city_is_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", ""))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(provider_error(1003, "Parameter q is missing.")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).current("").await.unwrap_err();
    assert!(matches!(err, QueryError::Provider { code: 1003, .. }));
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_unknown_city_maps_to_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(provider_error(1006, "No matching location found.")),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).current("Atlantis").await.unwrap_err();

    match err {
        QueryError::Provider { code, message } => {
            assert_eq!(code, 1006);
            assert_eq!(message, "No matching location found.");
        }
        other => panic!("Expected Provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = client_for(&server).current("Mumbai").await.unwrap_err();

    match err {
        QueryError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("Expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_maps_to_parse() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"location\":"))
        .mount(&server)
        .await;

    let err = client_for(&server).current("Mumbai").await.unwrap_err();
    assert!(matches!(err, QueryError::Parse(_)));
}

#[tokio::test]
async fn test_missing_api_key_skips_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_response()))
        .expect(0)
        .mount(&server)
        .await;

    let client = WeatherApiClient::new(ProviderConfig {
        base_url: server.uri(),
        api_key: None,
        timeout_secs: 5,
    })
    .unwrap();

    let err = client.current("Mumbai").await.unwrap_err();
    assert!(matches!(err, QueryError::MissingApiKey));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_response())
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = WeatherApiClient::new(ProviderConfig {
        base_url: server.uri(),
        api_key: Some("test_key".to_string()),
        timeout_secs: 1,
    })
    .unwrap();

    let err = client.current("Mumbai").await.unwrap_err();
    assert!(matches!(err, QueryError::Request(_)));
    assert!(!err.to_string().contains("test_key"));
}

#[tokio::test]
async fn test_refused_connection_maps_to_request() {
    // Nothing listens on port 1
    let client = WeatherApiClient::new(ProviderConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        api_key: Some("test_key".to_string()),
        timeout_secs: 5,
    })
    .unwrap();

    let err = client.current("Mumbai").await.unwrap_err();

    assert!(matches!(err, QueryError::Request(_)));
    assert!(
        !err.to_string().contains("test_key"),
        "API key leaked into error: {err}"
    );
}
