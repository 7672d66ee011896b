//! Resolution pipeline against a mock Open-Meteo server.

use weather_now_core::{
    Config, Endpoint, FailureKind, OpenMeteo, ResolveError, Resolver, Session, WeatherCategory,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resolver_for(server: &MockServer) -> Resolver {
    Resolver::new(Box::new(OpenMeteo::new(server.uri(), server.uri())))
}

fn new_york() -> serde_json::Value {
    serde_json::json!({
        "results": [
            { "latitude": 40.71, "longitude": -74.01, "name": "New York", "country": "United States" },
            { "latitude": 43.0, "longitude": -75.0, "name": "New York Mills" }
        ]
    })
}

async fn mount_geocoding(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Forecast endpoint that must never be hit.
async fn forbid_forecast(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_resolve_new_york() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(new_york()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "40.71"))
        .and(query_param("longitude", "-74.01"))
        .and(query_param("current_weather", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 40.71,
            "longitude": -74.01,
            "current_weather": {
                "temperature": 22.5,
                "windspeed": 10,
                "time": "2024-01-01T12:00",
                "weathercode": 3
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = resolver_for(&server)
        .resolve("  New York ")
        .await
        .unwrap()
        .expect("snapshot");

    assert_eq!(snapshot.display_name(), "New York, United States");
    assert_eq!(snapshot.temperature_c, Some(22.5));
    assert_eq!(snapshot.windspeed_kmh, Some(10.0));
    assert_eq!(snapshot.weather_code, Some(3));
    assert_eq!(snapshot.category(), WeatherCategory::Cloudy);
    assert_eq!(snapshot.description(), "Overcast");
}

#[tokio::test]
async fn test_blank_query_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let resolver = resolver_for(&server);

    assert!(resolver.resolve("").await.unwrap().is_none());
    assert!(resolver.resolve("   ").await.unwrap().is_none());
}

#[tokio::test]
async fn test_empty_results_not_found() {
    let server = MockServer::start().await;
    mount_geocoding(&server, serde_json::json!({ "results": [] })).await;
    forbid_forecast(&server).await;

    let err = resolver_for(&server).resolve("Atlantis").await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::NotFound);
    assert_eq!(err.to_string(), "City not found");
}

#[tokio::test]
async fn test_missing_results_not_found() {
    let server = MockServer::start().await;
    mount_geocoding(&server, serde_json::json!({ "generationtime_ms": 0.4 })).await;
    forbid_forecast(&server).await;

    let err = resolver_for(&server).resolve("Atlantis").await.unwrap_err();

    assert!(matches!(err, ResolveError::NotFound));
}

#[tokio::test]
async fn test_non_numeric_latitude_is_invalid() {
    let server = MockServer::start().await;
    mount_geocoding(
        &server,
        serde_json::json!({
            "results": [{ "latitude": "NaN", "longitude": 2.35, "name": "Paris" }]
        }),
    )
    .await;
    forbid_forecast(&server).await;

    let err = resolver_for(&server).resolve("Paris").await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::InvalidData);
    assert_eq!(err.to_string(), "Invalid coordinates");
}

#[tokio::test]
async fn test_geocoding_status_in_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    forbid_forecast(&server).await;

    let err = resolver_for(&server).resolve("London").await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Network);
    assert_eq!(err.endpoint(), Some(Endpoint::Geocoding));
    assert_eq!(err.status(), Some(429));
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn test_forecast_status_in_message() {
    let server = MockServer::start().await;
    mount_geocoding(&server, new_york()).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = resolver_for(&server).resolve("New York").await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to fetch weather (status 503)");
}

#[tokio::test]
async fn test_unusable_weather_fields_become_none() {
    let server = MockServer::start().await;
    mount_geocoding(&server, new_york()).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_weather": {
                "temperature": "warm",
                "time": "2024-01-01T12:00",
                "weathercode": 95
            }
        })))
        .mount(&server)
        .await;

    let snapshot = resolver_for(&server).resolve("New York").await.unwrap().expect("snapshot");

    assert_eq!(snapshot.temperature_c, None);
    assert_eq!(snapshot.windspeed_kmh, None);
    assert_eq!(snapshot.description(), "Thunderstorm");
    assert_eq!(snapshot.category(), WeatherCategory::Clear);
}

#[tokio::test]
async fn test_malformed_body_is_network_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = resolver_for(&server).resolve("London").await.unwrap_err();

    assert!(matches!(err, ResolveError::Decode { endpoint: Endpoint::Geocoding, .. }));
    assert_eq!(err.kind(), FailureKind::Network);
}

#[tokio::test]
async fn test_connection_refused_is_transport_failure() {
    let config = Config {
        geocoding_url: "http://127.0.0.1:1".into(),
        forecast_url: "http://127.0.0.1:1".into(),
        timeout_secs: Some(5),
        ..Config::default()
    };

    let err = Resolver::from_config(&config).unwrap().resolve("London").await.unwrap_err();

    assert!(matches!(err, ResolveError::Transport { endpoint: Endpoint::Geocoding, .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_session_tracks_latest_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Nowhere"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(new_york()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_weather": { "temperature": -3.0, "windspeed": 4.2, "weathercode": 73 }
        })))
        .mount(&server)
        .await;

    let resolver = resolver_for(&server);
    let mut session = Session::new();

    assert!(session.search(&resolver, "New York").await);
    assert_eq!(session.snapshot().map(|s| s.category()), Some(WeatherCategory::Snow));

    assert!(session.search(&resolver, "Nowhere").await);
    assert!(session.snapshot().is_none());
    assert_eq!(session.error(), Some("City not found"));

    assert!(!session.search(&resolver, "  ").await);
    assert_eq!(session.error(), Some("City not found"));
}
