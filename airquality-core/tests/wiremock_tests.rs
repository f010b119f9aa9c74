//! Provider client tests against a mock HTTP server.

use std::time::Duration;

use airquality_core::{
    AirNowClient, AirQualityProvider, Coordinate, GeocodeResult, Geocoder, GeocodioClient,
    ProviderId,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const GEOCODE_PATH: &str = "/v1.7/geocode";
const AIRNOW_PATH: &str = "/aq/observation/latLong/current/";

fn geocodio_client(server: &MockServer) -> GeocodioClient {
    GeocodioClient::new(format!("{}{GEOCODE_PATH}", server.uri()), Duration::from_secs(5))
        .expect("client should build")
}

fn airnow_client(server: &MockServer, timeout: Duration) -> AirNowClient {
    AirNowClient::new(format!("{}{AIRNOW_PATH}", server.uri()), timeout)
        .expect("client should build")
}

fn sample_observations() -> serde_json::Value {
    json!([
        {
            "DateObserved": "2024-05-01 ",
            "HourObserved": 13,
            "LocalTimeZone": "PST",
            "ReportingArea": "Mountain View",
            "StateCode": "CA",
            "Latitude": 37.36,
            "Longitude": -122.03,
            "ParameterName": "O3",
            "AQI": 38,
            "Category": { "Number": 1, "Name": "Good" }
        },
        {
            "DateObserved": "2024-05-01 ",
            "HourObserved": 13,
            "LocalTimeZone": "PST",
            "ReportingArea": "Mountain View",
            "StateCode": "CA",
            "Latitude": 37.36,
            "Longitude": -122.03,
            "ParameterName": "PM2.5",
            "AQI": 54,
            "Category": { "Number": 2, "Name": "Moderate" }
        }
    ])
}

// ============================================================================
// Geocodio
// ============================================================================

#[tokio::test]
async fn geocode_sends_expected_query_and_returns_first_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("q", "1600 Amphitheatre Parkway, Mountain View, CA"))
        .and(query_param("api_key", "GEO_KEY"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "input": { "formatted_address": "1600 Amphitheatre Pkwy, Mountain View, CA" },
            "results": [{
                "address_components": { "city": "Mountain View" },
                "formatted_address": "1600 Amphitheatre Pkwy, Mountain View, CA 94043",
                "location": { "lat": 37.422, "lng": -122.084 },
                "accuracy": 1,
                "accuracy_type": "rooftop",
                "source": "Santa Clara"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = geocodio_client(&server)
        .geocode("1600 Amphitheatre Parkway, Mountain View, CA", "GEO_KEY")
        .await
        .expect("geocode should succeed");

    assert_eq!(
        result,
        GeocodeResult::located(37.422, -122.084, "1600 Amphitheatre Pkwy, Mountain View, CA 94043")
    );
}

#[tokio::test]
async fn geocode_with_zero_results_is_no_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;

    let result = geocodio_client(&server)
        .geocode("asdfghjkl", "GEO_KEY")
        .await
        .expect("no match is not an error");

    assert_eq!(result, GeocodeResult::no_match());
}

#[tokio::test]
async fn geocode_with_null_results_is_no_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": null })))
        .mount(&server)
        .await;

    let result = geocodio_client(&server)
        .geocode("asdfghjkl", "GEO_KEY")
        .await
        .expect("null results is not an error");

    assert_eq!(result, GeocodeResult::no_match());
}

#[tokio::test]
async fn geocode_with_null_formatted_address_still_matches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "formatted_address": null,
                "location": { "lat": 48.8566, "lng": 2.3522 }
            }]
        })))
        .mount(&server)
        .await;

    let result = geocodio_client(&server)
        .geocode("Paris", "GEO_KEY")
        .await
        .expect("null formatted_address is not an error");

    assert_eq!(result.formatted_address, "");
    assert_eq!(result.coordinate(), Some(Coordinate::new(48.8566, 2.3522)));
}

#[tokio::test]
async fn geocode_keeps_integer_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(
                    r#"{"results":[{"formatted_address":"Somewhere","location":{"lat":37,"lng":-122}}]}"#,
                ),
        )
        .mount(&server)
        .await;

    let result = geocodio_client(&server)
        .geocode("Somewhere", "GEO_KEY")
        .await
        .expect("geocode should succeed");

    assert_eq!(result.latitude, Some(serde_json::Number::from(37)));
    assert_eq!(result.longitude, Some(serde_json::Number::from(-122)));
}

#[tokio::test]
async fn geocode_error_status_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "error": "Invalid API key" })),
        )
        .mount(&server)
        .await;

    let err = geocodio_client(&server)
        .geocode("Paris", "BAD_KEY")
        .await
        .unwrap_err();

    assert_eq!(err.provider, ProviderId::Geocodio);
    let msg = err.to_string();
    assert!(msg.starts_with("Geocodio request failed: "), "{msg}");
    assert!(msg.contains("403"), "{msg}");
    assert!(msg.contains("Invalid API key"), "{msg}");
}

#[tokio::test]
async fn geocode_invalid_json_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = geocodio_client(&server)
        .geocode("Paris", "GEO_KEY")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("invalid JSON response"));
}

#[tokio::test]
async fn geocode_transport_error_does_not_leak_api_key() {
    // Port 1 is reserved and refuses connections.
    let client = GeocodioClient::new(
        format!("http://127.0.0.1:1{GEOCODE_PATH}"),
        Duration::from_secs(2),
    )
    .expect("client should build");

    let err = client.geocode("Paris", "SECRET_KEY").await.unwrap_err();

    let msg = err.to_string();
    assert!(msg.starts_with("Geocodio request failed: "), "{msg}");
    assert!(!msg.contains("SECRET_KEY"), "{msg}");
}

// ============================================================================
// AirNow
// ============================================================================

#[tokio::test]
async fn observations_send_exact_parameter_names() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(AIRNOW_PATH))
        .and(query_param("format", "application/json"))
        .and(query_param("latitude", "37.422"))
        .and(query_param("longitude", "-122.084"))
        .and(query_param("distance", "25"))
        .and(query_param("API_KEY", "AIR_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_observations()))
        .expect(1)
        .mount(&server)
        .await;

    let observations = airnow_client(&server, Duration::from_secs(5))
        .current_observations(Coordinate::new(37.422, -122.084), "AIR_KEY")
        .await
        .expect("observations should be returned");

    assert_eq!(observations, sample_observations());
}

#[tokio::test]
async fn observations_send_whole_coordinates_with_decimal_point() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(AIRNOW_PATH))
        .and(query_param("latitude", "40.0"))
        .and(query_param("longitude", "-74.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let observations = airnow_client(&server, Duration::from_secs(5))
        .current_observations(Coordinate::new(40.0, -74.0), "AIR_KEY")
        .await
        .expect("observations should be returned");

    assert_eq!(observations, json!([]));
}

#[tokio::test]
async fn observations_are_relayed_with_key_order_intact() {
    let server = MockServer::start().await;
    let raw = r#"[{"Zeta":1,"Alpha":{"b":2,"a":1}}]"#;

    Mock::given(method("GET"))
        .and(path(AIRNOW_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(raw),
        )
        .mount(&server)
        .await;

    let observations = airnow_client(&server, Duration::from_secs(5))
        .current_observations(Coordinate::new(0.0, 0.0), "AIR_KEY")
        .await
        .expect("observations should be returned");

    assert_eq!(serde_json::to_string(&observations).unwrap(), raw);
}

#[tokio::test]
async fn observations_server_error_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(AIRNOW_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = airnow_client(&server, Duration::from_secs(5))
        .current_observations(Coordinate::new(40.0, -75.0), "AIR_KEY")
        .await
        .unwrap_err();

    assert_eq!(err.provider, ProviderId::AirNow);
    let msg = err.to_string();
    assert!(msg.starts_with("AirNow request failed: "), "{msg}");
    assert!(msg.contains("503"), "{msg}");
}

#[tokio::test]
async fn observations_timeout_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(AIRNOW_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_observations())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = airnow_client(&server, Duration::from_millis(200))
        .current_observations(Coordinate::new(40.0, -75.0), "AIR_KEY")
        .await
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.starts_with("AirNow request failed: "), "{msg}");
    assert!(msg.contains("timed out"), "{msg}");
}
