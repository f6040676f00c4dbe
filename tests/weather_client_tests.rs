use mockito::Matcher;
use std::time::Duration;
use weather_intake_bot::services::weather::{OpenWeatherClient, WeatherError, WeatherGateway};

const API_KEY: &str = "secret-weather-key";

fn client_for(server: &mockito::ServerGuard) -> OpenWeatherClient {
    OpenWeatherClient::new(
        format!("{}/data/2.5/weather", server.url()),
        API_KEY,
        "en",
        Duration::from_secs(5),
    )
    .expect("client should build")
}

fn expected_query(city: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("q".into(), city.into()),
        Matcher::UrlEncoded("appid".into(), API_KEY.into()),
        Matcher::UrlEncoded("units".into(), "metric".into()),
        Matcher::UrlEncoded("lang".into(), "en".into()),
    ])
}

#[tokio::test]
async fn test_fetch_parses_current_weather() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/data/2.5/weather")
        .match_query(expected_query("Paris"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "name": "Paris",
                "main": {"temp": 18.3, "feels_like": 17.9, "humidity": 72},
                "weather": [{"id": 500, "main": "Rain", "description": "light rain"}]
            }"#,
        )
        .create_async()
        .await;

    let report = client_for(&server).fetch("Paris").await.expect("report");

    mock.assert_async().await;
    assert_eq!(report.city, "Paris");
    assert_eq!(report.temperature_celsius, 18.3);
    assert_eq!(report.humidity_percent, 72);
    assert_eq!(report.description, "light rain");
}

#[tokio::test]
async fn test_city_with_spaces_is_url_encoded() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/data/2.5/weather")
        .match_query(expected_query("New York"))
        .with_status(200)
        .with_body(r#"{"name": "New York", "main": {"temp": 5.0, "humidity": 50}, "weather": [{"description": "mist"}]}"#)
        .create_async()
        .await;

    let report = client_for(&server).fetch("New York").await.expect("report");

    mock.assert_async().await;
    assert_eq!(report.description, "mist");
}

#[tokio::test]
async fn test_non_200_status_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/data/2.5/weather")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"cod": "404", "message": "city not found"}"#)
        .create_async()
        .await;

    let err = client_for(&server).fetch("Atlantis").await.unwrap_err();
    assert!(matches!(err, WeatherError::Api { status: 404 }));
}

#[tokio::test]
async fn test_other_success_codes_are_not_accepted() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/data/2.5/weather")
        .match_query(Matcher::Any)
        .with_status(204)
        .create_async()
        .await;

    let err = client_for(&server).fetch("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::Api { status: 204 }));
}

#[tokio::test]
async fn test_missing_fields_are_parse_errors() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/data/2.5/weather")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"name": "Paris", "weather": []}"#)
        .create_async()
        .await;

    let err = client_for(&server).fetch("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_http_error_without_key() {
    let client = OpenWeatherClient::new(
        "http://127.0.0.1:1/data/2.5/weather",
        API_KEY,
        "en",
        Duration::from_secs(2),
    )
    .expect("client should build");

    let err = client.fetch("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::Http(_)));
    assert!(!err.to_string().contains(API_KEY));
}
