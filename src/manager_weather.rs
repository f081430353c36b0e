use log::{info, warn};
use crate::manager_windy::errors::WindyError;
use crate::manager_windy::models::WeatherRecord;
use crate::manager_windy::Windy;

/// Returns the current weather for a location, falling back to the placeholder record
/// whenever the forecast could not be fetched
///
/// # Arguments
///
/// * 'windy' - Windy client
/// * 'lat' - latitude of the location
/// * 'lon' - longitude of the location
pub async fn get_weather(windy: &Windy, lat: f64, lon: f64) -> WeatherRecord {
    match try_get_weather(windy, lat, lon).await {
        Ok(record) => record,
        Err(WindyError::Disabled(what)) => {
            info!("{} not configured, serving placeholder weather", what);
            WeatherRecord::placeholder(lat, lon)
        }
        Err(e) => {
            warn!("serving placeholder weather for {}, {}: {}", lat, lon, e);
            WeatherRecord::placeholder(lat, lon)
        }
    }
}

/// Like get_weather but hands the failure back to the caller
///
pub async fn try_get_weather(windy: &Windy, lat: f64, lon: f64) -> Result<WeatherRecord, WindyError> {
    windy.fetch_forecast(lat, lon).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use crate::initialization::{Credentials, WindyParameters};
    use crate::manager_windy::models::PLACEHOLDER_SOURCE;

    fn windy(base: &str, point: Option<&str>) -> Windy {
        let params = WindyParameters {
            forecast_url: format!("{}/forecast", base),
            ..WindyParameters::default()
        };
        let creds = Credentials { point: point.map(str::to_string), ..Credentials::default() };
        Windy::new(&params, &creds).unwrap()
    }

    #[tokio::test]
    async fn placeholder_when_not_configured() {
        let record = get_weather(&windy("http://127.0.0.1:9", None), 10.0, 20.0).await;

        assert_eq!(record.source, PLACEHOLDER_SOURCE);
        assert_eq!(record.temperature, Some(25.0));
        assert_eq!(record.condition.as_deref(), Some("Sunny (Placeholder)"));
        assert_eq!(record.location, "Lat: 10, Lon: 20");
    }

    #[tokio::test]
    async fn placeholder_on_remote_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let windy = windy(&mock_server.uri(), Some("key"));
        assert!(matches!(try_get_weather(&windy, 50.4, 14.3).await, Err(WindyError::Remote(_))));

        let record = get_weather(&windy, 50.4, 14.3).await;
        assert!(record.is_placeholder());
        assert_eq!(record.location, "Lat: 50.4, Lon: 14.3");
    }

    #[tokio::test]
    async fn placeholder_on_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200)
                .set_body_json(json!({"ts": [1700000000000i64], "temp-surface": [263.15]}))
                .set_delay(Duration::from_secs(3)))
            .mount(&mock_server)
            .await;

        let params = WindyParameters {
            forecast_url: format!("{}/forecast", mock_server.uri()),
            timeout_secs: 1,
            ..WindyParameters::default()
        };
        let creds = Credentials { point: Some("key".to_string()), ..Credentials::default() };
        let windy = Windy::new(&params, &creds).unwrap();

        assert!(matches!(try_get_weather(&windy, 50.4, 14.3).await, Err(WindyError::Remote(_))));
        assert!(get_weather(&windy, 50.4, 14.3).await.is_placeholder());
    }

    #[tokio::test]
    async fn placeholder_when_connection_refused() {
        let windy = windy("http://127.0.0.1:9", Some("key"));

        assert!(matches!(try_get_weather(&windy, 50.4, 14.3).await, Err(WindyError::Remote(_))));
        assert!(get_weather(&windy, 50.4, 14.3).await.is_placeholder());
    }

    #[tokio::test]
    async fn forecast_passes_through() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ts": [1700000000000i64],
                "temp-surface": [263.15]
            })))
            .mount(&mock_server)
            .await;

        let record = get_weather(&windy(&mock_server.uri(), Some("key")), 50.4, 14.3).await;

        assert!(!record.is_placeholder());
        assert_eq!(record.temperature, Some(-10.0));
    }
}
