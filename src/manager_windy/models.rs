use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_with::{serde_as, TimestampMilliSeconds};

pub const WINDY_SOURCE: &str = "Windy Point Forecast API";
pub const PLACEHOLDER_SOURCE: &str = "Placeholder Data";
pub const NOT_AVAILABLE: &str = "N/A";

/// Normalized weather for one coordinate, temperatures in Celsius, pressure in hPa,
/// precipitation in mm and wind speed in m/s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    #[serde(serialize_with = "value_or_na")]
    pub temperature: Option<f64>,
    #[serde(serialize_with = "value_or_na")]
    pub wind_speed: Option<f64>,
    #[serde(serialize_with = "value_or_na")]
    pub pressure: Option<f64>,
    #[serde(serialize_with = "value_or_na")]
    pub humidity: Option<f64>,
    #[serde(serialize_with = "value_or_na")]
    pub precipitation: Option<f64>,
    #[serde(serialize_with = "value_or_na")]
    pub dew_point: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    pub source: String,
}

impl WeatherRecord {
    /// Returns the fixed record used when no forecast could be fetched
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude of the location
    /// * 'lon' - longitude of the location
    pub fn placeholder(lat: f64, lon: f64) -> Self {
        Self {
            temperature: Some(25.0),
            wind_speed: None,
            pressure: None,
            humidity: None,
            precipitation: None,
            dew_point: None,
            condition: Some("Sunny (Placeholder)".to_string()),
            location: format_location(lat, lon),
            timestamp: None,
            source: PLACEHOLDER_SOURCE.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.source == PLACEHOLDER_SOURCE
    }
}

/// Display string for a coordinate, e.g. "Lat: 50.4, Lon: 14.3"
pub fn format_location(lat: f64, lon: f64) -> String {
    format!("Lat: {}, Lon: {}", lat, lon)
}

fn value_or_na<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_str(NOT_AVAILABLE),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebcamRecord {
    pub title: String,
    pub city: String,
    pub preview_url: String,
    pub page_url: String,
}

#[derive(Serialize)]
pub struct ForecastRequest<'a> {
    pub lat: f64,
    pub lon: f64,
    pub model: &'a str,
    pub parameters: &'a [&'a str],
    pub levels: &'a [&'a str],
    pub key: &'a str,
}

/// Point forecast response, every parameter is an array parallel to `ts`
#[serde_as]
#[derive(Deserialize)]
pub struct PointForecast {
    #[serde_as(as = "Vec<TimestampMilliSeconds<i64>>")]
    #[serde(default)]
    pub ts: Vec<DateTime<Utc>>,
    #[serde(rename = "temp-surface", default)]
    pub temp: Vec<Option<f64>>,
    #[serde(rename = "dewpoint-surface", default)]
    pub dew_point: Vec<Option<f64>>,
    #[serde(rename = "rh-surface", default)]
    pub relative_humidity: Vec<Option<f64>>,
    #[serde(rename = "pressure-surface", default)]
    pub pressure: Vec<Option<f64>>,
    #[serde(rename = "wind_u-surface", default)]
    pub wind_u: Vec<Option<f64>>,
    #[serde(rename = "wind_v-surface", default)]
    pub wind_v: Vec<Option<f64>>,
    #[serde(rename = "past3hprecip-surface", default)]
    pub precipitation: Vec<Option<f64>>,
}

#[derive(Deserialize)]
pub struct WebcamList {
    pub result: WebcamResult,
}

#[derive(Deserialize)]
pub struct WebcamResult {
    #[serde(default)]
    pub webcams: Vec<Webcam>,
}

#[derive(Deserialize)]
pub struct Webcam {
    pub title: Option<String>,
    pub location: Option<WebcamLocation>,
    pub image: Option<WebcamImage>,
    pub url: Option<WebcamUrl>,
}

#[derive(Deserialize)]
pub struct WebcamLocation {
    pub city: Option<String>,
}

#[derive(Deserialize)]
pub struct WebcamImage {
    pub current: Option<WebcamImageCurrent>,
}

#[derive(Deserialize)]
pub struct WebcamImageCurrent {
    pub preview: Option<String>,
}

#[derive(Deserialize)]
pub struct WebcamUrl {
    pub current: Option<WebcamUrlCurrent>,
}

#[derive(Deserialize)]
pub struct WebcamUrlCurrent {
    pub desktop: Option<String>,
}
