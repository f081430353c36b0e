pub mod errors;
pub mod models;

use std::time::Duration;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use crate::initialization::{Credentials, WindyParameters};
use crate::manager_windy::errors::WindyError;
use crate::manager_windy::models::{format_location, ForecastRequest, PointForecast, WeatherRecord, WebcamList, WebcamRecord, WINDY_SOURCE};

const PARAMETERS: [&str; 6] = ["wind", "temp", "dewpoint", "rh", "pressure", "precip"];
const LEVELS: [&str; 1] = ["surface"];
const MAX_WEBCAMS: usize = 3;

const DEFAULT_WEBCAM_TITLE: &str = "Untitled webcam";
const DEFAULT_WEBCAM_CITY: &str = "Unknown location";
const DEFAULT_WEBCAM_PREVIEW: &str = "https://via.placeholder.com/400x224?text=No+preview";
const DEFAULT_WEBCAM_PAGE: &str = "https://www.windy.com/webcams";


/// Struct for fetching point forecasts and nearby webcams from Windy
pub struct Windy {
    client: Client,
    params: WindyParameters,
    point_key: Option<String>,
    webcams_key: Option<String>,
}

impl Windy {
    /// Returns a Windy struct ready for fetching forecasts and webcams
    ///
    /// A capability whose credential is missing stays disabled, requests for it
    /// return `WindyError::Disabled` without touching the network.
    ///
    /// # Arguments
    ///
    /// * 'params' - endpoints, model and timeout
    /// * 'credentials' - API tokens
    pub fn new(params: &WindyParameters, credentials: &Credentials) -> Result<Windy, WindyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(params.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            params: params.clone(),
            point_key: credentials.point.clone().filter(|k| !k.is_empty()),
            webcams_key: credentials.webcams.clone().filter(|k| !k.is_empty()),
        })
    }

    pub fn forecast_enabled(&self) -> bool {
        self.point_key.is_some()
    }

    pub fn webcams_enabled(&self) -> bool {
        self.webcams_key.is_some()
    }

    pub fn webcam_radius(&self) -> u32 {
        self.params.webcam_radius_km
    }

    /// Retrieves a point forecast for the given location and maps the earliest entry of
    /// the returned time series into a WeatherRecord.
    ///
    /// Only a 200 response is accepted, any other status is a `WindyError::Remote`.
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude of the location
    /// * 'lon' - longitude of the location
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<WeatherRecord, WindyError> {
        let key = self.point_key.as_deref().ok_or(WindyError::Disabled("point forecast token"))?;

        let payload = ForecastRequest {
            lat,
            lon,
            model: &self.params.model,
            parameters: &PARAMETERS,
            levels: &LEVELS,
            key,
        };

        let req = self.client
            .post(&self.params.forecast_url)
            .json(&payload)
            .send().await?;

        let status = req.status();
        if status != StatusCode::OK {
            error!("point forecast request failed with status {}", status);
            return Err(WindyError::Remote(format!("Error while fetching point forecast: {}", status)));
        }

        let json = req.text().await?;
        let forecast: PointForecast = serde_json::from_str(&json)?;
        debug!("point forecast with {} entries for {}, {}", forecast.ts.len(), lat, lon);

        earliest_record(&forecast, lat, lon)
    }

    /// Retrieves up to three webcams around the given location
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude of the location
    /// * 'lon' - longitude of the location
    /// * 'radius' - search radius in kilometers
    pub async fn fetch_webcams(&self, lat: f64, lon: f64, radius: u32) -> Result<Vec<WebcamRecord>, WindyError> {
        let key = self.webcams_key.as_deref().ok_or(WindyError::Disabled("webcams token"))?;

        let url = format!("{}/nearby={},{},{}", self.params.webcams_url, lat, lon, radius);
        let req = self.client
            .get(url)
            .query(&[("show", "webcams:image,location,url")])
            .header("x-windy-key", key)
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            error!("webcam request failed with status {}", status);
            return Err(WindyError::Remote(format!("Error while fetching webcams: {}", status)));
        }

        let json = req.text().await?;
        let list: WebcamList = serde_json::from_str(&json)?;

        let webcams = list.result.webcams
            .into_iter()
            .take(MAX_WEBCAMS)
            .map(|w| WebcamRecord {
                title: w.title.unwrap_or_else(|| DEFAULT_WEBCAM_TITLE.to_string()),
                city: w.location.and_then(|l| l.city).unwrap_or_else(|| DEFAULT_WEBCAM_CITY.to_string()),
                preview_url: w.image
                    .and_then(|i| i.current)
                    .and_then(|c| c.preview)
                    .unwrap_or_else(|| DEFAULT_WEBCAM_PREVIEW.to_string()),
                page_url: w.url
                    .and_then(|u| u.current)
                    .and_then(|c| c.desktop)
                    .unwrap_or_else(|| DEFAULT_WEBCAM_PAGE.to_string()),
            })
            .collect();

        Ok(webcams)
    }

    /// Same as fetch_webcams but any failure yields an empty list
    ///
    pub async fn webcams_or_empty(&self, lat: f64, lon: f64, radius: u32) -> Vec<WebcamRecord> {
        match self.fetch_webcams(lat, lon, radius).await {
            Ok(webcams) => webcams,
            Err(e) => {
                error!("no webcams for {}, {}: {}", lat, lon, e);
                Vec::new()
            }
        }
    }
}

/// Picks the entry with the smallest timestamp, the response order is not relied upon
fn earliest_record(forecast: &PointForecast, lat: f64, lon: f64) -> Result<WeatherRecord, WindyError> {
    let (idx, timestamp) = forecast.ts
        .iter()
        .enumerate()
        .min_by_key(|(_, ts)| **ts)
        .ok_or(WindyError::NoData)?;

    let wind_speed = match (value_at(&forecast.wind_u, idx), value_at(&forecast.wind_v, idx)) {
        (Some(u), Some(v)) => Some(round_tenth(u.hypot(v))),
        _ => None,
    };

    Ok(WeatherRecord {
        temperature: value_at(&forecast.temp, idx).map(kelvin_to_celsius),
        wind_speed,
        pressure: value_at(&forecast.pressure, idx).map(pascal_to_hpa),
        humidity: value_at(&forecast.relative_humidity, idx).map(round_tenth),
        precipitation: value_at(&forecast.precipitation, idx).map(metres_to_mm),
        dew_point: value_at(&forecast.dew_point, idx).map(kelvin_to_celsius),
        condition: None,
        location: format_location(lat, lon),
        timestamp: Some(*timestamp),
        source: WINDY_SOURCE.to_string(),
    })
}

fn value_at(values: &[Option<f64>], idx: usize) -> Option<f64> {
    values.get(idx).copied().flatten().filter(|v| v.is_finite())
}

fn kelvin_to_celsius(temp: f64) -> f64 {
    round_tenth(temp - 273.15)
}

fn pascal_to_hpa(pressure: f64) -> f64 {
    round_tenth(pressure / 100.0)
}

fn metres_to_mm(precip: f64) -> f64 {
    round_tenth(precip * 1000.0)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
