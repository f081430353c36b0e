use std::env;
use std::fs;
use log::{info, warn};
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logger;

pub const POINT_TOKEN_VAR: &str = "WINDY_API_TOKEN_POINT";
pub const WEBCAMS_TOKEN_VAR: &str = "WINDY_API_TOKEN_WEBCAMS";
pub const MAP_TOKEN_VAR: &str = "WINDY_API_TOKEN_MAP";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

impl Default for WebServer {
    fn default() -> Self {
        Self { bind_address: "0.0.0.0".to_string(), bind_port: 8080 }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WindyParameters {
    pub forecast_url: String,
    pub webcams_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub webcam_radius_km: u32,
}

impl Default for WindyParameters {
    fn default() -> Self {
        Self {
            forecast_url: "https://api.windy.com/api/point-forecast/v2".to_string(),
            webcams_url: "https://api.windy.com/api/webcams/v2/list".to_string(),
            model: "gfs".to_string(),
            timeout_secs: 10,
            webcam_radius_km: 50,
        }
    }
}

/// Fallback point used when a request carries no coordinates
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Default for Location {
    fn default() -> Self {
        Self { lat: 50.4, lon: 14.3 }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct General {
    pub log_path: Option<String>,
    pub log_level: String,
}

impl Default for General {
    fn default() -> Self {
        Self { log_path: None, log_level: "info".to_string() }
    }
}

/// Windy API credentials, one per capability.
///
/// A missing or empty token disables only the capability it belongs to.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub point: Option<String>,
    pub webcams: Option<String>,
    pub map: Option<String>,
}

impl Credentials {
    /// Reads the tokens from the process environment
    ///
    pub fn from_env() -> Self {
        Self {
            point: non_empty(env::var(POINT_TOKEN_VAR).ok()),
            webcams: non_empty(env::var(WEBCAMS_TOKEN_VAR).ok()),
            map: non_empty(env::var(MAP_TOKEN_VAR).ok()),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub web_server: WebServer,
    pub windy: WindyParameters,
    pub location: Location,
    pub general: General,
    #[serde(skip)]
    pub credentials: Credentials,
}

/// Returns the configuration and sets up logging.
///
/// The config file path is taken from the first command line argument, without one
/// the built-in defaults are used. Credentials always come from the environment,
/// after loading an optional `.env` file.
pub fn config() -> Result<Config, ConfigError> {
    dotenv::dotenv().ok();

    let mut config = match env::args().nth(1) {
        Some(path) => load_config(&path)?,
        None => Config::default(),
    };
    config.credentials = Credentials::from_env();

    setup_logger(config.general.log_path.as_deref(), &config.general.log_level)?;

    info!("configuration loaded, web server on {}:{}", config.web_server.bind_address, config.web_server.bind_port);
    for (var, token) in [
        (POINT_TOKEN_VAR, &config.credentials.point),
        (WEBCAMS_TOKEN_VAR, &config.credentials.webcams),
        (MAP_TOKEN_VAR, &config.credentials.map),
    ] {
        if token.is_none() {
            warn!("{} is not set, the dependent capability is disabled", var);
        }
    }

    Ok(config)
}

/// Loads the configuration file
///
/// # Arguments
///
/// * 'config_path' - path to the config file
fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    parse_config(&toml)
}

fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if !(-90.0..=90.0).contains(&config.location.lat) || !(-180.0..=180.0).contains(&config.location.lon) {
        return Err(ConfigError::from("fallback location is out of range"));
    }
    if config.windy.timeout_secs == 0 {
        return Err(ConfigError::from("windy.timeout_secs must be greater than zero"));
    }

    Ok(())
}

fn non_empty(token: Option<String>) -> Option<String> {
    token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config.web_server.bind_port, 8080);
        assert_eq!(config.windy.model, "gfs");
        assert_eq!(config.windy.timeout_secs, 10);
        assert_eq!(config.location.lat, 50.4);
        assert_eq!(config.location.lon, 14.3);
        assert_eq!(config.general.log_level, "info");
        assert!(config.credentials.point.is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let toml = r#"
            [web_server]
            bind_port = 9090

            [windy]
            model = "iconEu"
            webcam_radius_km = 10

            [location]
            lat = 59.33
            lon = 18.06
        "#;
        let config = parse_config(toml).unwrap();

        assert_eq!(config.web_server.bind_address, "0.0.0.0");
        assert_eq!(config.web_server.bind_port, 9090);
        assert_eq!(config.windy.model, "iconEu");
        assert_eq!(config.windy.webcam_radius_km, 10);
        assert_eq!(config.windy.timeout_secs, 10);
        assert_eq!(config.location.lat, 59.33);
    }

    #[test]
    fn out_of_range_location_is_rejected() {
        let err = parse_config("[location]\nlat = 91.0\nlon = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(parse_config("[windy]\ntimeout_secs = 0\n").is_err());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_config("[web_server\nbind_port = 1").is_err());
    }

    #[test]
    fn blank_tokens_count_as_missing() {
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(" abc ".to_string())), Some("abc".to_string()));
    }
}
