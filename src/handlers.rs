use actix_web::error::{InternalError, QueryPayloadError};
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use crate::errors::CoordinateError;
use crate::initialization::Location;
use crate::insights::{derive_insights, Insight};
use crate::manager_weather::get_weather;
use crate::manager_windy::models::{format_location, WeatherRecord};
use crate::map_embed::render_map;
use crate::pages;
use crate::AppState;

const INVALID_COORDINATES: &str = "Invalid coordinates";

#[derive(Deserialize, Debug)]
struct QueryParams {
    lat: Option<f64>,
    lon: Option<f64>,
    radius: Option<u32>,
}

impl QueryParams {
    /// Coordinates from the query, each missing one replaced from the fallback location
    ///
    fn coordinate(&self, fallback: &Location) -> Result<(f64, f64), CoordinateError> {
        let lat = self.lat.unwrap_or(fallback.lat);
        let lon = self.lon.unwrap_or(fallback.lon);

        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError(format!("latitude {} out of range", lat)));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError(format!("longitude {} out of range", lon)));
        }

        Ok((lat, lon))
    }
}

#[derive(Serialize)]
struct Success<T: Serialize> {
    status: &'static str,
    data: T,
}

impl<T: Serialize> Success<T> {
    fn new(data: T) -> Self {
        Self { status: "success", data }
    }
}

#[derive(Serialize)]
struct Failure {
    status: &'static str,
    message: &'static str,
}

#[derive(Serialize)]
struct WeatherInsights {
    weather: WeatherRecord,
    insights: Vec<Insight>,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    forecast: bool,
    webcams: bool,
    map: bool,
}

/// Registers all routes
///
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .service(index)
        .service(map_view)
        .service(weather_view)
        .service(api_weather)
        .service(api_insights)
        .service(api_webcams)
        .service(health);
}

#[get("/")]
async fn index(params: web::Query<QueryParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let (lat, lon) = match params.coordinate(&data.fallback) {
        Ok(c) => c,
        Err(e) => return html_error(e),
    };

    let record = get_weather(&data.windy, lat, lon).await;
    let insights = derive_insights(&record);
    let map_html = render_map(lat, lon, data.map_key.as_deref());

    html(pages::dashboard_page(&record, &insights, &map_html, &query_string(lat, lon)))
}

#[get("/map")]
async fn map_view(params: web::Query<QueryParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let (lat, lon) = match params.coordinate(&data.fallback) {
        Ok(c) => c,
        Err(e) => return html_error(e),
    };

    let map_html = render_map(lat, lon, data.map_key.as_deref());
    html(pages::map_page(&format_location(lat, lon), &map_html, &query_string(lat, lon)))
}

#[get("/weather")]
async fn weather_view(params: web::Query<QueryParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let (lat, lon) = match params.coordinate(&data.fallback) {
        Ok(c) => c,
        Err(e) => return html_error(e),
    };

    let record = get_weather(&data.windy, lat, lon).await;
    let insights = derive_insights(&record);

    html(pages::weather_page(&record, &insights, &query_string(lat, lon)))
}

#[get("/api/weather")]
async fn api_weather(params: web::Query<QueryParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    match params.coordinate(&data.fallback) {
        Ok((lat, lon)) => HttpResponse::Ok().json(Success::new(get_weather(&data.windy, lat, lon).await)),
        Err(e) => json_error(e),
    }
}

#[get("/api/insights")]
async fn api_insights(params: web::Query<QueryParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    match params.coordinate(&data.fallback) {
        Ok((lat, lon)) => {
            let record = get_weather(&data.windy, lat, lon).await;
            let insights = derive_insights(&record);
            HttpResponse::Ok().json(Success::new(WeatherInsights { weather: record, insights }))
        }
        Err(e) => json_error(e),
    }
}

#[get("/api/webcams")]
async fn api_webcams(params: web::Query<QueryParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    match params.coordinate(&data.fallback) {
        Ok((lat, lon)) => {
            let radius = params.radius.unwrap_or_else(|| data.windy.webcam_radius());
            HttpResponse::Ok().json(Success::new(data.windy.webcams_or_empty(lat, lon, radius).await))
        }
        Err(e) => json_error(e),
    }
}

#[get("/health")]
async fn health(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(Health {
        status: "ok",
        forecast: data.windy.forecast_enabled(),
        webcams: data.windy.webcams_enabled(),
        map: data.map_key.is_some(),
    })
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type("text/html; charset=utf-8").body(body)
}

fn html_error(e: CoordinateError) -> HttpResponse {
    warn!("rejected request: {}", e);
    html_bad_request()
}

fn json_error(e: CoordinateError) -> HttpResponse {
    warn!("rejected request: {}", e);
    json_bad_request()
}

fn html_bad_request() -> HttpResponse {
    HttpResponse::BadRequest()
        .content_type("text/html; charset=utf-8")
        .body(pages::error_page(INVALID_COORDINATES))
}

fn json_bad_request() -> HttpResponse {
    HttpResponse::BadRequest().json(Failure { status: "error", message: INVALID_COORDINATES })
}

/// Query strings that fail to deserialize get the same 400 as out of range coordinates,
/// JSON under /api and an error page elsewhere
fn query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("rejected query '{}': {}", req.query_string(), err);

    let response = if req.path().starts_with("/api/") {
        json_bad_request()
    } else {
        html_bad_request()
    };
    InternalError::from_response(err, response).into()
}

fn query_string(lat: f64, lon: f64) -> String {
    format!("?lat={}&lon={}", lat, lon)
}
