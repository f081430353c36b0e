use serde::Serialize;
use crate::pages::escape_html;

const EMBED_URL: &str = "https://embed.windy.com/embed2.html";
const WIDTH: u32 = 650;
const HEIGHT: u32 = 450;
const ZOOM: u8 = 5;

#[derive(Serialize)]
struct WindyInitOptions<'a> {
    key: &'a str,
    lat: f64,
    lon: f64,
    zoom: u8,
}

/// Returns the HTML for a Windy map centered on the given location.
///
/// With a map key the interactive Map Forecast API is used, otherwise the
/// keyless embed iframe.
///
/// # Arguments
///
/// * 'lat' - latitude of the location
/// * 'lon' - longitude of the location
/// * 'map_key' - optional Windy map forecast key
pub fn render_map(lat: f64, lon: f64, map_key: Option<&str>) -> String {
    match map_key {
        Some(key) => interactive_map(lat, lon, key),
        None => embed_iframe(lat, lon),
    }
}

pub fn embed_url(lat: f64, lon: f64) -> String {
    format!(
        "{}?lat={lat}&lon={lon}&detailLat={lat}&detailLon={lon}&width={}&height={}&zoom={}\
         &level=surface&overlay=wind&product=ecmwf&menu=&message=true&marker=&calendar=now\
         &pressure=&type=map&location=coordinates&detail=&metricWind=default&metricTemp=default&radarRange=-1",
        EMBED_URL, WIDTH, HEIGHT, ZOOM, lat = lat, lon = lon
    )
}

fn embed_iframe(lat: f64, lon: f64) -> String {
    format!(
        "<iframe width=\"{}\" height=\"{}\" src=\"{}\" frameborder=\"0\"></iframe>",
        WIDTH, HEIGHT, escape_html(&embed_url(lat, lon))
    )
}

fn interactive_map(lat: f64, lon: f64, key: &str) -> String {
    let options = WindyInitOptions { key, lat, lon, zoom: ZOOM };
    let options = serde_json::to_string(&options)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");

    format!(
        r#"<script src="https://unpkg.com/leaflet@1.4.0/dist/leaflet.js"></script>
<script src="https://api.windy.com/assets/map-forecast/libBoot.js"></script>
<div id="windy" style="width: {}px; height: {}px;"></div>
<script>
windyInit({}, windyAPI => {{
    const {{ map }} = windyAPI;
    L.marker([{}, {}]).addTo(map);
}});
</script>"#,
        WIDTH, HEIGHT, options, lat, lon
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iframe_without_key() {
        let html = render_map(50.4, 14.3, None);

        assert!(html.starts_with("<iframe"));
        assert!(html.contains("embed2.html?lat=50.4&amp;lon=14.3&amp;detailLat=50.4&amp;detailLon=14.3"));
        assert!(html.contains("overlay=wind"));
        assert!(!html.contains("windyInit"));
    }

    #[test]
    fn embed_url_matches_windy_format() {
        let url = embed_url(1.5, -2.25);
        assert!(url.starts_with("https://embed.windy.com/embed2.html?lat=1.5&lon=-2.25&"));
        assert!(url.ends_with("&radarRange=-1"));
        assert!(url.contains("&width=650&height=450&zoom=5&level=surface"));
    }

    #[test]
    fn interactive_map_with_key() {
        let html = render_map(50.4, 14.3, Some("map'key</script>"));

        assert!(html.contains("windyInit("));
        assert!(html.contains(r#""key":"map'key<\/script>""#));
        assert!(html.contains("L.marker([50.4, 14.3])"));
        assert!(!html.contains("<iframe"));
    }
}
