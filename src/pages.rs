use crate::insights::Insight;
use crate::manager_windy::models::{WeatherRecord, NOT_AVAILABLE};

const STYLE: &str = "body{font-family:sans-serif;margin:2em;color:#222}\
table{border-collapse:collapse}td,th{padding:4px 12px;border-bottom:1px solid #ddd;text-align:left}\
nav a{margin-right:1em}.placeholder{color:#a60}";

/// Escapes text for use in HTML content and attribute values
///
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Map, weather and insights on one page
///
/// # Arguments
///
/// * 'record' - weather to show
/// * 'insights' - advisories derived from the record
/// * 'map_html' - already rendered map markup
/// * 'query' - coordinate query string to carry over in the navigation links
pub fn dashboard_page(record: &WeatherRecord, insights: &[Insight], map_html: &str, query: &str) -> String {
    let body = format!(
        "<h1>Windy Weather Portal</h1>\n{}\n<section>{}</section>\n{}\n{}",
        navigation(query),
        map_html,
        weather_table(record),
        insight_list(insights)
    );
    layout("Windy Weather Portal", &body)
}

/// Map only
///
pub fn map_page(location: &str, map_html: &str, query: &str) -> String {
    let body = format!(
        "<h1>Weather map</h1>\n{}\n<p>{}</p>\n<section>{}</section>",
        navigation(query),
        escape_html(location),
        map_html
    );
    layout("Weather map", &body)
}

/// Weather and insights without the map
///
pub fn weather_page(record: &WeatherRecord, insights: &[Insight], query: &str) -> String {
    let body = format!(
        "<h1>Current weather</h1>\n{}\n{}\n{}",
        navigation(query),
        weather_table(record),
        insight_list(insights)
    );
    layout("Current weather", &body)
}

pub fn error_page(message: &str) -> String {
    let body = format!("<h1>Request error</h1>\n<p>{}</p>\n{}", escape_html(message), navigation(""));
    layout("Request error", &body)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
         <style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

fn navigation(query: &str) -> String {
    let query = escape_html(query);
    format!(
        "<nav><a href=\"/{q}\">Dashboard</a><a href=\"/map{q}\">Map</a><a href=\"/weather{q}\">Weather</a>\
         <a href=\"/api/insights{q}\">JSON</a></nav>",
        q = query
    )
}

fn weather_table(record: &WeatherRecord) -> String {
    let mut html = String::from("<table>\n");
    let rows = [
        ("Temperature", reading(record.temperature, "°C")),
        ("Dew point", reading(record.dew_point, "°C")),
        ("Wind speed", reading(record.wind_speed, "m/s")),
        ("Pressure", reading(record.pressure, "hPa")),
        ("Humidity", reading(record.humidity, "%")),
        ("Precipitation", reading(record.precipitation, "mm")),
    ];
    for (label, value) in rows {
        html.push_str(&format!("<tr><th>{}</th><td>{}</td></tr>\n", label, value));
    }
    if let Some(condition) = &record.condition {
        html.push_str(&format!("<tr><th>Condition</th><td>{}</td></tr>\n", escape_html(condition)));
    }
    html.push_str(&format!("<tr><th>Location</th><td>{}</td></tr>\n", escape_html(&record.location)));
    if let Some(ts) = record.timestamp {
        html.push_str(&format!("<tr><th>Valid at</th><td>{}</td></tr>\n", ts.format("%Y-%m-%d %H:%M UTC")));
    }
    let class = if record.is_placeholder() { " class=\"placeholder\"" } else { "" };
    html.push_str(&format!("<tr><th>Source</th><td{}>{}</td></tr>\n", class, escape_html(&record.source)));
    html.push_str("</table>");

    html
}

fn insight_list(insights: &[Insight]) -> String {
    let items: String = insights
        .iter()
        .map(|i| format!("<li>{}</li>", escape_html(i.message())))
        .collect();
    format!("<h2>Insights</h2>\n<ul>{}</ul>", items)
}

fn reading(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{} {}", v, unit),
        None => NOT_AVAILABLE.to_string(),
    }
}
