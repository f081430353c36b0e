use serde::{Serialize, Serializer};
use crate::manager_windy::models::WeatherRecord;

const DEFAULT_TEMPERATURE: f64 = 0.0;
const DEFAULT_PRESSURE: f64 = 1013.0;
const DEFAULT_HUMIDITY: f64 = 50.0;

/// Advisory derived from a weather record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insight {
    FreezeWarning,
    ColdAlert,
    HeatAdvisory,
    OptimalComfort,
    LowPressure,
    HighPressure,
    HighHumidity,
    DryAir,
    Stable,
}

impl Insight {
    pub fn message(&self) -> &'static str {
        match self {
            Insight::FreezeWarning => "Freeze warning: temperatures are below 0°C, watch out for ice.",
            Insight::ColdAlert => "Cold alert: temperatures are below 10°C, dress warmly.",
            Insight::HeatAdvisory => "Heat advisory: temperatures are above 30°C, stay hydrated and avoid the midday sun.",
            Insight::OptimalComfort => "Optimal comfort: temperatures between 18°C and 25°C are ideal for outdoor activities.",
            Insight::LowPressure => "Low pressure system: unsettled weather and storms are possible.",
            Insight::HighPressure => "High pressure system: expect clear and calm conditions.",
            Insight::HighHumidity => "High humidity: it may feel muggy and warmer than it is.",
            Insight::DryAir => "Dry air: low humidity, consider moisturizing and drinking water.",
            Insight::Stable => "Conditions are stable, no notable weather concerns.",
        }
    }
}

impl Serialize for Insight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Derives advisories from temperature, pressure and humidity.
///
/// Temperature rules are exclusive among themselves, pressure and humidity are evaluated
/// independently. The result is never empty.
///
/// # Arguments
///
/// * 'record' - normalized weather record
pub fn derive_insights(record: &WeatherRecord) -> Vec<Insight> {
    let temp = record.temperature.unwrap_or(DEFAULT_TEMPERATURE);
    let pressure = record.pressure.unwrap_or(DEFAULT_PRESSURE);
    let humidity = record.humidity.unwrap_or(DEFAULT_HUMIDITY);

    let mut insights = Vec::new();

    if temp < 0.0 {
        insights.push(Insight::FreezeWarning);
    } else if temp < 10.0 {
        insights.push(Insight::ColdAlert);
    } else if temp > 30.0 {
        insights.push(Insight::HeatAdvisory);
    } else if (18.0..=25.0).contains(&temp) {
        insights.push(Insight::OptimalComfort);
    }

    if pressure < 1000.0 {
        insights.push(Insight::LowPressure);
    } else if pressure > 1020.0 {
        insights.push(Insight::HighPressure);
    }

    if humidity > 80.0 {
        insights.push(Insight::HighHumidity);
    } else if humidity < 30.0 {
        insights.push(Insight::DryAir);
    }

    if insights.is_empty() {
        insights.push(Insight::Stable);
    }

    insights
}
