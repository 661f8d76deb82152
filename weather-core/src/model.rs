use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of entries in a successful hourly forecast (next 36 hours).
pub const HOURLY_ENTRIES: usize = 36;

/// Number of entries in a successful daily forecast (next 10 days).
pub const DAILY_ENTRIES: usize = 10;

/// Normalized result of a geolocation lookup.
///
/// Built once per request by the geolocation client and not mutated
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub region_code: String,
    pub city: String,
}

/// Current conditions exactly as returned by the weather provider.
///
/// The gateway forwards the provider payload verbatim; it is never
/// inspected beyond being valid JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrentConditions(pub Value);

/// Ordered hourly forecast entries, one per hour for the next 36 hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourlyForecast(pub Vec<Value>);

/// Ordered daily forecast entries, one per day for the next 10 days.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyForecast(pub Vec<Value>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_serializes_all_fields() {
        let location = Location {
            latitude: 34.17,
            longitude: -118.96,
            region_code: "CA".to_string(),
            city: "Los Angeles".to_string(),
        };

        let value = serde_json::to_value(&location).expect("location must serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "latitude": 34.17,
                "longitude": -118.96,
                "region_code": "CA",
                "city": "Los Angeles",
            })
        );
    }

    #[test]
    fn forecast_payloads_serialize_transparently() {
        let hourly = HourlyForecast(vec![serde_json::json!({"temp": "61"})]);
        let value = serde_json::to_value(&hourly).expect("forecast must serialize");
        assert_eq!(value, serde_json::json!([{"temp": "61"}]));
    }
}
