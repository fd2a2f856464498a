use serde::{Deserialize, Serialize};

/// Conversion factor from km/h to m/s.
pub const KPH_TO_MPS: f64 = 0.27778;

/// A single point-in-time weather reading for a location, normalized across
/// providers. Temperatures are whole degrees Celsius and wind speed is m/s
/// with one decimal place, regardless of which provider answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub provider: String,
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temperature_min_c: f64,
    pub temperature_max_c: f64,
    /// 0–100 by provider contract only; out-of-range values pass through.
    pub humidity_percent: u8,
    pub wind_speed_mps: f64,
    pub condition_summary: String,
    pub condition_description: String,
    /// Icon URL, or empty when the provider has none.
    pub icon_ref: String,
}

/// Round a temperature to whole degrees Celsius.
pub fn round_temp_c(value: f64) -> f64 {
    value.round()
}

/// Round a wind speed to one decimal place.
pub fn round_wind_mps(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Convert km/h to m/s, unrounded.
pub fn kph_to_mps(kph: f64) -> f64 {
    kph * KPH_TO_MPS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperatures_round_to_whole_degrees() {
        assert_eq!(round_temp_c(21.4), 21.0);
        assert_eq!(round_temp_c(21.5), 22.0);
        assert_eq!(round_temp_c(-0.4), -0.0);
    }

    #[test]
    fn wind_rounds_to_one_decimal() {
        assert_eq!(round_wind_mps(3.64), 3.6);
        assert_eq!(round_wind_mps(3.65), 3.7);
    }

    #[test]
    fn kph_conversion_matches_reference_factor() {
        // 36 km/h is the reference case: 36 * 0.27778 rounds to 10.0 m/s.
        assert_eq!(round_wind_mps(kph_to_mps(36.0)), 10.0);
    }

    #[test]
    fn snapshot_serializes_roundtrip() {
        let snapshot = WeatherSnapshot {
            provider: "openweather".to_string(),
            location_name: "London".to_string(),
            temperature_c: 21.0,
            feels_like_c: 20.0,
            temperature_min_c: 18.0,
            temperature_max_c: 24.0,
            humidity_percent: 44,
            wind_speed_mps: 3.6,
            condition_summary: "Clouds".to_string(),
            condition_description: "scattered clouds".to_string(),
            icon_ref: String::new(),
        };

        let json = serde_json::to_string(&snapshot).expect("serialize");
        let back: WeatherSnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, snapshot);
    }
}
