use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// OpenWeatherMap's 1 (good) to 5 (very poor) air quality scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AirQualityIndex(pub u8);

impl fmt::Display for AirQualityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => f.write_str("Good"),
            2 => f.write_str("Fair"),
            3 => f.write_str("Moderate"),
            4 => f.write_str("Poor"),
            5 => f.write_str("Very Poor"),
            other => write!(f, "Air Quality: {other}"),
        }
    }
}

/// Pollutants reported in the `components` map. Any other key is a decode error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum Concentration {
    #[serde(rename = "co")]
    Co,
    #[serde(rename = "no")]
    No,
    #[serde(rename = "no2")]
    No2,
    #[serde(rename = "o3")]
    O3,
    #[serde(rename = "so2")]
    So2,
    #[serde(rename = "pm2_5")]
    Pm2_5,
    #[serde(rename = "pm10")]
    Pm10,
    #[serde(rename = "nh3")]
    Nh3,
}

impl Concentration {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Co => "co",
            Self::No => "no",
            Self::No2 => "no2",
            Self::O3 => "o3",
            Self::So2 => "so2",
            Self::Pm2_5 => "pm2_5",
            Self::Pm10 => "pm10",
            Self::Nh3 => "nh3",
        }
    }
}

impl fmt::Display for Concentration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key().to_uppercase().replace('_', "."))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PollutionSnapshot {
    pub observed_at: DateTime<Utc>,
    pub aqi: AirQualityIndex,
    /// Concentrations in μg/m³.
    pub components: BTreeMap<Concentration, f64>,
}

impl PollutionSnapshot {
    #[must_use]
    pub fn headline(&self) -> String {
        format!("Air Quality: {}", self.aqi)
    }

    /// `("PM2.5", "3.4")` style rows, ordered by pollutant.
    #[must_use]
    pub fn component_rows(&self) -> Vec<(String, String)> {
        self.components
            .iter()
            .map(|(key, value)| (key.to_string(), format!("{value:.1}")))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AqiPoint {
    pub time: DateTime<Utc>,
    pub aqi: AirQualityIndex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_labels_cover_scale_and_fallback() {
        assert_eq!(AirQualityIndex(1).to_string(), "Good");
        assert_eq!(AirQualityIndex(5).to_string(), "Very Poor");
        assert_eq!(AirQualityIndex(9).to_string(), "Air Quality: 9");
    }

    #[test]
    fn pollutant_names_are_upper_cased_with_dots() {
        assert_eq!(Concentration::Pm2_5.to_string(), "PM2.5");
        assert_eq!(Concentration::No2.to_string(), "NO2");
    }

    #[test]
    fn components_decode_from_api_keys() {
        let parsed: BTreeMap<Concentration, f64> =
            serde_json::from_str(r#"{"pm2_5": 3.44, "co": 201.94}"#).unwrap();
        let snapshot = PollutionSnapshot {
            observed_at: Utc::now(),
            aqi: AirQualityIndex(2),
            components: parsed,
        };

        assert_eq!(snapshot.headline(), "Air Quality: Fair");
        assert_eq!(
            snapshot.component_rows(),
            vec![
                ("CO".to_string(), "201.9".to_string()),
                ("PM2.5".to_string(), "3.4".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_pollutant_key_is_rejected() {
        let parsed = serde_json::from_str::<BTreeMap<Concentration, f64>>(r#"{"xx": 1.0}"#);
        assert!(parsed.is_err());
    }
}
