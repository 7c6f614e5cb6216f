//! Wire shapes of the OpenWeatherMap 2.5 payloads and their domain mapping.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::domain::{
    forecast::{ForecastPoint, ForecastSeries},
    pollution::{AirQualityIndex, AqiPoint, Concentration, PollutionSnapshot},
    weather::{
        Coordinates, CurrentWeather, GeoLocation, Precipitation, WeatherCondition, Wind, timestamp,
    },
};

#[derive(Debug, Deserialize)]
pub(crate) struct GeoResult {
    name: String,
    #[serde(default)]
    local_names: Option<HashMap<String, String>>,
    lat: f64,
    lon: f64,
    #[serde(default)]
    country: String,
    state: Option<String>,
}

impl From<GeoResult> for GeoLocation {
    fn from(result: GeoResult) -> Self {
        Self {
            name: result.name,
            local_names: result.local_names.unwrap_or_default(),
            latitude: result.lat,
            longitude: result.lon,
            country: result.country,
            state: result.state,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CoordBlock {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    id: u32,
    main: String,
    description: String,
    icon: String,
}

impl From<ConditionBlock> for WeatherCondition {
    fn from(block: ConditionBlock) -> Self {
        Self {
            id: block.id,
            main: block.main,
            description: block.description,
            icon: block.icon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f32,
    feels_like: f32,
    temp_min: f32,
    temp_max: f32,
    pressure: i32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f32,
    deg: i32,
    gust: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct CloudsBlock {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct VolumeBlock {
    #[serde(rename = "1h")]
    one_hour: Option<f32>,
    #[serde(rename = "3h")]
    three_hours: Option<f32>,
}

impl From<VolumeBlock> for Precipitation {
    fn from(block: VolumeBlock) -> Self {
        Self {
            last_1h_mm: block.one_hour,
            last_3h_mm: block.three_hours,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SysBlock {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WeatherResponse {
    coord: CoordBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    main: MainBlock,
    visibility: Option<u32>,
    wind: Option<WindBlock>,
    clouds: Option<CloudsBlock>,
    rain: Option<VolumeBlock>,
    snow: Option<VolumeBlock>,
    dt: i64,
    sys: SysBlock,
    #[serde(default)]
    timezone: i32,
    #[serde(default)]
    name: String,
}

impl WeatherResponse {
    pub(crate) fn into_domain(self) -> CurrentWeather {
        CurrentWeather {
            place_name: self.name,
            coordinates: Coordinates {
                latitude: self.coord.lat,
                longitude: self.coord.lon,
            },
            conditions: self.weather.into_iter().map(Into::into).collect(),
            temp_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            temp_min_c: self.main.temp_min,
            temp_max_c: self.main.temp_max,
            pressure_hpa: self.main.pressure,
            humidity_pct: self.main.humidity,
            visibility_m: self.visibility,
            wind: self.wind.map(|w| Wind {
                speed_ms: w.speed,
                direction_deg: w.deg,
                gust_ms: w.gust,
            }),
            cloud_cover_pct: self.clouds.map(|c| c.all),
            rain: self.rain.map(Into::into),
            snow: self.snow.map(Into::into),
            observed_at: timestamp(self.dt).unwrap_or_default(),
            sunrise: self.sys.sunrise.and_then(timestamp),
            sunset: self.sys.sunset.and_then(timestamp),
            utc_offset_secs: self.timezone,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastSysBlock {
    sunrise: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: MainBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    sys: Option<ForecastSysBlock>,
}

#[derive(Debug, Deserialize)]
struct CityBlock {
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    list: Vec<ForecastEntry>,
    city: Option<CityBlock>,
}

impl ForecastResponse {
    /// Entries with an unrepresentable timestamp are skipped.
    pub(crate) fn into_domain(self) -> ForecastSeries {
        let points = self
            .list
            .into_iter()
            .filter_map(|entry| {
                Some(ForecastPoint {
                    timestamp: timestamp(entry.dt)?,
                    temp_c: entry.main.temp,
                    temp_min_c: entry.main.temp_min,
                    temp_max_c: entry.main.temp_max,
                    icon: entry.weather.into_iter().next().map(|c| c.icon),
                    sunrise: entry.sys.and_then(|s| s.sunrise).and_then(timestamp),
                })
            })
            .collect();

        ForecastSeries {
            points,
            utc_offset_secs: self.city.map_or(0, |c| c.timezone),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AqiBlock {
    aqi: u8,
}

#[derive(Debug, Deserialize)]
struct PollutionEntry {
    dt: i64,
    main: AqiBlock,
    components: BTreeMap<Concentration, f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PollutionResponse {
    list: Vec<PollutionEntry>,
}

impl PollutionResponse {
    pub(crate) fn into_snapshots(self) -> Vec<PollutionSnapshot> {
        self.list
            .into_iter()
            .filter_map(|entry| {
                Some(PollutionSnapshot {
                    observed_at: timestamp(entry.dt)?,
                    aqi: AirQualityIndex(entry.main.aqi),
                    components: entry.components,
                })
            })
            .collect()
    }

    pub(crate) fn into_aqi_points(self) -> Vec<AqiPoint> {
        self.list
            .into_iter()
            .filter_map(|entry| {
                Some(AqiPoint {
                    time: timestamp(entry.dt)?,
                    aqi: AirQualityIndex(entry.main.aqi),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORECAST_JSON: &str = r#"{
        "cod": "200",
        "message": 0,
        "cnt": 2,
        "list": [
            {
                "dt": 1773180000,
                "main": {"temp": 25.3, "feels_like": 25.9, "temp_min": 24.8, "temp_max": 25.3,
                         "pressure": 1016, "humidity": 70},
                "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04n"}],
                "sys": {"pod": "n"},
                "dt_txt": "2026-03-10 22:00:00"
            },
            {
                "dt": 1773190800,
                "main": {"temp": 24.1, "feels_like": 24.6, "temp_min": 24.1, "temp_max": 24.1,
                         "pressure": 1016, "humidity": 74},
                "weather": [],
                "sys": {"pod": "n", "sunrise": 1773160000}
            }
        ],
        "city": {"id": 5856195, "name": "Honolulu", "timezone": -36000}
    }"#;

    #[test]
    fn forecast_maps_first_condition_icon_and_optional_sunrise() {
        let payload: ForecastResponse = serde_json::from_str(FORECAST_JSON).unwrap();
        let series = payload.into_domain();

        assert_eq!(series.utc_offset_secs, -36000);
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].icon.as_deref(), Some("04n"));
        assert_eq!(series.points[0].temp_min_c, 24.8);
        assert_eq!(series.points[0].sunrise, None);
        assert_eq!(series.points[1].icon, None);
        assert_eq!(series.points[1].sunrise, timestamp(1_773_160_000));
    }

    #[test]
    fn current_weather_reads_volume_and_cloud_blocks() {
        let body = r#"{
            "coord": {"lon": -157.8583, "lat": 21.3069},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "base": "stations",
            "main": {"temp": 26.4, "feels_like": 27.5, "temp_min": 24.0, "temp_max": 28.0,
                     "pressure": 1015, "humidity": 74},
            "visibility": 10000,
            "wind": {"speed": 5.1, "deg": 70},
            "clouds": {"all": 40},
            "rain": {"1h": 0.3},
            "dt": 1773180000,
            "sys": {"type": 2, "id": 2035211, "country": "US", "sunrise": 1773161100, "sunset": 1773204000},
            "timezone": -36000,
            "id": 5856195,
            "name": "Honolulu",
            "cod": 200
        }"#;

        let payload: WeatherResponse = serde_json::from_str(body).unwrap();
        let current = payload.into_domain();

        assert_eq!(current.place_name, "Honolulu");
        assert_eq!(current.cloud_cover_pct, Some(40));
        assert_eq!(current.rain.and_then(|r| r.last_1h_mm), Some(0.3));
        assert_eq!(current.snow, None);
        assert_eq!(current.primary_icon(), Some("10d"));
        assert_eq!(current.utc_offset_secs, -36000);
    }

    #[test]
    fn pollution_list_maps_to_snapshot_and_points() {
        let body = r#"{
            "coord": {"lon": 18.07, "lat": 59.33},
            "list": [
                {"dt": 1773180000, "main": {"aqi": 2},
                 "components": {"co": 201.94, "no": 0.02, "pm2_5": 3.4}},
                {"dt": 1773183600, "main": {"aqi": 3},
                 "components": {"co": 210.0}}
            ]
        }"#;

        let points = serde_json::from_str::<PollutionResponse>(body)
            .unwrap()
            .into_aqi_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].aqi, AirQualityIndex(3));

        let snapshots = serde_json::from_str::<PollutionResponse>(body)
            .unwrap()
            .into_snapshots();
        assert_eq!(snapshots[0].components.len(), 3);
        assert_eq!(snapshots[0].components[&Concentration::Pm2_5], 3.4);
    }
}
