#![allow(clippy::cast_possible_truncation)]

use std::{collections::HashMap, fmt};

use chrono::{DateTime, Duration, FixedOffset, Offset, TimeZone, Utc};

use crate::{
    cli::IconMode,
    domain::{
        forecast::{DaySummary, ForecastSeries},
        pollution::{AqiPoint, PollutionSnapshot},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        ((-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude))
            .then_some(Self {
                latitude,
                longitude,
            })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// What the user asked to see: a place name to geocode, or a point.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchTarget {
    Named(String),
    Coordinates(Coordinates),
}

impl FetchTarget {
    /// Parses search box input. `"lat,lon"` becomes a coordinate target,
    /// anything else a place name. Blank input yields `None`.
    #[must_use]
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        if let Some((lat, lon)) = query.split_once(',')
            && let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>())
            && let Some(coords) = Coordinates::new(lat, lon)
        {
            return Some(Self::Coordinates(coords));
        }
        Some(Self::Named(query.to_string()))
    }
}

impl fmt::Display for FetchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Coordinates(coords) => coords.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    pub name: String,
    pub local_names: HashMap<String, String>,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub state: Option<String>,
}

impl GeoLocation {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCondition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wind {
    pub speed_ms: f32,
    pub direction_deg: i32,
    pub gust_ms: Option<f32>,
}

/// Rain or snow volume in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Precipitation {
    pub last_1h_mm: Option<f32>,
    pub last_3h_mm: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub place_name: String,
    pub coordinates: Coordinates,
    pub conditions: Vec<WeatherCondition>,
    pub temp_c: f32,
    pub feels_like_c: f32,
    pub temp_min_c: f32,
    pub temp_max_c: f32,
    pub pressure_hpa: i32,
    pub humidity_pct: u8,
    pub visibility_m: Option<u32>,
    pub wind: Option<Wind>,
    pub cloud_cover_pct: Option<u8>,
    pub rain: Option<Precipitation>,
    pub snow: Option<Precipitation>,
    pub observed_at: DateTime<Utc>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub utc_offset_secs: i32,
}

impl CurrentWeather {
    #[must_use]
    pub fn primary_icon(&self) -> Option<&str> {
        self.conditions.first().map(|c| c.icon.as_str())
    }
}

/// Everything one fetch produced. Each dataset is independently optional.
#[derive(Debug, Clone)]
pub struct WeatherBundle {
    pub target: FetchTarget,
    pub location: Option<GeoLocation>,
    pub current: Option<CurrentWeather>,
    pub pollution: Option<PollutionSnapshot>,
    pub forecast: Option<ForecastSeries>,
    pub pollution_forecast: Option<Vec<AqiPoint>>,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherBundle {
    #[must_use]
    pub fn empty(target: FetchTarget) -> Self {
        Self {
            target,
            location: None,
            current: None,
            pollution: None,
            forecast: None,
            pollution_forecast: None,
            fetched_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
            && self.pollution.is_none()
            && self.forecast.is_none()
            && self.pollution_forecast.is_none()
    }

    #[must_use]
    pub fn title(&self) -> String {
        if let Some(location) = &self.location {
            return location.display_name();
        }
        match &self.current {
            Some(current) if !current.place_name.is_empty() => current.place_name.clone(),
            _ => self.target.to_string(),
        }
    }

    pub fn five_day<Tz: TimeZone>(&self, tz: &Tz) -> Vec<DaySummary> {
        self.forecast
            .as_ref()
            .map(|series| series.five_day(tz))
            .unwrap_or_default()
    }
}

/// Display strings for the current-conditions panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionsSummary {
    pub description: Option<String>,
    pub temp: String,
    pub feels_like: String,
    pub min_temp: Option<String>,
    pub max_temp: Option<String>,
    pub humidity: String,
    pub pressure: String,
    pub snow: Option<String>,
    pub rain: Option<String>,
    pub clouds: Option<String>,
    pub wind: Option<String>,
}

/// Builds the conditions panel, widening today's min/max with the next
/// 24 hours of forecast when a forecast is available.
#[must_use]
pub fn summarize_conditions(
    current: &CurrentWeather,
    forecast: Option<&ForecastSeries>,
    now: DateTime<Utc>,
    units: Units,
) -> ConditionsSummary {
    let extremes = forecast.and_then(|series| series.extremes_within(Duration::hours(24), now));
    let (min_temp, max_temp) = match extremes {
        Some((lo, hi)) => (
            Some(temp_string(lo.min(current.temp_min_c), units)),
            Some(temp_string(hi.max(current.temp_max_c), units)),
        ),
        None => (None, None),
    };

    ConditionsSummary {
        description: current.conditions.first().map(|c| c.description.clone()),
        temp: temp_string(current.temp_c, units),
        feels_like: temp_string(current.feels_like_c, units),
        min_temp,
        max_temp,
        humidity: format!("{}%", current.humidity_pct),
        pressure: format!("{} hPa", current.pressure_hpa),
        snow: current.snow.map(snow_label),
        rain: current.rain.map(rain_label),
        clouds: current.cloud_cover_pct.map(|pct| format!("{pct}% coverage")),
        wind: current.wind.map(|wind| {
            format!(
                "{:.1} km/h, dir: {}°",
                wind.speed_ms * 3.6,
                wind.direction_deg
            )
        }),
    }
}

fn snow_label(snow: Precipitation) -> String {
    if let Some(h) = snow.last_1h_mm {
        format!("{:.1} cm in next hour", h * 10.0)
    } else if let Some(h) = snow.last_3h_mm {
        format!("{:.2} cm in next 3 hours", h * 10.0)
    } else {
        String::new()
    }
}

fn rain_label(rain: Precipitation) -> String {
    if let Some(h) = rain.last_1h_mm {
        format!("{h:.1} mm in next hour")
    } else if let Some(h) = rain.last_3h_mm {
        format!("{h:.2} mm in next 3 hours")
    } else {
        String::new()
    }
}

/// Sun times for the header, in the viewer's zone and the location's zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoSummary {
    pub location: String,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub sunrise_local: Option<String>,
    pub sunset_local: Option<String>,
    pub time_offset: String,
}

#[must_use]
pub fn summarize_geo<Tz>(current: &CurrentWeather, now: &DateTime<Tz>) -> GeoSummary
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let viewer_zone = now.timezone();
    let location_zone =
        FixedOffset::east_opt(current.utc_offset_secs).unwrap_or_else(|| Utc.fix());
    let offset_secs = current.utc_offset_secs - now.offset().fix().local_minus_utc();

    let in_viewer = |ts: DateTime<Utc>| ts.with_timezone(&viewer_zone).format("%H:%M").to_string();
    let in_location =
        |ts: DateTime<Utc>| ts.with_timezone(&location_zone).format("%H:%M").to_string();

    let (sunrise, sunset, sunrise_local, sunset_local) = match (current.sunrise, current.sunset) {
        (Some(rise), Some(set)) => (
            Some(in_viewer(rise)),
            Some(in_viewer(set)),
            Some(in_location(rise)),
            Some(in_location(set)),
        ),
        _ => (None, None, None, None),
    };

    GeoSummary {
        location: current.coordinates.to_string(),
        sunrise,
        sunset,
        sunrise_local,
        sunset_local,
        time_offset: format!(
            "{}{}H",
            if offset_secs < 0 { "-" } else { "+" },
            offset_secs.abs() / 3600
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCategory {
    Clear,
    Cloudy,
    Rain,
    Snow,
    Fog,
    Thunder,
    Unknown,
}

/// Maps an OpenWeatherMap icon id such as `"10d"` to a category.
#[must_use]
pub fn icon_category(icon: &str) -> WeatherCategory {
    match icon.get(..2) {
        Some("01") => WeatherCategory::Clear,
        Some("02" | "03" | "04") => WeatherCategory::Cloudy,
        Some("09" | "10") => WeatherCategory::Rain,
        Some("11") => WeatherCategory::Thunder,
        Some("13") => WeatherCategory::Snow,
        Some("50") => WeatherCategory::Fog,
        _ => WeatherCategory::Unknown,
    }
}

#[must_use]
pub fn icon_glyph(icon: Option<&str>, mode: IconMode) -> &'static str {
    let Some(icon) = icon else {
        return match mode {
            IconMode::Ascii => "   ",
            IconMode::Unicode => "·",
        };
    };
    let night = icon.ends_with('n');
    match (mode, icon_category(icon)) {
        (IconMode::Ascii, WeatherCategory::Clear) if night => "MON",
        (IconMode::Ascii, WeatherCategory::Clear) => "SUN",
        (IconMode::Ascii, WeatherCategory::Cloudy) => "CLD",
        (IconMode::Ascii, WeatherCategory::Rain) => "RAN",
        (IconMode::Ascii, WeatherCategory::Snow) => "SNW",
        (IconMode::Ascii, WeatherCategory::Fog) => "FOG",
        (IconMode::Ascii, WeatherCategory::Thunder) => "THN",
        (IconMode::Ascii, WeatherCategory::Unknown) => "---",
        (IconMode::Unicode, WeatherCategory::Clear) if night => "☾",
        (IconMode::Unicode, WeatherCategory::Clear) => "☀",
        (IconMode::Unicode, WeatherCategory::Cloudy | WeatherCategory::Unknown) => "☁",
        (IconMode::Unicode, WeatherCategory::Rain) => "☂",
        (IconMode::Unicode, WeatherCategory::Snow) => "❄",
        (IconMode::Unicode, WeatherCategory::Fog) => "░",
        (IconMode::Unicode, WeatherCategory::Thunder) => "⚡",
    }
}

#[must_use]
pub fn convert_temp(celsius: f32, units: Units) -> f32 {
    match units {
        Units::Celsius => celsius,
        Units::Fahrenheit => celsius * 1.8 + 32.0,
    }
}

#[must_use]
pub fn round_temp(value: f32) -> i32 {
    value.round() as i32
}

/// `"12°"`, rounded half away from zero in the requested units.
#[must_use]
pub fn temp_string(celsius: f32, units: Units) -> String {
    format!("{}°", round_temp(convert_temp(celsius, units)))
}

#[must_use]
pub fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}
