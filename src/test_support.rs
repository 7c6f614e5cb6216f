use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::{
    cli::{Cli, UnitsArg},
    domain::{
        forecast::{ForecastPoint, ForecastSeries},
        pollution::{AirQualityIndex, AqiPoint, Concentration, PollutionSnapshot},
        weather::{
            Coordinates, CurrentWeather, FetchTarget, GeoLocation, Precipitation, WeatherBundle,
            WeatherCondition, Wind,
        },
    },
};

pub(crate) const HONOLULU_OFFSET_SECS: i32 = -10 * 3600;

pub(crate) fn state_test_cli() -> Cli {
    Cli {
        city: Some("Honolulu".to_string()),
        api_key: Some("test-key".to_string()),
        base_url: None,
        units: UnitsArg::Celsius,
        lat: None,
        lon: None,
        ascii_icons: false,
        location_time: true,
        refresh_interval: 600,
        one_shot: false,
        log_file: None,
    }
}

pub(crate) fn utc(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0)
        .single()
        .expect("valid fixture time")
}

pub(crate) fn honolulu_current() -> CurrentWeather {
    CurrentWeather {
        place_name: "Honolulu".to_string(),
        coordinates: Coordinates {
            latitude: 21.3069,
            longitude: -157.8583,
        },
        conditions: vec![WeatherCondition {
            id: 500,
            main: "Rain".to_string(),
            description: "light rain".to_string(),
            icon: "10d".to_string(),
        }],
        temp_c: 26.4,
        feels_like_c: 27.5,
        temp_min_c: 24.0,
        temp_max_c: 28.0,
        pressure_hpa: 1015,
        humidity_pct: 74,
        visibility_m: Some(10_000),
        wind: Some(Wind {
            speed_ms: 5.0,
            direction_deg: 70,
            gust_ms: None,
        }),
        cloud_cover_pct: Some(40),
        rain: Some(Precipitation {
            last_1h_mm: Some(0.3),
            last_3h_mm: None,
        }),
        snow: None,
        observed_at: utc(10, 22),
        sunrise: Some(utc(10, 16) + Duration::minutes(45)),
        sunset: Some(utc(11, 4) + Duration::minutes(40)),
        utc_offset_secs: HONOLULU_OFFSET_SECS,
    }
}

/// `count` 3-hourly points from `start`, warming by one degree per step.
pub(crate) fn forecast_series(start: DateTime<Utc>, count: usize) -> ForecastSeries {
    let points = (0..count)
        .map(|idx| ForecastPoint {
            timestamp: start + Duration::hours(3 * idx as i64),
            temp_c: 20.0 + idx as f32,
            temp_min_c: 19.5 + idx as f32,
            temp_max_c: 20.5 + idx as f32,
            icon: Some(if idx % 2 == 0 { "01d" } else { "10n" }.to_string()),
            sunrise: None,
        })
        .collect();
    ForecastSeries {
        points,
        utc_offset_secs: HONOLULU_OFFSET_SECS,
    }
}

pub(crate) fn honolulu_bundle() -> WeatherBundle {
    let start = utc(10, 12);
    WeatherBundle {
        target: FetchTarget::Named("Honolulu".to_string()),
        location: Some(GeoLocation {
            name: "Honolulu".to_string(),
            local_names: Default::default(),
            latitude: 21.3069,
            longitude: -157.8583,
            country: "US".to_string(),
            state: Some("Hawaii".to_string()),
        }),
        current: Some(honolulu_current()),
        pollution: Some(PollutionSnapshot {
            observed_at: start,
            aqi: AirQualityIndex(2),
            components: [(Concentration::Co, 201.94), (Concentration::Pm2_5, 3.4)]
                .into_iter()
                .collect(),
        }),
        forecast: Some(forecast_series(start, 40)),
        pollution_forecast: Some(
            (0..24)
                .map(|idx| AqiPoint {
                    time: start + Duration::hours(idx),
                    aqi: AirQualityIndex(1 + (idx % 5) as u8),
                })
                .collect(),
        ),
        fetched_at: start,
    }
}
