use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use super::models::{ForecastResponse, GeoResult, PollutionResponse, WeatherResponse};
use crate::domain::{
    forecast::ForecastSeries,
    pollution::{AqiPoint, PollutionSnapshot},
    weather::{Coordinates, CurrentWeather, GeoLocation},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/";

const GEOCODE_PATH: &str = "geo/1.0/direct";
const WEATHER_PATH: &str = "data/2.5/weather";
const FORECAST_PATH: &str = "data/2.5/forecast";
const POLLUTION_PATH: &str = "data/2.5/air_pollution";
const POLLUTION_FORECAST_PATH: &str = "data/2.5/air_pollution/forecast";

/// Where and how to reach the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("building http client failed")]
    Client(#[source] reqwest::Error),
    #[error("{endpoint} request failed")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned status {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
    #[error("failed to decode {endpoint} payload")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("no geocoding match for {0:?}")]
    NoMatches(String),
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    config: ApiConfig,
}

impl OpenWeatherClient {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        debug!(endpoint, "requesting");
        let response = self
            .client
            .get(self.config.endpoint(endpoint))
            .query(query)
            .query(&[("appid", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|source| FetchError::Request { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { endpoint, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Request { endpoint, source })?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }

    pub async fn try_geocode(
        &self,
        place: &str,
        limit: u8,
    ) -> Result<Vec<GeoLocation>, FetchError> {
        let results: Vec<GeoResult> = self
            .get_json(
                GEOCODE_PATH,
                &[("q", place.to_string()), ("limit", limit.to_string())],
            )
            .await?;
        if results.is_empty() {
            return Err(FetchError::NoMatches(place.to_string()));
        }
        Ok(results.into_iter().map(GeoLocation::from).collect())
    }

    pub async fn try_current_weather(
        &self,
        coords: Coordinates,
    ) -> Result<CurrentWeather, FetchError> {
        let payload: WeatherResponse = self.get_json(WEATHER_PATH, &metric_query(coords)).await?;
        Ok(payload.into_domain())
    }

    pub async fn try_forecast(&self, coords: Coordinates) -> Result<ForecastSeries, FetchError> {
        let payload: ForecastResponse = self.get_json(FORECAST_PATH, &metric_query(coords)).await?;
        Ok(payload.into_domain())
    }

    pub async fn try_pollution(
        &self,
        coords: Coordinates,
    ) -> Result<Option<PollutionSnapshot>, FetchError> {
        let payload: PollutionResponse =
            self.get_json(POLLUTION_PATH, &coord_query(coords)).await?;
        Ok(payload.into_snapshots().into_iter().next())
    }

    pub async fn try_pollution_forecast(
        &self,
        coords: Coordinates,
    ) -> Result<Vec<AqiPoint>, FetchError> {
        let payload: PollutionResponse = self
            .get_json(POLLUTION_FORECAST_PATH, &coord_query(coords))
            .await?;
        Ok(payload.into_aqi_points())
    }

    /// Up to `limit` matches for `place`; `None` on any failure or no match.
    pub async fn geocode(&self, place: &str, limit: u8) -> Option<Vec<GeoLocation>> {
        no_data_on_error(self.try_geocode(place, limit).await)
    }

    pub async fn current_weather(&self, coords: Coordinates) -> Option<CurrentWeather> {
        no_data_on_error(self.try_current_weather(coords).await)
    }

    pub async fn forecast(&self, coords: Coordinates) -> Option<ForecastSeries> {
        no_data_on_error(self.try_forecast(coords).await)
    }

    pub async fn pollution(&self, coords: Coordinates) -> Option<PollutionSnapshot> {
        no_data_on_error(self.try_pollution(coords).await).flatten()
    }

    pub async fn pollution_forecast(&self, coords: Coordinates) -> Option<Vec<AqiPoint>> {
        no_data_on_error(self.try_pollution_forecast(coords).await)
    }
}

fn coord_query(coords: Coordinates) -> Vec<(&'static str, String)> {
    vec![
        ("lat", coords.latitude.to_string()),
        ("lon", coords.longitude.to_string()),
    ]
}

fn metric_query(coords: Coordinates) -> Vec<(&'static str, String)> {
    let mut query = coord_query(coords);
    query.push(("units", "metric".to_string()));
    query
}

fn no_data_on_error<T>(result: Result<T, FetchError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(error = %err, cause = ?std::error::Error::source(&err), "fetch failed; no data");
            None
        }
    }
}
