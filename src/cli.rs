#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use crate::{
    data::ApiConfig,
    domain::weather::{Coordinates, FetchTarget, Units},
};

pub const DEFAULT_PLACE: &str = "Hawaii, HI, USA";

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Celsius,
    Fahrenheit,
}

impl From<UnitsArg> for Units {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::Celsius => Units::Celsius,
            UnitsArg::Fahrenheit => Units::Fahrenheit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconMode {
    Unicode,
    Ascii,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "metcast",
    version,
    about = "Terminal weather and air-quality viewer"
)]
pub struct Cli {
    /// Place name to look up (default: "Hawaii, HI, USA")
    pub city: Option<String>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Display units
    #[arg(long, value_enum, default_value_t = UnitsArg::Celsius)]
    pub units: UnitsArg,

    /// Direct latitude (requires --lon)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Direct longitude (requires --lat)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Force ASCII icons
    #[arg(long)]
    pub ascii_icons: bool,

    /// Split forecast days at the location's midnight instead of the local one
    #[arg(long)]
    pub location_time: bool,

    /// Refresh interval in seconds
    #[arg(long, default_value_t = 600)]
    pub refresh_interval: u64,

    /// Print a weather report to stdout and exit (non-interactive)
    #[arg(long)]
    pub one_shot: bool,

    /// Append logs to this file (interactive mode logs nowhere otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn default_city(&self) -> String {
        self.city
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACE.to_string())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (Some(lat), Some(lon)) if Coordinates::new(lat, lon).is_none() => {
                anyhow::bail!("coordinates out of range: {lat}, {lon}")
            }
            _ => {}
        }
        if self.api_key.as_deref().is_none_or(|key| key.trim().is_empty()) {
            anyhow::bail!("an API key is required (--api-key or OPENWEATHER_API_KEY)");
        }
        Ok(())
    }

    pub fn api_config(&self) -> anyhow::Result<ApiConfig> {
        let key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .context("missing API key")?;
        let config = ApiConfig::new(key);
        Ok(match &self.base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        })
    }

    /// Coordinates win over a place name when both are given.
    #[must_use]
    pub fn initial_target(&self) -> FetchTarget {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => match Coordinates::new(lat, lon) {
                Some(coords) => FetchTarget::Coordinates(coords),
                None => FetchTarget::Named(self.default_city()),
            },
            _ => FetchTarget::Named(self.default_city()),
        }
    }

    #[must_use]
    pub fn icon_mode(&self) -> IconMode {
        if self.ascii_icons {
            IconMode::Ascii
        } else {
            IconMode::Unicode
        }
    }
}
