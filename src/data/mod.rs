pub mod client;
mod models;

use chrono::Utc;
use tracing::{debug, info};

pub use client::{ApiConfig, FetchError, OpenWeatherClient};

use crate::domain::weather::{FetchTarget, WeatherBundle};

/// Resolves `target` and pulls every dataset the viewer shows.
///
/// Never fails: a name with no geocoding match yields an empty bundle, and
/// each dataset that cannot be fetched is left as `None`.
pub async fn fetch_bundle(client: &OpenWeatherClient, target: FetchTarget) -> WeatherBundle {
    let (location, coords) = match &target {
        FetchTarget::Named(query) => {
            let Some(location) = client
                .geocode(query, 1)
                .await
                .and_then(|matches| matches.into_iter().next())
            else {
                info!(%query, "no location found");
                return WeatherBundle::empty(target);
            };
            let coords = location.coordinates();
            (Some(location), coords)
        }
        FetchTarget::Coordinates(coords) => (None, *coords),
    };

    debug!(%coords, "fetching weather datasets");
    let (current, pollution, forecast, pollution_forecast) = futures::join!(
        client.current_weather(coords),
        client.pollution(coords),
        client.forecast(coords),
        client.pollution_forecast(coords),
    );

    WeatherBundle {
        target,
        location,
        current,
        pollution,
        forecast,
        pollution_forecast,
        fetched_at: Utc::now(),
    }
}
