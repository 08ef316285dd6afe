use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::Config,
    error::{ServiceError, Stage},
    model::{CurrentReading, GeocodeMatch, Query},
};

use super::{Forecaster, Geocoder};

/// Variables requested in the forecast `current` section.
pub const CURRENT_FIELDS: &str =
    "temperature_2m,apparent_temperature,relative_humidity_2m,wind_speed_10m,weather_code";

const USER_AGENT: &str = concat!("weather-now/", env!("CARGO_PKG_VERSION"));

/// Client for the Open-Meteo geocoding and forecast APIs. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteo {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(ServiceError::Client)?;

        Ok(Self {
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            http,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<GeocodeMatch>>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current: Option<CurrentReading>,
}

#[async_trait]
impl Geocoder for OpenMeteo {
    async fn search(&self, query: &Query) -> Result<Option<GeocodeMatch>, ServiceError> {
        tracing::debug!(%query, url = %self.geocoding_url, "geocoding request");

        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[
                ("name", query.as_str()),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|source| ServiceError::Transport {
                stage: Stage::Geocode,
                source,
            })?;

        let parsed: SearchResponse = read_json(Stage::Geocode, res).await?;

        Ok(parsed.results.and_then(|results| results.into_iter().next()))
    }
}

#[async_trait]
impl Forecaster for OpenMeteo {
    async fn current(&self, place: &GeocodeMatch) -> Result<Option<CurrentReading>, ServiceError> {
        tracing::debug!(
            latitude = place.latitude,
            longitude = place.longitude,
            timezone = %place.timezone,
            "forecast request"
        );

        let res = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", place.latitude.to_string()),
                ("longitude", place.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", place.timezone.clone()),
            ])
            .send()
            .await
            .map_err(|source| ServiceError::Transport {
                stage: Stage::Forecast,
                source,
            })?;

        let parsed: ForecastResponse = read_json(Stage::Forecast, res).await?;

        Ok(parsed.current)
    }
}

async fn read_json<T: DeserializeOwned>(stage: Stage, res: Response) -> Result<T, ServiceError> {
    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| ServiceError::Transport { stage, source })?;

    if !status.is_success() {
        tracing::warn!(%stage, %status, body = %truncate_body(&body), "service request failed");
        return Err(ServiceError::Status { stage, status });
    }

    serde_json::from_str(&body)
        .map_err(|source| ServiceError::Decode { stage, source })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
