//! Two-stage lookup: geocode the query, then fetch current conditions for the match.
//!
//! Every expected failure comes back as an [`Outcome`]. Only failures nobody
//! planned for (e.g. a body that is not JSON) surface as `Err`.

use crate::{
    config::Config,
    error::{ServiceError, Stage},
    model::{CurrentConditions, Query},
    provider::{Forecaster, Geocoder, OpenMeteo},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The query was blank; nothing was sent.
    Rejected,
    /// The geocoding service had no match.
    NotFound,
    /// A service was unreachable or answered with a non-success status.
    Unavailable(Stage),
    /// The forecast came back without its `current` section.
    Malformed,
    Ok(CurrentConditions),
}

#[derive(Debug)]
pub struct Lookup {
    geocoder: Box<dyn Geocoder>,
    forecaster: Box<dyn Forecaster>,
}

impl Lookup {
    pub fn new(geocoder: Box<dyn Geocoder>, forecaster: Box<dyn Forecaster>) -> Self {
        Self {
            geocoder,
            forecaster,
        }
    }

    /// Both stages backed by Open-Meteo, as configured.
    pub fn open_meteo(config: &Config) -> Result<Self, ServiceError> {
        let client = OpenMeteo::new(config)?;
        Ok(Self::new(Box::new(client.clone()), Box::new(client)))
    }

    pub async fn run(&self, raw_query: &str) -> Result<Outcome, ServiceError> {
        let Some(query) = Query::parse(raw_query) else {
            tracing::debug!("blank query rejected");
            return Ok(Outcome::Rejected);
        };

        let place = match self.geocoder.search(&query).await {
            Ok(Some(place)) => place,
            Ok(None) => {
                tracing::info!(%query, "no matching city");
                return Ok(Outcome::NotFound);
            }
            Err(err) => return unavailable_or(err),
        };

        let reading = match self.forecaster.current(&place).await {
            Ok(Some(reading)) => reading,
            Ok(None) => {
                tracing::warn!(place = %place.label(), "forecast response has no current section");
                return Ok(Outcome::Malformed);
            }
            Err(err) => return unavailable_or(err),
        };

        let conditions = CurrentConditions::new(&place, reading);
        tracing::info!(
            location = %conditions.location,
            temperature_c = conditions.temperature_c,
            weather_code = conditions.weather_code,
            "lookup succeeded"
        );

        Ok(Outcome::Ok(conditions))
    }
}

fn unavailable_or(err: ServiceError) -> Result<Outcome, ServiceError> {
    match (err.is_unavailable(), err.stage()) {
        (true, Some(stage)) => {
            tracing::warn!(%stage, error = %err, "service unavailable");
            Ok(Outcome::Unavailable(stage))
        }
        _ => Err(err),
    }
}
