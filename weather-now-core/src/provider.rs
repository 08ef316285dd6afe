use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::ServiceError,
    model::{CurrentReading, GeocodeMatch, Query},
};

pub mod open_meteo;

pub use open_meteo::OpenMeteo;

/// First stage of a lookup: free text to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Best match for `query`, or `None` if the service knows no such place.
    async fn search(&self, query: &Query) -> Result<Option<GeocodeMatch>, ServiceError>;
}

/// Second stage of a lookup: coordinates to current conditions.
#[async_trait]
pub trait Forecaster: Send + Sync + Debug {
    /// Current reading at `place`, or `None` if the response had no `current` section.
    async fn current(&self, place: &GeocodeMatch) -> Result<Option<CurrentReading>, ServiceError>;
}
