//! Core library for the `weather-now` CLI.
//!
//! This crate defines:
//! - The weather code table and display-ready models
//! - Open-Meteo geocoding and forecast clients behind small traits
//! - The two-stage lookup and the state machine that tracks it
//! - Configuration handling
//!
//! It is used by `weather-now-cli`, but nothing here touches the terminal.

pub mod conditions;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod session;
pub mod state;

pub use conditions::describe;
pub use config::Config;
pub use error::{ServiceError, Stage};
pub use lookup::{Lookup, Outcome};
pub use model::{CurrentConditions, CurrentReading, GeocodeMatch, Query, round_display};
pub use provider::{Forecaster, Geocoder, OpenMeteo};
pub use session::Session;
pub use state::{Event, State, Status, transition};
