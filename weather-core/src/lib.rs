//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The city-to-weather resolution pipeline (geocode, then current weather)
//! - Weather code classification and descriptions
//! - An abstraction over the upstream lookups, with an Open-Meteo implementation
//! - Session state and on-disk configuration
//!
//! It is used by `weather-now`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod resolver;
pub mod session;
pub mod wmo;

pub use config::Config;
pub use error::{Endpoint, FailureKind, ResolveError};
pub use model::{Location, Query, WeatherSnapshot};
pub use provider::{WeatherSource, open_meteo::OpenMeteo};
pub use resolver::Resolver;
pub use session::{Session, Ticket};
pub use wmo::{WeatherCategory, classify, describe};
