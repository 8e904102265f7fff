//! Core library for the `metaweather` CLI.
//!
//! This crate defines:
//! - The MetaWeather API client (location search, current and historical weather)
//! - Shared response models decoded from the service's JSON
//! - Configuration handling for the CLI
//!
//! It is used by `metaweather-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;

pub use client::{Client, ClientConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
pub use config::{Config, SavedLocation};
pub use error::{Error, Result};
pub use model::{
    Location, LocationWithDistance, ParentLocation, WeatherReport, WeatherSample, WeatherSource,
};
