//! Weather lookups for WeatherDeck
//!
//! Fetches current conditions for a place name from the OpenWeatherMap
//! current-weather endpoint and reduces them to a `WeatherSnapshot`.

pub mod provider;
pub mod types;

pub use provider::{OpenWeatherClient, WeatherLookup};
pub use types::*;
