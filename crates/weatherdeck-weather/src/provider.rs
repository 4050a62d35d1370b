//! OpenWeatherMap current-weather client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::types::{LookupFailed, UnitPreference, WeatherError, WeatherSnapshot};

const USER_AGENT: &str = concat!("WeatherDeck/", env!("CARGO_PKG_VERSION"));

/// Anything that can turn a place name into a snapshot.
///
/// The dashboard only depends on this seam, so tests can drive it with a stub.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// `place` is expected to be non-empty after trimming.
    async fn lookup(
        &self,
        place: &str,
        unit: UnitPreference,
    ) -> Result<WeatherSnapshot, LookupFailed>;
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    name: String,
    sys: SysSection,
    main: MainSection,
}

#[derive(Debug, Deserialize)]
struct SysSection {
    country: String,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: f64,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Fetch current conditions, keeping the detailed failure reason.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch(
        &self,
        place: &str,
        unit: UnitPreference,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", place),
                ("appid", self.api_key.as_str()),
                ("units", unit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let snapshot = parse_current_weather(&body, unit)?;

        tracing::debug!(
            "Fetched {} ({}): {}",
            snapshot.name,
            snapshot.country,
            snapshot.formatted_temperature()
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherClient {
    async fn lookup(
        &self,
        place: &str,
        unit: UnitPreference,
    ) -> Result<WeatherSnapshot, LookupFailed> {
        self.fetch(place, unit).await.map_err(|e| {
            tracing::warn!("Weather lookup for {:?} failed: {}", place, e);
            LookupFailed::from(e)
        })
    }
}

fn parse_current_weather(body: &str, unit: UnitPreference) -> Result<WeatherSnapshot, WeatherError> {
    let parsed: CurrentWeatherResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Parse(e.to_string()))?;

    if parsed.name.is_empty() {
        return Err(WeatherError::Parse("response has an empty place name".to_string()));
    }

    Ok(WeatherSnapshot {
        name: parsed.name,
        country: parsed.sys.country,
        temp: parsed.main.temp,
        unit,
    })
}
