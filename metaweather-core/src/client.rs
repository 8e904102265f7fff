use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;
use crate::model::{Location, LocationWithDistance, WeatherReport, WeatherSample};

/// Production service root used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.metaweather.com";

/// Default bound on a single HTTP call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Construction-time options for [`Client`]. Immutable once the client
/// is built; point `base_url` at a local server for test isolation.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Client for the MetaWeather API.
///
/// Holds a base URL and a per-request timeout. Construction performs no
/// I/O and cannot fail; the timeout is applied to each outgoing request.
/// A single instance can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
    http: HttpClient,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: HttpClient::new(),
        }
    }

    /// Client pointed at the production service with default timeouts.
    pub fn with_defaults() -> Self {
        Self::new(ClientConfig::default())
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Search locations by place name. Returns every match; an empty
    /// vector means nothing matched, not an error.
    pub async fn search_location(&self, query: &str) -> Result<Vec<Location>> {
        let url = format!("{}/api/location/search/", self.config.base_url);
        self.get_json(&url, &[("query", query)]).await
    }

    /// Search locations near a coordinate pair. Matches are annotated
    /// with their distance from the query point.
    pub async fn search_location_by_latt_long(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<Vec<LocationWithDistance>> {
        let lattlong = format!("{latitude},{longitude}");
        let url = format!("{}/api/location/search/", self.config.base_url);
        self.get_json(&url, &[("lattlong", lattlong.as_str())]).await
    }

    /// Fetch the current weather report for a woeid.
    ///
    /// For a woeid the service does not know it answers with a body that
    /// decodes into a default [`WeatherReport`] rather than an error;
    /// check for an empty `title` to detect that case. This mirrors the
    /// upstream contract, which returns no distinguishing status.
    pub async fn current_weather(&self, woeid: &str) -> Result<WeatherReport> {
        let url = format!("{}/api/location/{}", self.config.base_url, woeid);
        self.get_json(&url, &[]).await
    }

    /// Fetch the consolidated readings for a woeid on a calendar date.
    /// An empty vector means the service has no data for that date.
    pub async fn weather_for_date(
        &self,
        woeid: &str,
        date: NaiveDate,
    ) -> Result<Vec<WeatherSample>> {
        let url = format!(
            "{}/api/location/{}/{}",
            self.config.base_url,
            woeid,
            date_path(date)
        );
        self.get_json(&url, &[]).await
    }

    /// GET `url`, read the full body, decode it as JSON into `T`.
    /// Send/read failures become `Error::Transport`, parse failures
    /// `Error::Decode`; there is no partial-result recovery.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        debug!(url, "querying weather service");

        let res = self
            .http
            .get(url)
            .query(query)
            .timeout(self.config.request_timeout)
            .send()
            .await?;

        let body = res.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Path segment for the historical endpoint: 4-digit year, unpadded
/// month and day, exactly as the service expects.
fn date_path(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.year(), date.month(), date.day())
}
