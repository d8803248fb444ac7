use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::model::WeatherReport;

use super::{FetchError, WeatherProvider};

const BASE_URL: &str = "http://api.weatherstack.com";

/// Client for the Weatherstack "current conditions" endpoint.
///
/// One request per lookup: no caching, no retry, no timeout beyond the
/// transport defaults.
#[derive(Debug, Clone)]
pub struct WeatherstackProvider {
    api_key: String,
    http: Client,
    base_url: String,
}

impl WeatherstackProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Points the provider at a local mock server.
    #[cfg(test)]
    fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherstackProvider {
    async fn current(&self, city: &str) -> Result<WeatherReport, FetchError> {
        // `city` is already `+`-joined, and Weatherstack reads `+` as a word
        // separator; the URL is formatted by hand so it stays raw instead of
        // being percent-encoded into a literal plus.
        let url = format!(
            "{}/current?access_key={}&query={}",
            self.base_url, self.api_key, city
        );

        debug!(%city, "requesting current conditions");

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = res.status().as_u16();
        if status != 200 {
            return Err(FetchError::BadStatus(status));
        }

        let body = res.text().await.map_err(FetchError::Transport)?;
        report_from_body(&body)
    }
}

/// Decode a provider body into a report.
///
/// Weatherstack reports errors (bad key, unknown city) inside a 200 body with
/// the nested fields absent, so anything short of a usable location maps to
/// `NotFound` rather than a decode failure.
fn report_from_body(body: &str) -> Result<WeatherReport, FetchError> {
    let parsed: WsResponse = serde_json::from_str(body).map_err(|_| FetchError::NotFound)?;

    let location = parsed.location.ok_or(FetchError::NotFound)?;
    if location.name.is_empty() {
        return Err(FetchError::NotFound);
    }

    let temperature_c = parsed
        .current
        .and_then(|c| c.temperature)
        .ok_or(FetchError::NotFound)?;

    Ok(WeatherReport {
        location: location.name,
        country: location.country,
        temperature_c,
    })
}

#[derive(Debug, Deserialize)]
struct WsCurrent {
    temperature: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WsLocation {
    #[serde(default)]
    name: String,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct WsResponse {
    current: Option<WsCurrent>,
    location: Option<WsLocation>,
}
