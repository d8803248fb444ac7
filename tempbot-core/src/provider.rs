use crate::{Config, model::WeatherReport};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod weatherstack;

pub use weatherstack::WeatherstackProvider;

/// Why a single weather lookup failed.
///
/// Every variant is recoverable: the dispatcher logs the detail and answers
/// the user with a generic apology.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced an HTTP response (DNS, connect, TLS, or a
    /// failed body read).
    #[error("transport error talking to the weather provider: {0}")]
    Transport(#[source] reqwest::Error),

    /// The provider answered with something other than 200.
    #[error("weather provider returned status {0}")]
    BadStatus(u16),

    /// 200 response, but no usable location in the body (unknown city or
    /// malformed payload).
    #[error("weather provider returned no usable location data")]
    NotFound,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`. Multi-word cities arrive `+`-joined.
    async fn current(&self, city: &str) -> Result<WeatherReport, FetchError>;
}

/// Construct the Weatherstack provider from config.
///
/// A missing API key fails here, before any network I/O happens.
pub fn provider_from_config(config: &Config) -> anyhow::Result<WeatherstackProvider> {
    let api_key = config.weather_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No Weatherstack API key configured.\n\
             Hint: run `tempbot configure` and enter your API key, or set WEATHER_API_KEY."
        )
    })?;

    Ok(WeatherstackProvider::new(api_key.to_owned()))
}
