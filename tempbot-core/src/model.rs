use serde::{Deserialize, Serialize};
use std::fmt;

/// One inbound chat update: where to send the reply, and what the user typed.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub text: String,
}

/// Current conditions for one location, built from a single provider response.
///
/// Only constructed with a non-empty location name; the fetcher rejects
/// anything else as `NotFound`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub country: String,
    pub temperature_c: i64,
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Temperature in {}, {}: {}°C",
            self.location, self.country, self.temperature_c
        )
    }
}
