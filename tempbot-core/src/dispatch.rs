use std::sync::Arc;
use tracing::warn;

use crate::model::IncomingMessage;
use crate::provider::WeatherProvider;

/// Reply for `/start` and for anything the bot doesn't recognize.
pub const WELCOME: &str = "Welcome to the Temperature Bot!\n\nI can help you get the current temperature for any city.\n\nAvailable commands:\n/temperature [city] - Get the current temperature for a city (defaults to Cape Town)";

/// City used when `/temperature` arrives without an argument.
pub const DEFAULT_CITY: &str = "Cape+Town";

/// What a message text resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start`, unknown commands, and plain chatter all show the help text.
    Start,

    /// `/temperature [city words...]`; words after the command are `+`-joined
    /// so the provider reads them as one query.
    Temperature { city: String },
}

impl Command {
    pub fn parse(text: &str) -> Self {
        if text.starts_with("/temperature") {
            let words: Vec<&str> = text.split_whitespace().skip(1).collect();
            let city = if words.is_empty() {
                DEFAULT_CITY.to_string()
            } else {
                words.join("+")
            };
            return Command::Temperature { city };
        }

        Command::Start
    }
}

/// Maps one inbound message to one reply string.
///
/// The provider handle is injected at construction so callers (and tests)
/// decide where lookups actually go.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    provider: Arc<dyn WeatherProvider>,
}

impl Dispatcher {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Produce the reply for `message`.
    ///
    /// Lookup failures are logged with detail and degrade to an apology; the
    /// calling loop never sees an error.
    pub async fn dispatch(&self, message: &IncomingMessage) -> String {
        match Command::parse(&message.text) {
            Command::Start => WELCOME.to_string(),
            Command::Temperature { city } => match self.provider.current(&city).await {
                Ok(report) => report.to_string(),
                Err(err) => {
                    warn!(
                        chat_id = message.chat_id,
                        city = %city,
                        error = %err,
                        "temperature lookup failed"
                    );
                    format!("Sorry, I couldn't fetch the temperature for {city}")
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeatherReport;
    use crate::provider::FetchError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Provider returning a canned result and recording the requested city.
    #[derive(Debug)]
    struct CannedProvider {
        report: Option<WeatherReport>,
        seen_city: Mutex<Option<String>>,
    }

    impl CannedProvider {
        fn ok(report: WeatherReport) -> Self {
            Self { report: Some(report), seen_city: Mutex::new(None) }
        }

        fn failing() -> Self {
            Self { report: None, seen_city: Mutex::new(None) }
        }

        fn seen_city(&self) -> Option<String> {
            self.seen_city.lock().expect("lock must not be poisoned").clone()
        }
    }

    #[async_trait]
    impl WeatherProvider for CannedProvider {
        async fn current(&self, city: &str) -> Result<WeatherReport, FetchError> {
            *self.seen_city.lock().expect("lock must not be poisoned") = Some(city.to_string());
            self.report.clone().ok_or(FetchError::NotFound)
        }
    }

    fn message(text: &str) -> IncomingMessage {
        IncomingMessage { chat_id: 42, text: text.to_string() }
    }

    fn london_report() -> WeatherReport {
        WeatherReport {
            location: "London".to_string(),
            country: "United Kingdom".to_string(),
            temperature_c: 15,
        }
    }

    #[test]
    fn start_parses_to_start() {
        assert_eq!(Command::parse("/start"), Command::Start);
    }

    #[test]
    fn unknown_text_parses_to_start() {
        assert_eq!(Command::parse("hello there"), Command::Start);
        assert_eq!(Command::parse("/weather"), Command::Start);
        assert_eq!(Command::parse(""), Command::Start);
    }

    #[test]
    fn temperature_without_city_defaults_to_cape_town() {
        assert_eq!(
            Command::parse("/temperature"),
            Command::Temperature { city: DEFAULT_CITY.to_string() }
        );
    }

    #[test]
    fn temperature_joins_city_words_with_plus() {
        assert_eq!(
            Command::parse("/temperature Paris France"),
            Command::Temperature { city: "Paris+France".to_string() }
        );
    }

    #[test]
    fn temperature_with_single_word_city() {
        assert_eq!(
            Command::parse("/temperature London"),
            Command::Temperature { city: "London".to_string() }
        );
    }

    #[tokio::test]
    async fn dispatch_start_returns_welcome() {
        let dispatcher = Dispatcher::new(Arc::new(CannedProvider::failing()));

        let reply = dispatcher.dispatch(&message("/start")).await;

        assert_eq!(reply, WELCOME);
    }

    #[tokio::test]
    async fn dispatch_unknown_returns_welcome_without_lookup() {
        let provider = Arc::new(CannedProvider::failing());
        let dispatcher = Dispatcher::new(provider.clone());

        let reply = dispatcher.dispatch(&message("what's the weather?")).await;

        assert_eq!(reply, WELCOME);
        assert_eq!(provider.seen_city(), None);
    }

    #[tokio::test]
    async fn dispatch_temperature_passes_joined_city_to_provider() {
        let provider = Arc::new(CannedProvider::ok(london_report()));
        let dispatcher = Dispatcher::new(provider.clone());

        dispatcher.dispatch(&message("/temperature Paris France")).await;

        assert_eq!(provider.seen_city().as_deref(), Some("Paris+France"));
    }

    #[tokio::test]
    async fn dispatch_temperature_without_city_uses_default() {
        let provider = Arc::new(CannedProvider::ok(london_report()));
        let dispatcher = Dispatcher::new(provider.clone());

        dispatcher.dispatch(&message("/temperature")).await;

        assert_eq!(provider.seen_city().as_deref(), Some(DEFAULT_CITY));
    }

    #[tokio::test]
    async fn dispatch_temperature_formats_report() {
        let dispatcher = Dispatcher::new(Arc::new(CannedProvider::ok(london_report())));

        let reply = dispatcher.dispatch(&message("/temperature London")).await;

        assert_eq!(reply, "Temperature in London, United Kingdom: 15°C");
    }

    #[tokio::test]
    async fn dispatch_temperature_failure_degrades_to_apology() {
        let dispatcher = Dispatcher::new(Arc::new(CannedProvider::failing()));

        let reply = dispatcher.dispatch(&message("/temperature Atlantis")).await;

        assert_eq!(reply, "Sorry, I couldn't fetch the temperature for Atlantis");
    }
}
