use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Environment variable holding the Telegram bot token.
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";

/// Environment variable holding the Weatherstack API key.
pub const WEATHER_API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Credentials for the Weatherstack provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Telegram bot token, as handed out by BotFather.
    pub bot_token: Option<String>,

    /// Example TOML:
    /// [weatherstack]
    /// api_key = "..."
    pub weatherstack: Option<ProviderConfig>,
}

impl Config {
    /// Load config from disk and apply environment overrides.
    ///
    /// `BOT_TOKEN` and `WEATHER_API_KEY` win over file values, so the bot can
    /// run from env alone (e.g. a `.env` file) without a config file.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_env_overrides(
            env::var(BOT_TOKEN_VAR).ok(),
            env::var(WEATHER_API_KEY_VAR).ok(),
        );
        Ok(cfg)
    }

    /// Load config from disk only, or return an empty default if the file
    /// doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Apply environment values on top of whatever the file provided.
    pub fn apply_env_overrides(&mut self, bot_token: Option<String>, api_key: Option<String>) {
        if let Some(token) = bot_token {
            self.bot_token = Some(token);
        }
        if let Some(key) = api_key {
            self.weatherstack = Some(ProviderConfig { api_key: key });
        }
    }

    /// Bot token, or an actionable error when it is set nowhere.
    pub fn bot_token(&self) -> Result<&str> {
        self.bot_token.as_deref().ok_or_else(|| {
            anyhow!(
                "No Telegram bot token configured.\n\
                 Hint: run `tempbot configure`, or set the {BOT_TOKEN_VAR} environment variable."
            )
        })
    }

    /// Returns the Weatherstack API key, if present.
    pub fn weather_api_key(&self) -> Option<&str> {
        self.weatherstack.as_ref().map(|cfg| cfg.api_key.as_str())
    }

    pub fn set_bot_token(&mut self, token: String) {
        self.bot_token = Some(token);
    }

    pub fn set_weather_api_key(&mut self, api_key: String) {
        self.weatherstack = Some(ProviderConfig { api_key });
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "tempbot", "tempbot")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_token_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.bot_token().unwrap_err();

        assert!(err.to_string().contains("No Telegram bot token configured"));
        assert!(err.to_string().contains("Hint: run `tempbot configure`"));
    }

    #[test]
    fn set_credentials() {
        let mut cfg = Config::default();

        cfg.set_bot_token("123:abc".into());
        cfg.set_weather_api_key("WS_KEY".into());

        assert_eq!(cfg.bot_token().expect("token must exist"), "123:abc");
        assert_eq!(cfg.weather_api_key(), Some("WS_KEY"));
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let mut cfg = Config {
            bot_token: Some("file-token".into()),
            weatherstack: Some(ProviderConfig { api_key: "file-key".into() }),
        };

        cfg.apply_env_overrides(Some("env-token".into()), Some("env-key".into()));

        assert_eq!(cfg.bot_token().expect("token must exist"), "env-token");
        assert_eq!(cfg.weather_api_key(), Some("env-key"));
    }

    #[test]
    fn env_overrides_absent_keep_file_values() {
        let mut cfg = Config {
            bot_token: Some("file-token".into()),
            weatherstack: Some(ProviderConfig { api_key: "file-key".into() }),
        };

        cfg.apply_env_overrides(None, None);

        assert_eq!(cfg.bot_token().expect("token must exist"), "file-token");
        assert_eq!(cfg.weather_api_key(), Some("file-key"));
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let mut cfg = Config::default();
        cfg.set_bot_token("123:abc".into());
        cfg.set_weather_api_key("WS_KEY".into());

        let serialized = toml::to_string_pretty(&cfg).expect("config must serialize");
        let parsed: Config = toml::from_str(&serialized).expect("config must parse back");

        assert_eq!(parsed.bot_token.as_deref(), Some("123:abc"));
        assert_eq!(parsed.weather_api_key(), Some("WS_KEY"));
    }
}
