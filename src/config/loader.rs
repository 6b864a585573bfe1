use std::{env, str::FromStr, time::Duration};

use url::Url;

use super::env::{
    AppConfig, ClassifierConfig, ConfigError, DirectoryConfig, LoggingConfig, UiConfig,
};

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_CLEAR_DELAY_MS: u64 = 3_000;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    /// Builds the configuration from any key/value source; `load_config`
    /// passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url_raw = var("GROQ_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&api_url_raw).map_err(|source| ConfigError::Url {
            key: "GROQ_API_URL",
            source,
        })?;

        let classifier = ClassifierConfig {
            api_key: var("GROQ_API_KEY"),
            api_url,
            model: var("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: parse_or("GROQ_TEMPERATURE", var("GROQ_TEMPERATURE"), DEFAULT_TEMPERATURE)?,
            max_tokens: parse_or("GROQ_MAX_TOKENS", var("GROQ_MAX_TOKENS"), DEFAULT_MAX_TOKENS)?,
            request_timeout: var("GROQ_TIMEOUT_MS")
                .map(|raw| parse_value::<u64>("GROQ_TIMEOUT_MS", raw))
                .transpose()?
                .map(Duration::from_millis),
        };

        let ui = UiConfig {
            clear_delay: Duration::from_millis(parse_or(
                "CLEAR_DELAY_MS",
                var("CLEAR_DELAY_MS"),
                DEFAULT_CLEAR_DELAY_MS,
            )?),
        };

        let directories = DirectoryConfig {
            logs_dir: var("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        Ok(Self {
            classifier,
            ui,
            directories,
            logging,
        })
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(raw) => parse_value(key, raw),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Invalid { key, value: raw })
}
