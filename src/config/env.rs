use std::time::Duration;

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub ui: UiConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

/// Chat-completion endpoint and the tuning values sent with every request.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub api_key: Option<String>,
    pub api_url: Url,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    /// How long a successful result stays on screen before the form resets.
    pub clear_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
    #[error("invalid endpoint url in {key}")]
    Url {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },
}
