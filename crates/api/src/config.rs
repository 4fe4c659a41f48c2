use std::env;
use std::str::FromStr;

use landing_builder_core::generate::config::{
    DEFAULT_BASE_URL, DEFAULT_IMAGE_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use landing_builder_core::generate::GeneratorConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value `{value}`: {message}")]
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// Log level (e.g., "info", "debug", "trace"). `RUST_LOG` wins when set.
    pub log_level: String,
    /// Event bus channel capacity.
    pub event_bus_capacity: usize,
    /// Seed the store with the demonstration page on startup.
    pub seed_sample_page: bool,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Per-request timeout of the generation service, in seconds.
    pub generation_timeout_secs: u64,
    /// Origin of the prompt-to-image endpoint.
    pub image_endpoint: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3030,
            log_level: "info".to_string(),
            event_bus_capacity: 1024,
            seed_sample_page: true,
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            generation_timeout_secs: DEFAULT_TIMEOUT_SECS,
            image_endpoint: DEFAULT_IMAGE_ENDPOINT.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            event_bus_capacity: parse_var("EVENT_BUS_CAPACITY", defaults.event_bus_capacity)?,
            seed_sample_page: parse_var("SEED_SAMPLE_PAGE", defaults.seed_sample_page)?,
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: env::var("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            generation_timeout_secs: parse_var(
                "GENERATION_TIMEOUT_SECS",
                defaults.generation_timeout_secs,
            )?,
            image_endpoint: env::var("IMAGE_ENDPOINT").unwrap_or(defaults.image_endpoint),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            api_key: self.gemini_api_key.clone(),
            model: self.gemini_model.clone(),
            base_url: self.gemini_base_url.clone(),
            timeout_secs: self.generation_timeout_secs,
            image_endpoint: self.image_endpoint.clone(),
        }
    }
}

fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        message: e.to_string(),
    })
}
