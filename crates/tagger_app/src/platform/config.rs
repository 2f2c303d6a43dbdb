//! Frontend configuration, read from the environment once at startup.
//!
//! Nothing below the frontend reads the environment: the wizard and the
//! engine receive everything through the values built here.

use std::env;
use std::time::Duration;

use tagger_core::{OptionCatalog, WizardConfig};
use tagger_engine::{EngineConfig, ShortenSettings, SuggestSettings};
use thiserror::Error;

use super::logging::LogDestination;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown TAGGER_VARIANT '{0}' (expected simple, branching or basic)")]
    UnknownVariant(String),
    #[error("unknown TAGGER_LOG '{0}' (expected file, terminal or both)")]
    UnknownLogDestination(String),
    #[error("{0} is set but lists no values")]
    EmptyCatalog(&'static str),
    #[error("{name} must be a whole number of seconds, got '{value}'")]
    InvalidTimeout { name: &'static str, value: String },
}

/// Which of the wizard presets to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Simple,
    Branching,
    Basic,
}

impl Variant {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "branching" => Ok(Self::Branching),
            "basic" => Ok(Self::Basic),
            _ => Err(ConfigError::UnknownVariant(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub variant: Variant,
    pub catalog: OptionCatalog,
    pub shortener: ShortenSettings,
    pub suggestions: SuggestSettings,
    pub log_destination: LogDestination,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset and empty keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let variant = match get("TAGGER_VARIANT") {
            Some(raw) => Variant::parse(&raw)?,
            None => Variant::Branching,
        };

        let defaults = OptionCatalog::default();
        let catalog = OptionCatalog::new(
            list_or(get("TAGGER_SOURCES"), "TAGGER_SOURCES", defaults.sources)?,
            list_or(get("TAGGER_MEDIUMS"), "TAGGER_MEDIUMS", defaults.mediums)?,
            list_or(get("TAGGER_CAMPAIGNS"), "TAGGER_CAMPAIGNS", defaults.campaigns)?,
        );

        let shortener = ShortenSettings {
            endpoint: get("TAGGER_SHORTENER_URL").map(|v| v.trim().to_string()),
            request_timeout: seconds(
                get("TAGGER_SHORTENER_TIMEOUT_SECS"),
                "TAGGER_SHORTENER_TIMEOUT_SECS",
            )?,
        };

        let mut suggestions = SuggestSettings {
            api_key: get("TAGGER_SUGGEST_API_KEY"),
            request_timeout: seconds(
                get("TAGGER_SUGGEST_TIMEOUT_SECS"),
                "TAGGER_SUGGEST_TIMEOUT_SECS",
            )?,
            ..SuggestSettings::default()
        };
        if let Some(model) = get("TAGGER_SUGGEST_MODEL") {
            suggestions.model = model.trim().to_string();
        }
        if let Some(base_url) = get("TAGGER_SUGGEST_BASE_URL") {
            suggestions.base_url = base_url.trim().to_string();
        }

        let log_destination = match get("TAGGER_LOG") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "file" => LogDestination::File,
                "terminal" => LogDestination::Terminal,
                "both" => LogDestination::Both,
                _ => return Err(ConfigError::UnknownLogDestination(raw)),
            },
            None => LogDestination::File,
        };

        Ok(Self {
            variant,
            catalog,
            shortener,
            suggestions,
            log_destination,
        })
    }

    pub fn wizard_config(&self) -> WizardConfig {
        let catalog = self.catalog.clone();
        match self.variant {
            Variant::Simple => WizardConfig::simple(catalog),
            Variant::Branching => WizardConfig::branching(catalog),
            Variant::Basic => WizardConfig::basic(catalog),
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(self.shortener.clone(), self.suggestions.clone())
    }
}

fn list_or(
    raw: Option<String>,
    name: &'static str,
    default: Vec<String>,
) -> Result<Vec<String>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let values: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
        .collect();
    if values.is_empty() {
        return Err(ConfigError::EmptyCatalog(name));
    }
    Ok(values)
}

fn seconds(raw: Option<String>, name: &'static str) -> Result<Option<Duration>, ConfigError> {
    raw.map(|value| {
        value
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidTimeout { name, value })
    })
    .transpose()
}
