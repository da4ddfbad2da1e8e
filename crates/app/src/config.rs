//! Environment-driven configuration.

use core::str::FromStr;

use thiserror::Error;

pub const APP_VAR: &str = "PORTICO_APP";
pub const SEED_LIBRARY_VAR: &str = "PORTICO_SEED_LIBRARY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORTICO_APP must be `bookstore` or `contracts`, got `{0}`")]
    UnknownApp(String),

    #[error("{var} must be a boolean, got `{value}`")]
    InvalidBool { var: &'static str, value: String },
}

/// Which tutorial the binary runs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AppKind {
    #[default]
    BookStore,
    Contracts,
}

impl FromStr for AppKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bookstore" => Ok(AppKind::BookStore),
            "contracts" => Ok(AppKind::Contracts),
            _ => Err(ConfigError::UnknownApp(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app: AppKind,
    /// Register the reference library titles at start-up (book store only).
    pub seed_library: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppKind::default(),
            seed_library: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source. Unset variables keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(app) = lookup(APP_VAR) {
            config.app = app.parse()?;
        }
        if let Some(seed) = lookup(SEED_LIBRARY_VAR) {
            config.seed_library = parse_bool(SEED_LIBRARY_VAR, &seed)?;
        }

        Ok(config)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_owned(),
        }),
    }
}
