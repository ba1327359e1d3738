//! [`Config`]-related definitions.

use std::{path::PathBuf, str::FromStr as _};

use common::Currency;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;
use url::Url;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Catalog configuration.
    pub catalog: Catalog,

    /// Storage configuration.
    pub storage: Storage,

    /// Render configuration.
    pub render: Render,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,
}

/// Remote catalog configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Catalog {
    /// Base URL of the catalog.
    #[default(Url::parse("https://dummyjson.com").expect("valid URL"))]
    pub base_url: Url,

    /// Number of products to request.
    #[default(32)]
    pub page_size: u16,
}

impl From<&Catalog> for service::Config {
    fn from(value: &Catalog) -> Self {
        Self {
            page_size: value.page_size,
        }
    }
}

/// Storage configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Storage {
    /// Directory to keep the records in.
    ///
    /// Records are kept in memory only, if not set.
    #[default(Some(PathBuf::from(".storefront")))]
    pub dir: Option<PathBuf>,
}

/// Render configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Render {
    /// Currency to display prices in.
    pub currency: DisplayCurrency,
}

/// [`Currency`] to display prices in.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(try_from = "String")]
pub struct DisplayCurrency(#[default(Currency::Pkr)] pub Currency);

impl TryFrom<String> for DisplayCurrency {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Currency::from_str(value.trim())
            .map(Self)
            .map_err(|e| format!("`{value}` is not a supported currency: {e}"))
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Currency;

    use super::{Config, DisplayCurrency};

    #[test]
    fn defaults_without_file() {
        let config = Config::new("definitely-missing-config").unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);

        assert_eq!(config.catalog.base_url.as_str(), "https://dummyjson.com/");
        assert_eq!(config.catalog.page_size, 32);
        assert_eq!(config.render.currency.0, Currency::Pkr);
        assert_eq!(
            config.storage.dir.unwrap().to_str(),
            Some(".storefront"),
        );
    }

    #[test]
    fn parses_currency() {
        let currency = DisplayCurrency::try_from(" USD ".to_owned()).unwrap();
        assert_eq!(currency.0, Currency::Usd);

        assert!(DisplayCurrency::try_from("dollars".to_owned()).is_err());
    }
}
