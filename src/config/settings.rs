use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ensure, HeraldResult, ResultExt, SettingsError},
    logging::LoggingConfig,
};

/// Префикс переменных окружения: `HERALD_CATCH_PANICS=false`,
/// `HERALD_LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "HERALD";

/// Настройки шины.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusSettings {
    /// Лимит подписок на один канал; `None` означает без ограничений
    pub max_subscribers_per_channel: Option<usize>,
    /// Перехватывать панику подписчика. При `false` паника уходит издателю
    pub catch_panics: bool,
    pub logging: LoggingConfig,
}

impl BusSettings {
    /// Значения по умолчанию, переопределённые переменными окружения.
    pub fn load() -> HeraldResult<Self> {
        Self::from_sources(None)
    }

    /// Файл настроек (формат по расширению), затем переменные окружения.
    pub fn load_from(path: impl AsRef<Path>) -> HeraldResult<Self> {
        Self::from_sources(Some(path.as_ref()))
    }

    pub fn validate(&self) -> HeraldResult<()> {
        ensure!(
            self.max_subscribers_per_channel != Some(0),
            SettingsError::Invalid {
                field: "max_subscribers_per_channel".to_string(),
                reason: "must be greater than zero".to_string(),
            }
        );
        self.logging.validate()
    }

    fn from_sources(file: Option<&Path>) -> HeraldResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(load_error)
            .with_context(|| match file {
                Some(path) => format!("Loading settings from '{}'", path.display()),
                None => "Loading settings from environment".to_string(),
            })?;

        settings.validate().context("Validating settings")?;
        Ok(settings)
    }
}

fn load_error(err: ConfigError) -> SettingsError {
    SettingsError::Load {
        reason: err.to_string(),
    }
}

impl Default for BusSettings {
    fn default() -> Self {
        Self {
            max_subscribers_per_channel: None,
            catch_panics: true,
            logging: LoggingConfig::default(),
        }
    }
}
