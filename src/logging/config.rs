use serde::{Deserialize, Serialize};

use crate::error::{ensure, HeraldResult, SettingsError};

/// Формат вывода событий.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

/// Настройки логирования.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Уровень (`info`) или полная директива `EnvFilter` (`herald=debug,warn`)
    pub level: String,
    pub format: LogFormat,
    pub with_ansi: bool,
    pub with_target: bool,
}

impl LoggingConfig {
    /// Директива для `EnvFilter`.
    ///
    /// Голый уровень применяется ко всему процессу, а для `herald`
    /// явно, чтобы его не перебила более строгая директива по умолчанию.
    pub fn build_filter_directive(&self) -> String {
        let level = self.level.trim();
        if level.contains('=') || level.contains(',') {
            level.to_string()
        } else {
            format!("{level},herald={level}")
        }
    }

    pub fn validate(&self) -> HeraldResult<()> {
        ensure!(
            !self.level.trim().is_empty(),
            SettingsError::Invalid {
                field: "logging.level".to_string(),
                reason: "must not be empty".to_string(),
            }
        );
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            with_ansi: true,
            with_target: true,
        }
    }
}
