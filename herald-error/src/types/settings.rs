use std::any::Any;

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибки загрузки и проверки настроек.
#[derive(Debug, Clone, Error)]
pub enum SettingsError {
    /// Источник настроек не удалось прочитать или разобрать
    #[error("Failed to load settings: {reason}")]
    Load { reason: String },

    /// Значение поля недопустимо
    #[error("Invalid setting '{field}': {reason}")]
    Invalid { field: String, reason: String },

    /// Глобальный subscriber логирования уже установлен или не собрался
    #[error("Failed to initialize logging: {reason}")]
    Logging { reason: String },
}

impl ErrorExt for SettingsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Load { .. } => StatusCode::ConfigLoadFailed,
            Self::Invalid { .. } => StatusCode::ConfigInvalid,
            Self::Logging { .. } => StatusCode::LoggingInitFailed,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
