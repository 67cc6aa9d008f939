//! Логирование на `tracing`: фильтр уровней и слой форматирования.
//!
//! Библиотека сама только пишет события; установить глобальный subscriber
//! должно приложение, например через [`init_logging`].

pub mod config;
mod filters;
mod formatter;

pub use config::{LogFormat, LoggingConfig};
pub use filters::build_filter_from_config;
pub use formatter::build_formatter_from_config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{HeraldResult, ResultExt, SettingsError};

/// Устанавливает глобальный subscriber по конфигурации.
///
/// Повторный вызов не паникует, а возвращает ошибку: subscriber уже
/// установлен.
pub fn init_logging(config: &LoggingConfig) -> HeraldResult<()> {
    config.validate()?;

    let env_filter = build_filter_from_config(config);
    let formatter = build_formatter_from_config(config);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(formatter)
        .try_init()
        .map_err(|e| SettingsError::Logging {
            reason: e.to_string(),
        })
        .context("Installing global tracing subscriber")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.level,
        format = ?config.format,
        "Logging system initialized"
    );
    Ok(())
}
