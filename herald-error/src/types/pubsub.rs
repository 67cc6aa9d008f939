use std::{any::Any, fmt};

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибки операций канала, возвращаемые вызывающей стороне синхронно.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    /// Публикуемый топик пуст или имеет некорректную структуру
    #[error("Invalid topic '{topic}': {reason}")]
    InvalidTopic { topic: String, reason: String },

    /// Шаблон подписки пуст или имеет некорректную структуру
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Превышен лимит подписок канала
    #[error("Subscriber limit ({limit}) exceeded for channel '{channel}'")]
    SubscriberLimitExceeded { channel: String, limit: usize },
}

/// Причина сбоя подписчика во время доставки.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Callback вернул `Err`
    Error(String),
    /// Callback запаниковал
    Panic(String),
}

/// Сбой одного подписчика при публикации.
///
/// Не возвращается издателю: доставка остальным подписчикам продолжается,
/// а сбой передаётся в хук наблюдения канала.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Subscriber #{subscription_id} ('{pattern}') failed on topic '{topic}': {reason}")]
pub struct SubscriberFailure {
    /// Имя канала, `None` для глобального и анонимных каналов
    pub channel: Option<String>,
    /// Опубликованный топик
    pub topic: String,
    /// Шаблон подписки, совпавший с топиком
    pub pattern: String,
    /// Идентификатор подписки внутри канала
    pub subscription_id: u64,
    pub reason: FailureReason,
}

impl BusError {
    /// Относится ли ошибка к категории "некорректный аргумент".
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidTopic { .. } | Self::InvalidPattern { .. }
        )
    }
}

impl SubscriberFailure {
    pub fn is_panic(&self) -> bool {
        matches!(self.reason, FailureReason::Panic(_))
    }
}

impl fmt::Display for FailureReason {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Error(msg) => write!(f, "{msg}"),
            Self::Panic(msg) => write!(f, "panicked: {msg}"),
        }
    }
}

impl ErrorExt for BusError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidTopic { .. } => StatusCode::InvalidTopic,
            Self::InvalidPattern { .. } => StatusCode::InvalidPattern,
            Self::SubscriberLimitExceeded { .. } => StatusCode::SubscriberLimitExceeded,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ErrorExt for SubscriberFailure {
    fn status_code(&self) -> StatusCode {
        match self.reason {
            FailureReason::Error(_) => StatusCode::SubscriberFailed,
            FailureReason::Panic(_) => StatusCode::SubscriberPanicked,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
