use std::fmt;

use num_enum::TryFromPrimitive;

/// Коды статуса для категоризации ошибок.
///
/// # Диапазоны:
/// - 1xxx: Внутренние ошибки
/// - 4xxx: Ограничения
/// - 7xxx: Конфигурация и инициализация
/// - 8xxx: Pub/Sub (топики, шаблоны, подписчики)
///
/// `num_enum::TryFromPrimitive` даёт нативную реализацию `TryFrom<u32>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u32)]
#[non_exhaustive]
pub enum StatusCode {
    // === 1xxx: Внутренние ===
    Internal = 1003,

    // === 4xxx: Ограничения ===
    SubscriberLimitExceeded = 4003,

    // === 7xxx: Конфигурация ===
    ConfigInvalid = 7000,
    ConfigLoadFailed = 7001,
    LoggingInitFailed = 7002,

    // === 8xxx: Pub/Sub ===
    InvalidTopic = 8000,
    InvalidPattern = 8001,
    SubscriberFailed = 8002,
    SubscriberPanicked = 8003,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl StatusCode {
    /// Числовое представление кода статуса.
    pub const fn code(self) -> u32 {
        self as u32
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для StatusCode
////////////////////////////////////////////////////////////////////////////////

impl From<StatusCode> for u32 {
    fn from(c: StatusCode) -> Self {
        c.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{self:?} ({})", self.code())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
