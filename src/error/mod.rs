//! Ошибки крейта.
//!
//! Типы объявлены в `herald-error` и переэкспортируются здесь, чтобы
//! пользователю хватало одной зависимости.

pub use herald_error::{
    bail, ensure, BusError, ErrorExt, FailureReason, HeraldResult, ResultExt, SettingsError,
    StackError, StatusCode, SubscriberFailure,
};

/// Результат операций шины: подписки и публикации.
pub type BusResult<T> = Result<T, BusError>;
