use std::{any::Any, fmt, sync::Arc};

use super::{Message, Pattern, Payload};

/// Необязательный контекст подписки ("получатель" вызова).
///
/// Хранится рядом с callback и передаётся ему при каждом вызове.
pub type Context = Arc<dyn Any + Send + Sync>;

/// Ошибка, которую может вернуть подписчик.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Результат вызова подписчика. `Err` не прерывает доставку остальным.
pub type HandlerResult = Result<(), HandlerError>;

/// Callback в общем виде: данные, сообщение и контекст подписки.
pub type Callback =
    Arc<dyn Fn(&Payload, &Message, Option<&Context>) -> HandlerResult + Send + Sync>;

/// Дескриптор подписки, возвращаемый `subscribe`.
///
/// Помнит канал, в котором создан: отписка через чужой канал ничего не
/// удаляет.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    channel_id: u64,
    id: u64,
}

impl SubscriptionHandle {
    pub(crate) fn new(
        channel_id: u64,
        id: u64,
    ) -> Self {
        Self { channel_id, id }
    }

    /// Идентификатор подписки внутри канала.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Идентификатор канала-владельца.
    pub fn channel_id(&self) -> u64 {
        self.channel_id
    }
}

/// Зарегистрированная тройка (шаблон, callback, контекст).
pub struct Subscription {
    id: u64,
    pattern: Pattern,
    callback: Callback,
    context: Option<Context>,
}

impl Subscription {
    pub(crate) fn new(
        id: u64,
        pattern: Pattern,
        callback: Callback,
        context: Option<Context>,
    ) -> Self {
        Self {
            id,
            pattern,
            callback,
            context,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    pub(crate) fn invoke(
        &self,
        payload: &Payload,
        message: &Message,
    ) -> HandlerResult {
        (self.callback)(payload, message, self.context.as_ref())
    }
}

impl fmt::Debug for Subscription {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("pattern", &self.pattern)
            .field("has_context", &self.context.is_some())
            .finish()
    }
}
