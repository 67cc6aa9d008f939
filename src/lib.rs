//! Herald: внутрипроцессный publish/subscribe с иерархическими топиками.
//!
//! Топик это строка из сегментов через точку (`order.created`). Подписка
//! задаётся шаблоном, в котором сегмент `*` совпадает с одним сегментом, а
//! завершающий `*` совпадает с любым остатком топика, включая пустой.
//!
//! ```
//! use serde_json::json;
//!
//! let registry = herald::Registry::new();
//! let orders = registry.named("orders");
//!
//! orders
//!     .subscribe("order.*", |data, msg| {
//!         println!("{} -> {:?}", msg.topic(), data.get("id"));
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let report = orders.publish("order.created", json!({"id": 42})).unwrap();
//! assert_eq!(report.delivered, 1);
//! ```
//!
//! Свободные функции [`publish`], [`subscribe`], [`unsubscribe`] и
//! [`channel`] работают с реестром процесса [`Registry::global`].

/// Настройки шины: лимиты, перехват паник, логирование.
pub mod config;
/// Ошибки: `BusError`, `SubscriberFailure`, `StackError`.
pub mod error;
/// Логирование на `tracing`.
pub mod logging;
/// Топики, каналы, подписки и реестр каналов.
pub mod pubsub;

use std::{any::Any, sync::Arc};

pub use config::BusSettings;
pub use error::{BusError, BusResult, FailureReason, HeraldResult, StackError, SubscriberFailure};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use pubsub::{
    matches, Channel, ChannelOptions, ErrorHook, HandlerResult, LogHook, Message, Pattern, Payload,
    PublishReport, Registry, SubscriptionHandle, Topic,
};

/// Публикует данные в глобальный канал.
pub fn publish(
    topic: &str,
    data: impl Into<Payload>,
) -> BusResult<PublishReport> {
    Registry::global().global_channel().publish(topic, data)
}

/// Подписывается на глобальный канал.
pub fn subscribe<F>(
    pattern: &str,
    callback: F,
) -> BusResult<SubscriptionHandle>
where
    F: Fn(&Payload, &Message) -> HandlerResult + Send + Sync + 'static,
{
    Registry::global().global_channel().subscribe(pattern, callback)
}

/// Подписывается на глобальный канал с контекстом.
pub fn subscribe_with_context<C, F>(
    pattern: &str,
    context: Arc<C>,
    callback: F,
) -> BusResult<SubscriptionHandle>
where
    C: Any + Send + Sync,
    F: Fn(&C, &Payload, &Message) -> HandlerResult + Send + Sync + 'static,
{
    Registry::global()
        .global_channel()
        .subscribe_with_context(pattern, context, callback)
}

/// Отписка по дескриптору из глобального или именованного канала.
///
/// Повторная отписка и неизвестный дескриптор не являются ошибкой.
pub fn unsubscribe(handle: SubscriptionHandle) -> bool {
    Registry::global().unsubscribe(handle)
}

/// Именованный канал реестра процесса, либо новый анонимный без имени.
pub fn channel(name: Option<&str>) -> Channel {
    Registry::global().channel(name)
}
