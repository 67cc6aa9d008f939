//! Внутрипроцессная подсистема publish–subscribe.
//!
//! - `topic`: топики, шаблоны подписок с маской `*` и их сопоставление.
//! - `payload`: данные публикации.
//! - `message`: метаданные одной публикации.
//! - `subscription`: callback, контекст и дескриптор подписки.
//! - `hook`: наблюдение за сбоями подписчиков.
//! - `channel`: изолированное пространство подписок и синхронная доставка.
//! - `registry`: глобальный, именованные и анонимные каналы.

pub mod channel;
pub mod hook;
pub mod message;
pub mod payload;
pub mod registry;
pub mod subscription;
pub mod topic;

pub use channel::{Channel, ChannelBuilder, ChannelOptions, ChannelStatsSnapshot, PublishReport};
pub use hook::{ErrorHook, LogHook};
pub use message::Message;
pub use payload::Payload;
pub use registry::{Registry, RegistryBuilder};
pub use subscription::{
    Callback, Context, HandlerError, HandlerResult, Subscription, SubscriptionHandle,
};
pub use topic::{matches, Pattern, Topic, DELIMITER, WILDCARD};
