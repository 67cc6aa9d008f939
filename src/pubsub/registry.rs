use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

use super::{Channel, ChannelOptions, ErrorHook, LogHook, SubscriptionHandle};
use crate::config::BusSettings;

/// Реестр процесса, которым пользуются свободные функции крейта.
static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Реестр каналов: один глобальный канал, кэш именованных каналов и фабрика
/// анонимных.
///
/// Для одного имени реестр никогда не создаёт два экземпляра, в том числе
/// при одновременном первом обращении из нескольких потоков. Каналы живут,
/// пока жив реестр: удаления по имени нет.
pub struct Registry {
    global: Channel,
    named: DashMap<Arc<str>, Channel>,
    /// Именованные каналы по идентификатору, для отписки по дескриптору.
    by_id: DashMap<u64, Channel>,
    options: ChannelOptions,
    hook: Arc<dyn ErrorHook>,
}

/// Построитель реестра с собственными настройками и хуком.
#[derive(Default)]
pub struct RegistryBuilder {
    options: ChannelOptions,
    hook: Option<Arc<dyn ErrorHook>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Реестр, каналы которого берут лимиты из настроек.
    pub fn with_settings(settings: &BusSettings) -> Self {
        Self::builder().settings(settings).build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Реестр процесса, создаваемый при первом обращении.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Глобальный канал реестра. Всегда один и тот же экземпляр.
    pub fn global_channel(&self) -> &Channel {
        &self.global
    }

    /// Возвращает канал по имени.
    ///
    /// Непустое имя даёт именованный канал, созданный при первом обращении.
    /// Без имени (или с пустым именем) каждый вызов возвращает новый
    /// анонимный канал. Глобальный канал отдаёт [`Registry::global_channel`].
    pub fn channel(
        &self,
        name: Option<&str>,
    ) -> Channel {
        match name {
            Some(name) => self.named(name),
            None => self.anonymous(),
        }
    }

    /// Именованный канал. Пустое имя даёт новый анонимный канал.
    pub fn named(
        &self,
        name: &str,
    ) -> Channel {
        if name.is_empty() {
            return self.anonymous();
        }
        if let Some(existing) = self.named.get(name) {
            return existing.clone();
        }

        self.named
            .entry(Arc::from(name))
            .or_insert_with(|| {
                let channel = self.new_channel(Some(name));
                self.by_id.insert(channel.id(), channel.clone());
                channel
            })
            .clone()
    }

    /// Новый канал без имени, не попадающий в кэш.
    pub fn anonymous(&self) -> Channel {
        self.new_channel(None)
    }

    /// Имена созданных каналов в алфавитном порядке.
    pub fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.named.iter().map(|e| e.key().to_string()).collect();
        names.sort_unstable();
        names
    }

    /// Количество именованных каналов.
    pub fn len(&self) -> usize {
        self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }

    /// Отписка по дескриптору без ссылки на канал.
    ///
    /// Владелец ищется по идентификатору канала из дескриптора среди
    /// глобального и именованных каналов. Подписки анонимных каналов отсюда
    /// недостижимы: их удаляют через сам канал.
    pub fn unsubscribe(
        &self,
        handle: SubscriptionHandle,
    ) -> bool {
        if handle.channel_id() == self.global.id() {
            return self.global.unsubscribe(handle);
        }
        // Клон отпускает шард карты до вызова `unsubscribe`.
        let owner = self.by_id.get(&handle.channel_id()).map(|e| e.value().clone());
        owner.is_some_and(|channel| channel.unsubscribe(handle))
    }

    fn new_channel(
        &self,
        name: Option<&str>,
    ) -> Channel {
        let mut builder = Channel::builder()
            .options(self.options.clone())
            .hook(self.hook.clone());
        if let Some(name) = name {
            builder = builder.name(name);
        }
        builder.build()
    }
}

impl RegistryBuilder {
    pub fn settings(
        mut self,
        settings: &BusSettings,
    ) -> Self {
        self.options = ChannelOptions::from(settings);
        self
    }

    pub fn options(
        mut self,
        options: ChannelOptions,
    ) -> Self {
        self.options = options;
        self
    }

    /// Хук, который наследует каждый канал реестра.
    pub fn hook(
        mut self,
        hook: Arc<dyn ErrorHook>,
    ) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn build(self) -> Registry {
        let hook = self.hook.unwrap_or_else(|| Arc::new(LogHook));
        let global = Channel::builder()
            .options(self.options.clone())
            .hook(hook.clone())
            .build();
        Registry {
            global,
            named: DashMap::new(),
            by_id: DashMap::new(),
            options: self.options,
            hook,
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("global", &self.global)
            .field("named", &self.channel_names())
            .field("options", &self.options)
            .finish()
    }
}
