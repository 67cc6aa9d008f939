use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::Topic;

/// Метаданные одной публикации.
///
/// Создаётся на каждый вызов `publish` и передаётся каждому совпавшему
/// подписчику последним аргументом. Не живёт дольше самой публикации.
#[derive(Debug, Clone)]
pub struct Message {
    topic: Topic,
    channel: Option<Arc<str>>,
    sequence: u64,
    published_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        topic: Topic,
        channel: Option<Arc<str>>,
        sequence: u64,
    ) -> Self {
        Self {
            topic,
            channel,
            sequence,
            published_at: Utc::now(),
        }
    }

    /// Конкретный опубликованный топик (не шаблон подписки).
    pub fn topic(&self) -> &str {
        self.topic.as_str()
    }

    pub fn topic_ref(&self) -> &Topic {
        &self.topic
    }

    /// Имя канала публикации; `None` для глобального и анонимных каналов.
    pub fn channel_name(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// Порядковый номер публикации в канале, начиная с 1.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }
}
