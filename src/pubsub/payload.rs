use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Данные, передаваемые подписчикам вместе с [`Message`](super::Message).
///
/// Чаще всего это JSON-объект с именованными свойствами. Публикация без
/// данных даёт [`Payload::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    /// Данные не переданы
    #[default]
    Empty,
    /// Сырые байты
    Bytes(Bytes),
    /// Строка UTF-8
    Text(String),
    /// Структурированное значение
    Json(Value),
}

impl Payload {
    /// Сериализует значение в JSON-payload.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Payload::Json)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }

    /// Возвращает именованное свойство JSON-объекта.
    ///
    /// Для остальных вариантов и не-объектов возвращает `None`.
    pub fn get(
        &self,
        key: &str,
    ) -> Option<&Value> {
        match self {
            Payload::Json(Value::Object(map)) => map.get(key),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Байтовое представление для `Bytes` и `Text`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Bytes(b) => Some(b),
            Payload::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Десериализует payload в заданный тип.
    ///
    /// `Text` и `Bytes` разбираются как JSON. Для `Empty` возвращает
    /// `Ok(None)`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        match self {
            Payload::Empty => Ok(None),
            Payload::Json(v) => T::deserialize(v).map(Some),
            Payload::Text(s) => serde_json::from_str(s).map(Some),
            Payload::Bytes(b) => serde_json::from_slice(b).map(Some),
        }
    }
}

impl From<()> for Payload {
    fn from(_: ()) -> Self {
        Payload::Empty
    }
}

impl From<Value> for Payload {
    fn from(v: Value) -> Self {
        Payload::Json(v)
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<Bytes> for Payload {
    fn from(b: Bytes) -> Self {
        Payload::Bytes(b)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(v: Vec<u8>) -> Self {
        Payload::Bytes(Bytes::from(v))
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(v: Option<T>) -> Self {
        v.map_or(Payload::Empty, Into::into)
    }
}
