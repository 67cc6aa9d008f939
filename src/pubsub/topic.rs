//! Топики, шаблоны подписок и структурное сопоставление.
//!
//! Топик состоит из непустых сегментов, разделённых точкой: `order`,
//! `order.created`, `order.item.removed`. Шаблон подписки имеет ту же форму,
//! но любой его сегмент может быть маской `*`:
//!
//! - `*` в середине совпадает ровно с одним произвольным сегментом;
//! - `*` в конце совпадает с нулём или более оставшихся сегментов, поэтому
//!   `order.*` ловит и `order`, и `order.created`, и `order.item.removed`;
//! - шаблон без маски совпадает только с идентичным топиком.

use std::{borrow::Borrow, fmt, ops::Deref, str::FromStr, sync::Arc};

use crate::error::{BusError, BusResult};

/// Разделитель сегментов топика.
pub const DELIMITER: char = '.';
/// Сегмент-маска шаблона.
pub const WILDCARD: &str = "*";

/// Проверенное имя опубликованного топика.
///
/// Дёшево клонируется: внутри `Arc<str>`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Topic(Arc<str>);

/// Проверенный шаблон подписки, заранее разбитый на сегменты.
#[derive(Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: Arc<str>,
    /// Сегменты без завершающей маски. Пусто для точных шаблонов.
    segments: Box<[Segment]>,
    trailing_any: bool,
    exact: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(Box<str>),
    Any,
}

impl Segment {
    fn as_literal(&self) -> Option<&str> {
        match self {
            Segment::Literal(s) => Some(s),
            Segment::Any => None,
        }
    }
}

/// Проверяет структуру строки и возвращает причину отказа.
fn check_segments(
    raw: &str,
    allow_wildcard: bool,
) -> Result<(), &'static str> {
    if raw.is_empty() {
        return Err("must not be empty");
    }
    for segment in raw.split(DELIMITER) {
        if segment.is_empty() {
            return Err("empty segment (leading, trailing or doubled delimiter)");
        }
        if segment.contains('*') {
            if !allow_wildcard {
                return Err("wildcard is not allowed in a published topic");
            }
            if segment != WILDCARD {
                return Err("wildcard must occupy a whole segment");
            }
        }
    }
    Ok(())
}

/// Ядро сопоставления.
///
/// `pattern`: сегменты шаблона без завершающей маски (`None` = маска на
/// одну позицию). Если `trailing_any`, топик может быть длиннее шаблона.
fn segments_match<'p, I>(
    pattern: I,
    trailing_any: bool,
    topic: &str,
) -> bool
where
    I: Iterator<Item = Option<&'p str>>,
{
    let mut topic_segments = topic.split(DELIMITER);
    for expected in pattern {
        match (expected, topic_segments.next()) {
            (_, None) => return false,
            (Some(literal), Some(segment)) if literal != segment => return false,
            _ => {}
        }
    }
    trailing_any || topic_segments.next().is_none()
}

/// Совпадает ли топик с шаблоном.
///
/// Чисто структурная функция без состояния: аргументы не валидируются,
/// пустой топик не совпадает ни с чем. Для горячего пути используйте
/// [`Pattern::matches`], который не разбивает шаблон на каждом вызове.
pub fn matches(
    pattern: &str,
    topic: &str,
) -> bool {
    if topic.is_empty() {
        return false;
    }

    let mut segments: Vec<&str> = pattern.split(DELIMITER).collect();
    if !segments.contains(&WILDCARD) {
        return pattern == topic;
    }

    let trailing_any = segments.last() == Some(&WILDCARD);
    if trailing_any {
        segments.pop();
    }

    segments_match(
        segments.into_iter().map(|s| (s != WILDCARD).then_some(s)),
        trailing_any,
        topic,
    )
}

////////////////////////////////////////////////////////////////////////////////
// Topic
////////////////////////////////////////////////////////////////////////////////

impl Topic {
    /// Разбирает и проверяет имя топика.
    ///
    /// Отклоняет пустую строку, пустые сегменты и сегменты с `*`.
    pub fn parse(raw: &str) -> BusResult<Self> {
        check_segments(raw, false).map_err(|reason| BusError::InvalidTopic {
            topic: raw.to_string(),
            reason: reason.to_string(),
        })?;
        Ok(Self(Arc::from(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(DELIMITER)
    }

    /// Количество сегментов.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }
}

impl fmt::Debug for Topic {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "Topic({:?})", &*self.0)
    }
}

impl fmt::Display for Topic {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for Topic {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Topic {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for Topic {
    type Err = BusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::parse(s)
    }
}

impl TryFrom<&str> for Topic {
    type Error = BusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Topic::parse(value)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Pattern
////////////////////////////////////////////////////////////////////////////////

impl Pattern {
    /// Разбирает и проверяет шаблон подписки.
    ///
    /// Маска допускается только целым сегментом: `a.*.c` корректен, `a*` нет.
    pub fn parse(raw: &str) -> BusResult<Self> {
        check_segments(raw, true).map_err(|reason| BusError::InvalidPattern {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        })?;

        let mut segments: Vec<Segment> = raw
            .split(DELIMITER)
            .map(|s| {
                if s == WILDCARD {
                    Segment::Any
                } else {
                    Segment::Literal(s.into())
                }
            })
            .collect();

        let exact = !segments.contains(&Segment::Any);
        let trailing_any = segments.last() == Some(&Segment::Any);
        if trailing_any {
            segments.pop();
        }
        if exact {
            segments.clear();
        }

        Ok(Self {
            raw: Arc::from(raw),
            segments: segments.into_boxed_slice(),
            trailing_any,
            exact,
        })
    }

    /// Совпадает ли опубликованный топик с шаблоном.
    pub fn matches(
        &self,
        topic: &Topic,
    ) -> bool {
        if self.exact {
            return *self.raw == *topic.as_str();
        }
        segments_match(
            self.segments.iter().map(Segment::as_literal),
            self.trailing_any,
            topic.as_str(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Шаблон без масок совпадает только с идентичным топиком.
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// Заканчивается ли шаблон маской `*`.
    pub fn has_trailing_wildcard(&self) -> bool {
        self.trailing_any
    }
}

impl fmt::Debug for Pattern {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "Pattern({:?})", &*self.raw)
    }
}

impl fmt::Display for Pattern {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Pattern {
    type Err = BusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}

impl TryFrom<&str> for Pattern {
    type Error = BusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Pattern::parse(value)
    }
}
