use std::{
    any::Any,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use parking_lot::RwLock;
use tracing::{debug, error, trace};

use super::{
    Callback, Context, ErrorHook, HandlerResult, LogHook, Message, Pattern, Payload,
    Subscription, SubscriptionHandle, Topic,
};
use crate::{
    config::BusSettings,
    error::{BusError, BusResult, FailureReason, SubscriberFailure},
};

/// Источник уникальных идентификаторов каналов в процессе.
static NEXT_CHANNEL_ID: AtomicU64 = AtomicU64::new(1);

/// Неизменяемый снимок списка подписок.
type SubscriptionList = Arc<Vec<Arc<Subscription>>>;

/// Изолированное пространство имён pub/sub со своим списком подписок.
///
/// `Channel` является дешёвым дескриптором: клоны ссылаются на одно и то же
/// пространство, поэтому подписка через один клон получает публикации
/// через другой.
///
/// Доставка синхронная: `publish` вызывает совпавших подписчиков по порядку
/// подписки и возвращается после последнего. Список подписок снимается в
/// начале публикации, так что подписки и отписки из callback вступают в силу
/// только со следующей публикации.
#[derive(Clone)]
pub struct Channel {
    inner: Arc<ChannelInner>,
}

struct ChannelInner {
    id: u64,
    name: Option<Arc<str>>,
    /// Copy-on-write: публикация клонирует `Arc`, запись делает
    /// `Arc::make_mut`, поэтому блокировка не удерживается во время доставки.
    subscriptions: RwLock<SubscriptionList>,
    next_subscription_id: AtomicU64,
    options: ChannelOptions,
    hook: Arc<dyn ErrorHook>,
    stats: ChannelStats,
}

/// Параметры канала.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOptions {
    /// Лимит подписок; `None` означает без ограничений
    pub max_subscribers: Option<usize>,
    /// Перехватывать панику подписчика и продолжать доставку
    pub catch_panics: bool,
}

/// Итог одной публикации.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Сколько подписок совпало с топиком
    pub matched: usize,
    /// Сколько callback завершились успешно
    pub delivered: usize,
    /// Сколько callback вернули ошибку или запаниковали
    pub failed: usize,
}

#[derive(Debug, Default)]
struct ChannelStats {
    published: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
}

/// Снимок счётчиков канала.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStatsSnapshot {
    pub published: u64,
    pub delivered: u64,
    pub failed: u64,
}

/// Построитель канала для случаев, когда нужны имя, хук или лимиты.
#[derive(Default)]
pub struct ChannelBuilder {
    name: Option<Arc<str>>,
    options: ChannelOptions,
    hook: Option<Arc<dyn ErrorHook>>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl Channel {
    /// Создаёт анонимный канал с хуком [`LogHook`] и параметрами по умолчанию.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ChannelBuilder {
        ChannelBuilder::default()
    }

    /// Уникальный в процессе идентификатор канала.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.inner.name.is_none()
    }

    /// Ссылаются ли два дескриптора на один и тот же канал.
    pub fn ptr_eq(
        &self,
        other: &Channel,
    ) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn options(&self) -> &ChannelOptions {
        &self.inner.options
    }

    /// Подписывает callback на шаблон.
    ///
    /// Подписки не дедуплицируются: две одинаковые подписки сработают обе.
    pub fn subscribe<F>(
        &self,
        pattern: &str,
        callback: F,
    ) -> BusResult<SubscriptionHandle>
    where
        F: Fn(&Payload, &Message) -> HandlerResult + Send + Sync + 'static,
    {
        let callback: Callback =
            Arc::new(move |payload: &Payload, message: &Message, _: Option<&Context>| {
                callback(payload, message)
            });
        self.subscribe_raw(pattern, callback, None)
    }

    /// Подписывает callback, которому при каждом вызове передаётся `context`.
    pub fn subscribe_with_context<C, F>(
        &self,
        pattern: &str,
        context: Arc<C>,
        callback: F,
    ) -> BusResult<SubscriptionHandle>
    where
        C: Any + Send + Sync,
        F: Fn(&C, &Payload, &Message) -> HandlerResult + Send + Sync + 'static,
    {
        let callback: Callback = Arc::new(
            move |payload: &Payload, message: &Message, ctx: Option<&Context>| {
                match ctx.and_then(|c| c.downcast_ref::<C>()) {
                    Some(c) => callback(c, payload, message),
                    None => Err("subscription context has an unexpected type".into()),
                }
            },
        );
        let context: Context = context;
        self.subscribe_raw(pattern, callback, Some(context))
    }

    /// Общая форма подписки: готовый [`Callback`] и необязательный контекст.
    pub fn subscribe_raw(
        &self,
        pattern: &str,
        callback: Callback,
        context: Option<Context>,
    ) -> BusResult<SubscriptionHandle> {
        let pattern = Pattern::parse(pattern)?;
        let id = self
            .inner
            .next_subscription_id
            .fetch_add(1, Ordering::Relaxed);

        let mut guard = self.inner.subscriptions.write();
        if let Some(limit) = self.inner.options.max_subscribers {
            if guard.len() >= limit {
                return Err(BusError::SubscriberLimitExceeded {
                    channel: self.display_name().to_string(),
                    limit,
                });
            }
        }

        trace!(
            channel = self.display_name(),
            pattern = %pattern,
            subscription_id = id,
            "Subscribed"
        );
        Arc::make_mut(&mut guard).push(Arc::new(Subscription::new(
            id, pattern, callback, context,
        )));

        Ok(SubscriptionHandle::new(self.inner.id, id))
    }

    /// Удаляет подписку.
    ///
    /// Возвращает `false`, если подписка уже удалена или дескриптор
    /// принадлежит другому каналу. Это не ошибка.
    pub fn unsubscribe(
        &self,
        handle: SubscriptionHandle,
    ) -> bool {
        if handle.channel_id() != self.inner.id {
            return false;
        }

        let mut guard = self.inner.subscriptions.write();
        let Some(pos) = guard.iter().position(|s| s.id() == handle.id()) else {
            return false;
        };
        Arc::make_mut(&mut guard).remove(pos);

        trace!(
            channel = self.display_name(),
            subscription_id = handle.id(),
            "Unsubscribed"
        );
        true
    }

    /// Публикует данные в топик.
    ///
    /// Невалидный топик отклоняется до вызова любого подписчика. Ошибки и
    /// паники подписчиков не возвращаются издателю: они учитываются в
    /// [`PublishReport::failed`] и передаются в хук канала.
    pub fn publish(
        &self,
        topic: &str,
        data: impl Into<Payload>,
    ) -> BusResult<PublishReport> {
        let topic = Topic::parse(topic)?;
        let payload = data.into();
        let sequence = self.inner.stats.published.fetch_add(1, Ordering::Relaxed) + 1;
        let message = Message::new(topic, self.inner.name.clone(), sequence);

        let snapshot = self.snapshot();
        let mut report = PublishReport::default();

        for sub in snapshot
            .iter()
            .filter(|s| s.pattern().matches(message.topic_ref()))
        {
            report.matched += 1;
            match self.deliver(sub, &payload, &message) {
                Ok(()) => report.delivered += 1,
                Err(reason) => {
                    report.failed += 1;
                    let failure = SubscriberFailure {
                        channel: self.inner.name.as_deref().map(str::to_string),
                        topic: message.topic().to_string(),
                        pattern: sub.pattern().to_string(),
                        subscription_id: sub.id(),
                        reason,
                    };
                    self.report_failure(&failure);
                }
            }
        }

        let stats = &self.inner.stats;
        stats
            .delivered
            .fetch_add(report.delivered as u64, Ordering::Relaxed);
        stats
            .failed
            .fetch_add(report.failed as u64, Ordering::Relaxed);

        trace!(
            channel = self.display_name(),
            topic = message.topic(),
            sequence,
            matched = report.matched,
            failed = report.failed,
            "Published"
        );
        Ok(report)
    }

    /// Количество активных подписок.
    pub fn subscription_count(&self) -> usize {
        self.inner.subscriptions.read().len()
    }

    /// Шаблоны активных подписок в порядке доставки.
    pub fn patterns(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|s| s.pattern().to_string())
            .collect()
    }

    /// Удаляет все подписки канала. Возвращает число удалённых.
    pub fn clear(&self) -> usize {
        let mut guard = self.inner.subscriptions.write();
        let removed = guard.len();
        *guard = Arc::default();
        if removed > 0 {
            debug!(channel = self.display_name(), removed, "Channel cleared");
        }
        removed
    }

    pub fn stats(&self) -> ChannelStatsSnapshot {
        let stats = &self.inner.stats;
        ChannelStatsSnapshot {
            published: stats.published.load(Ordering::Relaxed),
            delivered: stats.delivered.load(Ordering::Relaxed),
            failed: stats.failed.load(Ordering::Relaxed),
        }
    }

    fn snapshot(&self) -> SubscriptionList {
        self.inner.subscriptions.read().clone()
    }

    fn display_name(&self) -> &str {
        self.inner.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Передаёт сбой в хук. Паника самого хука при `catch_panics`
    /// перехватывается и пишется в лог, доставка продолжается.
    fn report_failure(
        &self,
        failure: &SubscriberFailure,
    ) {
        let hook = &self.inner.hook;
        if !self.inner.options.catch_panics {
            hook.on_subscriber_failure(failure);
            return;
        }

        if let Err(panic) =
            panic::catch_unwind(AssertUnwindSafe(|| hook.on_subscriber_failure(failure)))
        {
            error!(
                channel = self.display_name(),
                topic = %failure.topic,
                subscription_id = failure.subscription_id,
                reason = %panic_message(panic.as_ref()),
                "Error hook panicked, failure dropped"
            );
        }
    }

    /// Вызывает одного подписчика, превращая `Err` и панику в причину сбоя.
    fn deliver(
        &self,
        sub: &Subscription,
        payload: &Payload,
        message: &Message,
    ) -> Result<(), FailureReason> {
        if !self.inner.options.catch_panics {
            return sub
                .invoke(payload, message)
                .map_err(|e| FailureReason::Error(e.to_string()));
        }

        match panic::catch_unwind(AssertUnwindSafe(|| sub.invoke(payload, message))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(FailureReason::Error(e.to_string())),
            Err(panic) => Err(FailureReason::Panic(panic_message(panic.as_ref()))),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

impl ChannelBuilder {
    /// Имя канала. Пустое имя оставляет канал анонимным.
    pub fn name(
        mut self,
        name: impl Into<Arc<str>>,
    ) -> Self {
        let name: Arc<str> = name.into();
        self.name = (!name.is_empty()).then_some(name);
        self
    }

    pub fn options(
        mut self,
        options: ChannelOptions,
    ) -> Self {
        self.options = options;
        self
    }

    pub fn max_subscribers(
        mut self,
        limit: usize,
    ) -> Self {
        self.options.max_subscribers = Some(limit);
        self
    }

    pub fn catch_panics(
        mut self,
        enabled: bool,
    ) -> Self {
        self.options.catch_panics = enabled;
        self
    }

    pub fn hook(
        mut self,
        hook: Arc<dyn ErrorHook>,
    ) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn build(self) -> Channel {
        let id = NEXT_CHANNEL_ID.fetch_add(1, Ordering::Relaxed);
        debug!(
            channel_id = id,
            channel = self.name.as_deref().unwrap_or("<unnamed>"),
            max_subscribers = ?self.options.max_subscribers,
            "Channel created"
        );
        let inner = ChannelInner {
            id,
            name: self.name,
            subscriptions: RwLock::new(Arc::default()),
            next_subscription_id: AtomicU64::new(1),
            options: self.options,
            hook: self.hook.unwrap_or_else(|| Arc::new(LogHook)),
            stats: ChannelStats::default(),
        };
        Channel {
            inner: Arc::new(inner),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl Default for Channel {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for ChannelOptions {
    fn default() -> Self {
        Self {
            max_subscribers: None,
            catch_panics: true,
        }
    }
}

impl From<&BusSettings> for ChannelOptions {
    fn from(settings: &BusSettings) -> Self {
        Self {
            max_subscribers: settings.max_subscribers_per_channel,
            catch_panics: settings.catch_panics,
        }
    }
}

impl fmt::Debug for Channel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Channel")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("subscriptions", &self.subscription_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    type Log = Arc<Mutex<Vec<String>>>;

    fn recorder(
        log: &Log,
        label: &'static str,
    ) -> impl Fn(&Payload, &Message) -> HandlerResult + Send + Sync + 'static {
        let log = log.clone();
        move |_, msg| {
            log.lock().unwrap().push(format!("{label}:{}", msg.topic()));
            Ok(())
        }
    }

    fn collecting_hook() -> (Arc<Mutex<Vec<SubscriberFailure>>>, Arc<dyn ErrorHook>) {
        let failures = Arc::new(Mutex::new(Vec::new()));
        let sink = failures.clone();
        let hook: Arc<dyn ErrorHook> =
            Arc::new(move |f: &SubscriberFailure| sink.lock().unwrap().push(f.clone()));
        (failures, hook)
    }

    /// Тест проверяет сценарий из документации: подписка на `order.*`
    /// получает данные и конкретный топик ровно один раз.
    #[test]
    fn test_wildcard_delivery_with_data() {
        let channel = Channel::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        channel
            .subscribe("order.*", move |data, msg| {
                let id = data.get("id").and_then(|v| v.as_u64());
                sink.lock().unwrap().push((id, msg.topic().to_string()));
                Ok(())
            })
            .unwrap();

        let report = channel
            .publish("order.created", json!({"id": 42}))
            .unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(Some(42), "order.created".to_string())]
        );
        assert_eq!(
            report,
            PublishReport {
                matched: 1,
                delivered: 1,
                failed: 0
            }
        );
    }

    /// Тест проверяет порядок доставки: A, B, C в порядке подписки.
    #[test]
    fn test_fifo_dispatch_order() {
        let channel = Channel::new();
        let log: Log = Arc::default();
        channel.subscribe("a.*", recorder(&log, "A")).unwrap();
        channel.subscribe("a.b", recorder(&log, "B")).unwrap();
        channel.subscribe("*", recorder(&log, "C")).unwrap();

        channel.publish("a.b", ()).unwrap();
        assert_eq!(*log.lock().unwrap(), ["A:a.b", "B:a.b", "C:a.b"]);
    }

    /// Тест проверяет отсутствие дедупликации одинаковых подписок.
    #[test]
    fn test_duplicate_subscriptions_both_fire() {
        let channel = Channel::new();
        let log: Log = Arc::default();
        let cb = Arc::new(recorder(&log, "X"));
        let (c1, c2) = (cb.clone(), cb);
        let h1 = channel.subscribe("t", move |d, m| c1(d, m)).unwrap();
        let h2 = channel.subscribe("t", move |d, m| c2(d, m)).unwrap();
        assert_ne!(h1, h2);

        channel.publish("t", ()).unwrap();
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    /// Тест проверяет, что пустой и некорректный топик отклоняются до
    /// вызова подписчиков.
    #[test]
    fn test_invalid_topic_rejected() {
        let channel = Channel::new();
        let log: Log = Arc::default();
        channel.subscribe("*", recorder(&log, "any")).unwrap();

        for bad in ["", "a..b", ".a", "a.*"] {
            let err = channel.publish(bad, ()).unwrap_err();
            assert!(err.is_invalid_argument(), "{bad:?} must be rejected");
        }
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(channel.stats().published, 0);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let channel = Channel::new();
        let err = channel.subscribe("", |_, _| Ok(())).unwrap_err();
        assert!(matches!(err, BusError::InvalidPattern { .. }));
        assert_eq!(channel.subscription_count(), 0);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let channel = Channel::new();
        let log: Log = Arc::default();
        let handle = channel.subscribe("t", recorder(&log, "X")).unwrap();

        assert!(channel.unsubscribe(handle));
        assert!(!channel.unsubscribe(handle));
        channel.publish("t", ()).unwrap();
        assert!(log.lock().unwrap().is_empty());
    }

    /// Тест проверяет, что дескриптор чужого канала ничего не удаляет, даже
    /// если номер подписки совпадает.
    #[test]
    fn test_foreign_handle_is_ignored() {
        let a = Channel::new();
        let b = Channel::new();
        let ha = a.subscribe("t", |_, _| Ok(())).unwrap();
        let hb = b.subscribe("t", |_, _| Ok(())).unwrap();
        assert_eq!(ha.id(), hb.id());

        assert!(!b.unsubscribe(ha));
        assert_eq!(b.subscription_count(), 1);
    }

    /// Тест проверяет catch-and-continue: сбой одного подписчика не мешает
    /// остальным, а попадает в хук.
    #[test]
    fn test_failing_subscriber_does_not_stop_dispatch() {
        let (failures, hook) = collecting_hook();
        let channel = Channel::builder().name("orders").hook(hook).build();
        let log: Log = Arc::default();

        channel.subscribe("order.*", recorder(&log, "first")).unwrap();
        channel
            .subscribe("order.*", |_, _| Err("inventory offline".into()))
            .unwrap();
        channel.subscribe("order.*", recorder(&log, "third")).unwrap();

        let report = channel.publish("order.created", ()).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            ["first:order.created", "third:order.created"]
        );
        assert_eq!(report.failed, 1);
        assert_eq!(report.delivered, 2);

        let failures = failures.lock().unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].channel.as_deref(), Some("orders"));
        assert_eq!(failures[0].pattern, "order.*");
        assert_eq!(
            failures[0].reason,
            FailureReason::Error("inventory offline".to_string())
        );
    }

    #[test]
    fn test_panicking_subscriber_is_caught() {
        let (failures, hook) = collecting_hook();
        let channel = Channel::builder().hook(hook).build();
        let log: Log = Arc::default();

        channel
            .subscribe("t", |_, _| panic!("handler exploded"))
            .unwrap();
        channel.subscribe("t", recorder(&log, "after")).unwrap();

        let report = channel.publish("t", ()).unwrap();
        assert_eq!(report.failed, 1);
        assert_eq!(*log.lock().unwrap(), ["after:t"]);
        assert_eq!(
            failures.lock().unwrap()[0].reason,
            FailureReason::Panic("handler exploded".to_string())
        );
    }

    /// Тест проверяет, что паника в хуке не прерывает доставку остальным
    /// подписчикам и не доходит до издателя.
    #[test]
    fn test_panicking_hook_does_not_stop_dispatch() {
        let hook: Arc<dyn ErrorHook> = Arc::new(|_: &SubscriberFailure| panic!("hook boom"));
        let channel = Channel::builder().hook(hook).build();
        let log: Log = Arc::default();

        channel
            .subscribe("t", |_, _| Err("first failed".into()))
            .unwrap();
        channel.subscribe("t", recorder(&log, "second")).unwrap();

        let report = channel.publish("t", ()).unwrap();
        assert_eq!(*log.lock().unwrap(), ["second:t"]);
        assert_eq!(report.failed, 1);
        assert_eq!(report.delivered, 1);
        assert_eq!(channel.stats().failed, 1);
    }

    /// Тест проверяет, что подписка и отписка из callback не влияют на
    /// текущую публикацию.
    #[test]
    fn test_reentrant_mutation_uses_snapshot() {
        let channel = Channel::new();
        let log: Log = Arc::default();

        let late_log = log.clone();
        let ch = channel.clone();
        channel
            .subscribe("t", move |_, _| {
                ch.subscribe("t", recorder(&late_log, "late")).unwrap();
                Ok(())
            })
            .unwrap();

        let victim_slot: Arc<Mutex<Option<SubscriptionHandle>>> = Arc::default();
        let slot = victim_slot.clone();
        let ch = channel.clone();
        channel
            .subscribe("t", move |_, _| {
                if let Some(h) = slot.lock().unwrap().take() {
                    ch.unsubscribe(h);
                }
                Ok(())
            })
            .unwrap();
        let victim = channel.subscribe("t", recorder(&log, "victim")).unwrap();
        *victim_slot.lock().unwrap() = Some(victim);

        let report = channel.publish("t", ()).unwrap();
        assert_eq!(report.matched, 3);
        assert_eq!(*log.lock().unwrap(), ["victim:t"]);

        // Следующая публикация видит изменения: victim удалён, late добавлен.
        log.lock().unwrap().clear();
        channel.publish("t", ()).unwrap();
        assert_eq!(*log.lock().unwrap(), ["late:t"]);
    }

    #[test]
    fn test_context_is_passed_to_callback() {
        struct Ledger {
            entries: Mutex<Vec<i64>>,
        }

        let channel = Channel::new();
        let ledger = Arc::new(Ledger {
            entries: Mutex::new(Vec::new()),
        });
        channel
            .subscribe_with_context("payment.*", ledger.clone(), |ledger, data, _| {
                let amount = data.get("amount").and_then(|v| v.as_i64()).unwrap_or(0);
                ledger.entries.lock().unwrap().push(amount);
                Ok(())
            })
            .unwrap();

        channel
            .publish("payment.received", json!({"amount": 150}))
            .unwrap();
        channel
            .publish("payment.refunded", json!({"amount": -20}))
            .unwrap();

        assert_eq!(*ledger.entries.lock().unwrap(), vec![150, -20]);
    }

    #[test]
    fn test_subscriber_limit() {
        let channel = Channel::builder().name("small").max_subscribers(2).build();
        channel.subscribe("a", |_, _| Ok(())).unwrap();
        let h = channel.subscribe("b", |_, _| Ok(())).unwrap();

        let err = channel.subscribe("c", |_, _| Ok(())).unwrap_err();
        assert_eq!(
            err,
            BusError::SubscriberLimitExceeded {
                channel: "small".to_string(),
                limit: 2
            }
        );

        channel.unsubscribe(h);
        assert!(channel.subscribe("c", |_, _| Ok(())).is_ok());
    }

    #[test]
    fn test_message_metadata() {
        let channel = Channel::builder().name("metrics").build();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        channel
            .subscribe("*", move |_, msg| {
                sink.lock()
                    .unwrap()
                    .push((msg.sequence(), msg.channel_name().map(str::to_string)));
                Ok(())
            })
            .unwrap();

        channel.publish("cpu", ()).unwrap();
        channel.publish("mem", ()).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (1, Some("metrics".to_string())),
                (2, Some("metrics".to_string()))
            ]
        );
    }

    #[test]
    fn test_introspection_and_clear() {
        let channel = Channel::new();
        channel.subscribe("a.*", |_, _| Ok(())).unwrap();
        channel.subscribe("b", |_, _| Ok(())).unwrap();
        channel.subscribe("*.c", |_, _| Err("nope".into())).unwrap();

        assert_eq!(channel.patterns(), ["a.*", "b", "*.c"]);
        assert!(channel.is_anonymous());

        channel.publish("a.c", ()).unwrap();
        assert_eq!(
            channel.stats(),
            ChannelStatsSnapshot {
                published: 1,
                delivered: 1,
                failed: 1
            }
        );

        assert_eq!(channel.clear(), 3);
        assert_eq!(channel.subscription_count(), 0);
        assert_eq!(channel.publish("a.c", ()).unwrap(), PublishReport::default());
    }

    #[test]
    fn test_clones_share_namespace() {
        let channel = Channel::new();
        let alias = channel.clone();
        let log: Log = Arc::default();
        alias.subscribe("ping", recorder(&log, "alias")).unwrap();

        channel.publish("ping", ()).unwrap();
        assert!(channel.ptr_eq(&alias));
        assert!(!channel.ptr_eq(&Channel::new()));
        assert_eq!(*log.lock().unwrap(), ["alias:ping"]);
    }

    #[test]
    fn test_empty_builder_name_is_anonymous() {
        let channel = Channel::builder().name("").build();
        assert!(channel.is_anonymous());
        assert_eq!(channel.name(), None);
    }
}
