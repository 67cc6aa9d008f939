use tracing::{error, warn};

use crate::error::SubscriberFailure;

/// Хук наблюдения за сбоями подписчиков.
///
/// Канал перехватывает ошибку или панику callback, продолжает доставку
/// остальным подписчикам и сообщает о сбое сюда, а не издателю.
pub trait ErrorHook: Send + Sync {
    fn on_subscriber_failure(
        &self,
        failure: &SubscriberFailure,
    );
}

impl<F> ErrorHook for F
where
    F: Fn(&SubscriberFailure) + Send + Sync,
{
    fn on_subscriber_failure(
        &self,
        failure: &SubscriberFailure,
    ) {
        self(failure)
    }
}

/// Хук по умолчанию: пишет сбой в `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHook;

impl ErrorHook for LogHook {
    fn on_subscriber_failure(
        &self,
        failure: &SubscriberFailure,
    ) {
        let channel = failure.channel.as_deref().unwrap_or("<unnamed>");
        if failure.is_panic() {
            error!(
                channel,
                topic = %failure.topic,
                pattern = %failure.pattern,
                subscription_id = failure.subscription_id,
                reason = %failure.reason,
                "Subscriber panicked during dispatch"
            );
        } else {
            warn!(
                channel,
                topic = %failure.topic,
                pattern = %failure.pattern,
                subscription_id = failure.subscription_id,
                reason = %failure.reason,
                "Subscriber failed during dispatch"
            );
        }
    }
}
