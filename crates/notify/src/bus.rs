//! Publish/subscribe abstraction for notifications.

use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

/// A subscription to a notification stream.
///
/// Each subscription receives a copy of every message published after it was
/// created (broadcast semantics). Dropping the subscription unsubscribes; the
/// bus prunes the dead sender on its next publish.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain everything currently queued.
    pub fn drain(&self) -> Vec<M> {
        let mut messages = Vec::new();
        while let Ok(message) = self.try_recv() {
            messages.push(message);
        }
        messages
    }
}

/// Notification bus (pub/sub abstraction).
///
/// Best-effort fan-out: publishing never fails because a subscriber went
/// away, and a bus with no subscribers silently drops messages (matching a
/// dashboard with no toast container mounted).
pub trait NotificationBus<M>: Send + Sync {
    fn publish(&self, message: M);

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> NotificationBus<M> for Arc<B>
where
    B: NotificationBus<M> + ?Sized,
{
    fn publish(&self, message: M) {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}

/// In-memory pub/sub bus.
///
/// - No IO / no async
/// - Best-effort fan-out
/// - Dead subscribers are dropped while publishing
#[derive(Debug)]
pub struct InMemoryNotificationBus<M> {
    subscribers: Mutex<Vec<mpsc::Sender<M>>>,
}

impl<M> InMemoryNotificationBus<M> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M> Default for InMemoryNotificationBus<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M> NotificationBus<M> for InMemoryNotificationBus<M>
where
    M: Clone + Send + 'static,
{
    fn publish(&self, message: M) {
        if let Ok(mut subs) = self.subscribers.lock() {
            // Drop any dead subscribers while publishing.
            subs.retain(|tx| tx.send(message.clone()).is_ok());
        }
    }

    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned the subscription is still returned;
        // it just never receives messages.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{Notification, NotificationKind};

    #[test]
    fn subscribers_receive_published_messages() {
        let bus = InMemoryNotificationBus::new();
        let sub = bus.subscribe();

        bus.publish(Notification::success("Alta exitosa"));
        let got = sub.try_recv().unwrap();
        assert_eq!(got.kind, NotificationKind::Success);
        assert_eq!(got.message, "Alta exitosa");
    }

    #[test]
    fn every_subscriber_gets_a_copy() {
        let bus = InMemoryNotificationBus::new();
        let first = bus.subscribe();
        let second = bus.subscribe();

        bus.publish(Notification::error("Error al agregar salida"));
        assert!(first.try_recv().is_ok());
        assert!(second.try_recv().is_ok());
    }

    #[test]
    fn dropped_subscription_unsubscribes() {
        let bus = InMemoryNotificationBus::new();
        let kept = bus.subscribe();
        let dropped = bus.subscribe();
        drop(dropped);

        bus.publish(Notification::success("first"));
        bus.publish(Notification::success("second"));
        assert_eq!(kept.drain().len(), 2);
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus: InMemoryNotificationBus<Notification> = InMemoryNotificationBus::new();
        bus.publish(Notification::success("nobody listening"));
    }
}
