// Selection notifications that flow between UI components
//
// The exchange list and the detail view never reference each other. The list
// holds a `Publisher`, the detail view holds a `Subscription`, and both are
// handed out by a `SelectionBus` at assembly time. Delivery is fire-and-forget:
// the producer neither knows nor cares how many subscribers there are.

use crate::model::Exchange;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Default number of undelivered notifications kept per subscriber
pub const DEFAULT_CAPACITY: usize = 64;

/// Notification emitted by selection producers
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A list entry was selected; carries a snapshot of the full record
    ItemSelected { item: Exchange },
}

impl Notification {
    /// Conventional event name
    pub fn name(&self) -> &'static str {
        match self {
            Notification::ItemSelected { .. } => "item-selected",
        }
    }
}

/// Broadcast channel connecting selection producers to any number of observers
#[derive(Debug, Clone)]
pub struct SelectionBus {
    tx: broadcast::Sender<Notification>,
}

impl SelectionBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Handle for components that emit notifications
    pub fn publisher(&self) -> Publisher {
        Publisher {
            tx: self.tx.clone(),
        }
    }

    /// Register a new observer
    ///
    /// Only notifications published after this call are delivered to it.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for SelectionBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Sending half of the bus
#[derive(Debug, Clone)]
pub struct Publisher {
    tx: broadcast::Sender<Notification>,
}

impl Publisher {
    /// Broadcast a notification; returns how many observers received it
    pub fn publish(&self, notification: Notification) -> usize {
        let name = notification.name();
        // No receivers is not an error for a broadcast
        let delivered = self.tx.send(notification).unwrap_or(0);
        tracing::trace!(event = name, delivered, "notification published");
        delivered
    }
}

/// Receiving half of the bus, owned by one observer
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<Notification>,
}

impl Subscription {
    /// Next pending notification, if any, without waiting
    ///
    /// If the observer fell behind, the oldest notifications are skipped and
    /// delivery resumes with the oldest one still retained.
    pub fn try_next(&mut self) -> Option<Notification> {
        loop {
            match self.rx.try_recv() {
                Ok(notification) => return Some(notification),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "subscriber lagged, skipping notifications");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Take every pending notification in publish order
    pub fn drain(&mut self) -> Vec<Notification> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Message, StatusCode};

    fn exchange(path: &str) -> Exchange {
        Exchange {
            method: "GET".to_string(),
            path: path.to_string(),
            status: StatusCode::from(200),
            request: Message::default(),
            response: Message::default(),
        }
    }

    #[test]
    fn test_every_subscriber_receives_notification() {
        let bus = SelectionBus::default();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        let delivered = bus.publisher().publish(Notification::ItemSelected {
            item: exchange("/a"),
        });

        assert_eq!(delivered, 2);
        assert_eq!(
            first.try_next(),
            Some(Notification::ItemSelected {
                item: exchange("/a")
            })
        );
        assert_eq!(
            second.try_next(),
            Some(Notification::ItemSelected {
                item: exchange("/a")
            })
        );
        assert_eq!(first.try_next(), None);
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let bus = SelectionBus::default();
        let delivered = bus.publisher().publish(Notification::ItemSelected {
            item: exchange("/nobody"),
        });
        assert_eq!(delivered, 0);
    }

    #[test]
    fn test_late_subscriber_misses_earlier_notifications() {
        let bus = SelectionBus::default();
        let publisher = bus.publisher();
        let mut early = bus.subscribe();

        publisher.publish(Notification::ItemSelected {
            item: exchange("/first"),
        });
        let mut late = bus.subscribe();
        publisher.publish(Notification::ItemSelected {
            item: exchange("/second"),
        });

        assert_eq!(early.drain().len(), 2);
        let late_items = late.drain();
        assert_eq!(late_items.len(), 1);
        assert_eq!(
            late_items[0],
            Notification::ItemSelected {
                item: exchange("/second")
            }
        );
    }

    #[test]
    fn test_lagged_subscriber_keeps_latest() {
        let bus = SelectionBus::new(2);
        let publisher = bus.publisher();
        let mut sub = bus.subscribe();

        for path in ["/1", "/2", "/3", "/4"] {
            publisher.publish(Notification::ItemSelected {
                item: exchange(path),
            });
        }

        let received = sub.drain();
        assert_eq!(received.len(), 2);
        assert_eq!(
            received.last(),
            Some(&Notification::ItemSelected {
                item: exchange("/4")
            })
        );
    }

    #[test]
    fn test_notification_name() {
        let n = Notification::ItemSelected {
            item: exchange("/"),
        };
        assert_eq!(n.name(), "item-selected");
    }
}
