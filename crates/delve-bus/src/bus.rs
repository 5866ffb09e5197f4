//! The event bus: a broadcast hub fanning [`DungeonEvent`]s out to
//! subscribers.
//!
//! [`EventBus`] is an explicitly constructed value, cheap to clone, whose
//! lifetime is tied to the world instance that owns it. Subscribers see
//! events in publish order and only from the moment they subscribed; there
//! is no replay. Dropping a subscription detaches it.

use tokio::sync::broadcast;

use delve_types::{DungeonEvent, Topic};

use crate::error::RecvError;

/// Capacity of the underlying broadcast channel.
///
/// If a subscriber falls behind by more than this many events it
/// receives [`RecvError::Lagged`] and resumes at the oldest retained
/// event.
pub const BUS_CAPACITY: usize = 256;

/// The in-process event distribution hub.
///
/// Cloning shares the same channel, so any clone may publish and any
/// clone may mint subscriptions.
#[derive(Debug, Clone)]
pub struct EventBus {
    /// Broadcast sender; receivers are minted per subscription.
    tx: broadcast::Sender<DungeonEvent>,
}

impl EventBus {
    /// Create a bus with the default capacity of [`BUS_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(BUS_CAPACITY)
    }

    /// Create a bus with an explicit channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to every live subscription.
    ///
    /// Returns the number of subscribers the event was delivered to.
    /// Publishing with zero subscribers is not an error; the event is
    /// simply dropped.
    pub fn publish(&self, event: DungeonEvent) -> usize {
        let topic = event.topic();
        // send returns Err only when there are zero receivers, which is
        // normal before any consumer has attached.
        let delivered = self.tx.send(event).unwrap_or(0);
        if delivered == 0 {
            tracing::trace!(topic = %topic, "No subscribers; event dropped");
        }
        delivered
    }

    /// Subscribe to every event on the bus.
    pub fn subscribe_all(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Subscribe to a single topic.
    ///
    /// Events on other topics are silently skipped by the subscription's
    /// receive loop, so ordering within the topic is preserved.
    pub fn subscribe(&self, topic: Topic) -> TopicSubscription {
        TopicSubscription {
            rx: self.tx.subscribe(),
            topic,
        }
    }

    /// Number of currently attached subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A live subscription to every event on the bus.
///
/// Dropping the value detaches it from the bus.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<DungeonEvent>,
}

impl Subscription {
    /// Wait for the next event.
    pub async fn recv(&mut self) -> Result<DungeonEvent, RecvError> {
        self.rx.recv().await.map_err(RecvError::from)
    }
}

/// A live subscription filtered to one [`Topic`].
///
/// Dropping the value detaches it from the bus.
#[derive(Debug)]
pub struct TopicSubscription {
    rx: broadcast::Receiver<DungeonEvent>,
    topic: Topic,
}

impl TopicSubscription {
    /// Wait for the next event on the subscribed topic.
    ///
    /// A [`RecvError::Lagged`] is surfaced as-is so the caller knows
    /// events were missed; the skip count covers all topics, not just
    /// the subscribed one.
    pub async fn recv(&mut self) -> Result<DungeonEvent, RecvError> {
        loop {
            let event = self.rx.recv().await?;
            if event.topic() == self.topic {
                return Ok(event);
            }
        }
    }

    /// The topic this subscription is filtered to.
    pub const fn topic(&self) -> Topic {
        self.topic
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use delve_types::{MonsterId, PlayerId, Position};

    use super::*;

    fn damaged(damage: i32) -> DungeonEvent {
        DungeonEvent::PlayerDamaged {
            player_id: PlayerId::new(),
            damage,
            remaining_hp: 100_i32.saturating_sub(damage),
        }
    }

    fn moved(y: i32) -> DungeonEvent {
        DungeonEvent::MonsterMoved {
            monster_id: MonsterId::new(),
            from: Position::new(1, y),
            to: Position::new(2, y),
        }
    }

    #[tokio::test]
    async fn publish_counts_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(damaged(5)), 0);

        let _a = bus.subscribe_all();
        let _b = bus.subscribe_all();
        assert_eq!(bus.publish(damaged(5)), 2);
        assert_eq!(bus.subscriber_count(), 2);
    }

    #[tokio::test]
    async fn subscribers_see_publish_order() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe_all();

        for damage in 1..=4 {
            bus.publish(damaged(damage));
        }
        for expected in 1..=4 {
            let event = sub.recv().await.unwrap();
            let DungeonEvent::PlayerDamaged { damage, .. } = event else {
                panic!("wrong variant");
            };
            assert_eq!(damage, expected);
        }
    }

    #[tokio::test]
    async fn no_replay_before_subscription() {
        let bus = EventBus::new();
        bus.publish(damaged(1));

        let mut sub = bus.subscribe_all();
        bus.publish(damaged(2));

        let event = sub.recv().await.unwrap();
        let DungeonEvent::PlayerDamaged { damage, .. } = event else {
            panic!("wrong variant");
        };
        assert_eq!(damage, 2);
    }

    #[tokio::test]
    async fn topic_subscription_filters_and_preserves_order() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe(Topic::MonsterMoved);

        bus.publish(damaged(1));
        bus.publish(moved(1));
        bus.publish(damaged(2));
        bus.publish(moved(2));

        for expected_y in 1..=2 {
            let event = sub.recv().await.unwrap();
            assert_eq!(event.topic(), Topic::MonsterMoved);
            let DungeonEvent::MonsterMoved { from, .. } = event else {
                panic!("wrong variant");
            };
            assert_eq!(from.y, expected_y);
        }
    }

    #[tokio::test]
    async fn every_subscriber_receives_each_event() {
        let bus = EventBus::new();
        let mut a = bus.subscribe(Topic::PlayerDamaged);
        let mut b = bus.subscribe(Topic::PlayerDamaged);

        bus.publish(damaged(9));

        for sub in [&mut a, &mut b] {
            let event = sub.recv().await.unwrap();
            assert_eq!(event.topic(), Topic::PlayerDamaged);
        }
    }

    #[tokio::test]
    async fn dropping_a_subscription_detaches_it() {
        let bus = EventBus::new();
        let a = bus.subscribe_all();
        let _b = bus.subscribe_all();

        drop(a);
        assert_eq!(bus.publish(damaged(1)), 1);
    }

    #[tokio::test]
    async fn recv_reports_closed_after_bus_drop() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe_all();
        drop(bus);

        assert_eq!(sub.recv().await, Err(RecvError::Closed));
    }

    #[tokio::test]
    async fn slow_subscriber_sees_lag() {
        let bus = EventBus::with_capacity(2);
        let mut sub = bus.subscribe_all();

        for damage in 1..=5 {
            bus.publish(damaged(damage));
        }

        assert_eq!(sub.recv().await, Err(RecvError::Lagged(3)));
        // After the lag report the subscription resumes at the oldest
        // retained event.
        let event = sub.recv().await.unwrap();
        let DungeonEvent::PlayerDamaged { damage, .. } = event else {
            panic!("wrong variant");
        };
        assert_eq!(damage, 4);
    }
}
