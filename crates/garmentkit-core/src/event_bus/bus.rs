//! Event bus owned by one editing session.
//!
//! Handlers run synchronously on the publishing thread, in subscription
//! order. Async consumers take a `broadcast` receiver instead. An optional
//! sequence-numbered log keeps the most recent events for diagnostics.

use parking_lot::RwLock;
use std::collections::VecDeque;
use std::fmt;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{DesignEvent, EventCategory};

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "sub-{}", &simple[..8])
    }
}

/// Which events a handler wants.
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    #[default]
    All,
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Filter for a single category.
    pub fn only(category: EventCategory) -> Self {
        EventFilter::Categories(vec![category])
    }

    pub fn matches(&self, event: &DesignEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

/// Bus tuning.
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Capacity of the async broadcast channel.
    pub channel_capacity: usize,
    /// Number of recent events kept in the log; 0 disables it.
    pub log_capacity: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 128,
            log_capacity: 0,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum EventBusError {
    #[error("No handlers or receivers are listening")]
    NoSubscribers,
}

/// An event as kept in the diagnostic log.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedEvent {
    /// Monotonic publish counter, starting at 1.
    pub seq: u64,
    pub event: DesignEvent,
}

type Handler = Box<dyn Fn(&DesignEvent) + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    filter: EventFilter,
    handler: Handler,
}

#[derive(Default)]
struct EventLog {
    next_seq: u64,
    entries: VecDeque<LoggedEvent>,
}

/// Design event bus.
///
/// Each `DesignerState` owns one (behind an `Arc`); there is no process-wide
/// instance, so two sessions never observe each other.
pub struct EventBus {
    sender: broadcast::Sender<DesignEvent>,
    subscriptions: RwLock<Vec<Subscription>>,
    log: RwLock<EventLog>,
    config: EventBusConfig,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    pub fn with_config(config: EventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            sender,
            subscriptions: RwLock::new(Vec::new()),
            log: RwLock::new(EventLog::default()),
            config,
        }
    }

    /// Deliver `event` to matching handlers and to every async receiver.
    ///
    /// Returns how many handlers and receivers saw it. Callers inside the
    /// engine ignore [`EventBusError::NoSubscribers`]; nobody listening is
    /// not a failure of the mutation that produced the event.
    pub fn publish(&self, event: DesignEvent) -> Result<usize, EventBusError> {
        tracing::trace!(category = %event.category(), "{}", event.description());
        self.record(&event);

        let subscriptions = self.subscriptions.read();
        if subscriptions.is_empty() && self.sender.receiver_count() == 0 {
            return Err(EventBusError::NoSubscribers);
        }

        let mut delivered = 0;
        for subscription in subscriptions.iter() {
            if subscription.filter.matches(&event) {
                (subscription.handler)(&event);
                delivered += 1;
            }
        }
        drop(subscriptions);

        Ok(delivered + self.sender.send(event).unwrap_or(0))
    }

    /// Register a synchronous handler. Keep it short; it runs inside `publish`.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&DesignEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.subscriptions.write().push(Subscription {
            id,
            filter,
            handler: Box::new(handler),
        });
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Remove a handler; false when the id is unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.write();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        let removed = subscriptions.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    pub fn receiver(&self) -> broadcast::Receiver<DesignEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Logged events with a sequence number greater than `after`.
    /// Empty when the log is disabled.
    pub fn events_since(&self, after: u64) -> Vec<LoggedEvent> {
        self.log
            .read()
            .entries
            .iter()
            .filter(|e| e.seq > after)
            .cloned()
            .collect()
    }

    /// Sequence number of the last published event (0 before any).
    pub fn last_seq(&self) -> u64 {
        self.log.read().next_seq
    }

    pub fn clear_log(&self) {
        self.log.write().entries.clear();
    }

    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    fn record(&self, event: &DesignEvent) {
        let mut log = self.log.write();
        log.next_seq += 1;
        if self.config.log_capacity == 0 {
            return;
        }
        let seq = log.next_seq;
        log.entries.push_back(LoggedEvent {
            seq,
            event: event.clone(),
        });
        while log.entries.len() > self.config.log_capacity {
            log.entries.pop_front();
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("receivers", &self.sender.receiver_count())
            .field("last_seq", &self.last_seq())
            .finish()
    }
}
