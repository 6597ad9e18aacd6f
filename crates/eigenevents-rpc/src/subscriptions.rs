//! `eth_subscribe` bookkeeping: routes notifications to the channel of the
//! subscription they belong to.
//!
//! Each subscription gets a bounded queue. When a consumer falls behind and
//! its queue is full, further notifications for it are dropped and logged at
//! `warn` until it catches up; the socket is never blocked by one slow reader.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Subscription id returned by `eth_subscribe`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub String);

impl From<String> for SubscriptionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared map of live subscriptions. Clones share state.
#[derive(Clone, Default)]
pub struct SubscriptionManager {
    senders: Arc<Mutex<HashMap<SubscriptionId, mpsc::Sender<Value>>>>,
}

impl SubscriptionManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<SubscriptionId, mpsc::Sender<Value>>> {
        self.senders.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a subscription and return the receiving half of its
    /// channel, which holds at most `capacity` undelivered notifications.
    pub fn register(&self, id: SubscriptionId, capacity: usize) -> mpsc::Receiver<Value> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        self.entries().insert(id, tx);
        rx
    }

    /// Forward a notification payload without waiting. Returns `false` if
    /// the id is unknown, its queue is full (the payload is dropped), or its
    /// receiver has been dropped (the entry is removed).
    pub fn dispatch(&self, id: &SubscriptionId, message: Value) -> bool {
        let mut entries = self.entries();
        let Some(tx) = entries.get(id) else {
            tracing::debug!(subscription = %id, "notification for inactive subscription");
            return false;
        };
        match tx.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    subscription = %id,
                    capacity = tx.max_capacity(),
                    "subscription queue full, dropping notification"
                );
                false
            }
            Err(TrySendError::Closed(_)) => {
                entries.remove(id);
                false
            }
        }
    }

    pub fn remove(&self, id: &SubscriptionId) -> bool {
        self.entries().remove(id).is_some()
    }

    /// Drop every sender, ending all subscription streams.
    pub fn close_all(&self) {
        self.entries().clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
