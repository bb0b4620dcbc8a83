//! Events emitted on tier transitions for subscribers.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use vouch_types::{MemberId, Tier};

/// Tier-lifecycle events that observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TierEvent {
    /// A member's stored tier now exactly matches the guild's required tier.
    Verified { member: MemberId, tier: Tier },
    /// A member's verification record was purged.
    Purged { member: MemberId },
}

/// Token returned by [`EventBus::subscribe`], used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&TierEvent) + Send + Sync>;

/// Synchronous fan-out event bus for tier events.
///
/// Listeners are invoked inline on the emitting task, in subscription order;
/// keep handlers fast to avoid stalling store operations. A panicking
/// listener is isolated: the panic is caught and logged, and remaining
/// listeners still run. There is no replay: a listener only observes
/// emissions after its subscription.
pub struct EventBus {
    listeners: RwLock<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a listener; returns the token that removes it again.
    pub fn subscribe(&self, listener: Box<dyn Fn(&TierEvent) + Send + Sync>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().unwrap().push((id, Arc::from(listener)));
        id
    }

    /// Remove a listener. Returns `false` when the token is unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write().unwrap();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    pub fn emit(&self, event: &TierEvent) {
        // Snapshot under the lock, invoke outside it, so listeners may
        // themselves subscribe/unsubscribe without deadlocking.
        let snapshot: Vec<(SubscriptionId, Listener)> =
            self.listeners.read().unwrap().clone();
        for (id, listener) in snapshot {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                tracing::warn!(subscription = id.0, ?event, "event listener panicked");
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
