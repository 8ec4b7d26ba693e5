//! Subscription signal for IOPub delivery.
//!
//! Explicit subscribe/unsubscribe with a capability token: no global
//! listener registries, every subscription is scoped to one signal
//! instance and released by surrendering its token. Delivery is strictly
//! one-at-a-time from the emitter's context — the signal adds no
//! concurrency of its own.

use crate::message::IopubMessage;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// A handler invoked for every emitted message. Returns whether the
/// message was handled.
pub type IopubHandler = Arc<dyn Fn(&IopubMessage) -> bool + Send + Sync>;

/// Opaque capability token identifying one subscription on one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

/// A broadcast signal carrying IOPub messages to connected handlers.
#[derive(Default)]
pub struct IopubSignal {
    next_token: AtomicU64,
    slots: Mutex<Vec<(SubscriptionToken, IopubHandler)>>,
}

impl IopubSignal {
    /// A new signal with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionToken, IopubHandler)>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Connect a handler. The returned token is the only way to
    /// disconnect it.
    pub fn connect(&self, handler: IopubHandler) -> SubscriptionToken {
        let token = SubscriptionToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        self.slots().push((token, handler));
        token
    }

    /// Remove the subscription behind `token`. Returns `false` when the
    /// token is unknown or already surrendered — double-disconnect is
    /// never a fault.
    pub fn disconnect(&self, token: SubscriptionToken) -> bool {
        let mut slots = self.slots();
        let before = slots.len();
        slots.retain(|(t, _)| *t != token);
        slots.len() != before
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.slots().len()
    }

    /// Deliver a message to every connected handler in connection order.
    /// Returns how many handlers reported the message handled.
    ///
    /// Handlers run outside the internal lock, so a handler may
    /// disconnect (itself included) during delivery; such a disconnect
    /// takes effect from the next emit.
    pub fn emit(&self, msg: &IopubMessage) -> usize {
        let snapshot: Vec<IopubHandler> =
            self.slots().iter().map(|(_, h)| Arc::clone(h)).collect();
        let mut handled = 0;
        for handler in &snapshot {
            if (**handler)(msg) {
                handled += 1;
            }
        }
        handled
    }
}

impl std::fmt::Debug for IopubSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IopubSignal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
