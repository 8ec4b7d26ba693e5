#![deny(missing_docs)]
//! The transient message router for sideband.
//!
//! A [`TransientRouter`] observes one session's IOPub broadcast and
//! materializes messages from *other* clients into throwaway display
//! blocks on a [`Receiver`]. It is a pure observer: it never publishes
//! messages, never errors, and signals every decision as a `bool`
//! handled flag. All block state lives behind the receiver; the router
//! carries only its enabled flag, its dispatch policy, and the
//! subscription it releases on disposal.

mod policy;

pub use policy::DispatchPolicy;

use sideband_protocol::message::IopubMessage;
use sideband_protocol::receiver::Receiver;
use sideband_protocol::session::ClientSession;
use sideband_protocol::signal::SubscriptionToken;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, trace};

/// Routes foreign and transient IOPub messages into a console's display
/// area.
///
/// Constructing a router subscribes it to the session's IOPub signal;
/// [`dispose`](Self::dispose) releases the subscription and is safe to
/// call any number of times (dropping the router disposes it too). One
/// router observes one session for one console.
pub struct TransientRouter {
    inner: Arc<RouterInner>,
    token: Mutex<Option<SubscriptionToken>>,
}

struct RouterInner {
    session: Arc<dyn ClientSession>,
    receiver: Arc<dyn Receiver>,
    policy: DispatchPolicy,
    enabled: AtomicBool,
    disposed: AtomicBool,
}

impl TransientRouter {
    /// Attach a router with the default [`DispatchPolicy::Transient`]
    /// policy. Subscribes immediately; no other side effects.
    pub fn new(session: Arc<dyn ClientSession>, receiver: Arc<dyn Receiver>) -> Self {
        Self::with_policy(session, receiver, DispatchPolicy::default())
    }

    /// Attach a router with an explicit dispatch policy. The initial
    /// enabled state is policy-dependent: on for `Transient`, off for
    /// `LegacyMirror`.
    pub fn with_policy(
        session: Arc<dyn ClientSession>,
        receiver: Arc<dyn Receiver>,
        policy: DispatchPolicy,
    ) -> Self {
        let inner = Arc::new(RouterInner {
            session,
            receiver,
            policy,
            enabled: AtomicBool::new(policy.default_enabled()),
            disposed: AtomicBool::new(false),
        });

        let subscribed = Arc::clone(&inner);
        let token = inner
            .session
            .iopub()
            .connect(Arc::new(move |msg| subscribed.handle(msg)));

        Self {
            inner,
            token: Mutex::new(Some(token)),
        }
    }

    /// Whether the router injects blocks. When off, every message is a
    /// no-op with zero receiver calls.
    pub fn enabled(&self) -> bool {
        self.inner.enabled.load(Ordering::Relaxed)
    }

    /// Flip the gate. Pure state: messages delivered while disabled are
    /// not reprocessed on re-enable.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.enabled.store(enabled, Ordering::Relaxed);
    }

    /// The dispatch policy this router was built with.
    pub fn policy(&self) -> DispatchPolicy {
        self.inner.policy
    }

    /// Whether the router has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Relaxed)
    }

    /// Release the subscription. Idempotent: every call after the first
    /// is a guaranteed no-op. Never panics.
    pub fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::Relaxed) {
            return;
        }
        let token = self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(token) = token {
            self.inner.session.iopub().disconnect(token);
        }
        debug!("transient router disposed");
    }

    /// Classify and route one message. This is the body of the
    /// subscribed handler, public so hosts that drive messages manually
    /// share the same code path. Returns `true` when the message
    /// resulted in a block being injected or updated.
    pub fn handle(&self, msg: &IopubMessage) -> bool {
        self.inner.handle(msg)
    }
}

impl Drop for TransientRouter {
    fn drop(&mut self) {
        // The subscribed closure keeps the inner state alive through the
        // session's signal; disposing here breaks that cycle.
        self.dispose();
    }
}

impl RouterInner {
    fn handle(&self, msg: &IopubMessage) -> bool {
        if self.disposed.load(Ordering::Relaxed) {
            return false;
        }
        if !self.enabled.load(Ordering::Relaxed) {
            return false;
        }
        let Some(client) = self.session.kernel_client_id() else {
            return false;
        };

        // Only foreign activity is surfaced: traffic from this client's
        // own request cycle is the console's own history already.
        if msg.originating_session() == Some(client.as_str()) {
            trace!(msg_type = %msg.header.msg_type, "ignoring self-originated message");
            return false;
        }

        // No originating request, nothing to key a block on.
        let Some(request) = msg.originating_request() else {
            return false;
        };

        self.policy.route(self.receiver.as_ref(), msg, &request)
    }
}

impl std::fmt::Debug for TransientRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransientRouter")
            .field("policy", &self.inner.policy)
            .field("enabled", &self.enabled())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
