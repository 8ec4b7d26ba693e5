#![deny(missing_docs)]
//! Console registration layer for sideband.
//!
//! The host UI framework knows about console widgets; the router knows
//! about sessions and receivers. This crate joins the two with an
//! explicit `ConsoleId → TransientRouter` mapping owned by the
//! registration layer — no attached properties, no monkey-patching the
//! widget's own type. The toggle command surface (`toggle`,
//! `is_enabled`) is the boundary an external command palette binds to.

use sideband_protocol::error::RegistryError;
use sideband_protocol::id::ConsoleId;
use sideband_protocol::receiver::Receiver;
use sideband_protocol::session::ClientSession;
use sideband_router::{DispatchPolicy, TransientRouter};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Owns the mapping from console widgets to their routers.
///
/// Attach a router when a console is created, detach when it is
/// disposed. Detaching (and replacing) disposes the router, so the
/// registry never leaks a live subscription past its console.
#[derive(Default)]
pub struct ConsoleRegistry {
    routers: Mutex<HashMap<ConsoleId, Arc<TransientRouter>>>,
}

impl ConsoleRegistry {
    /// A new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn routers(&self) -> std::sync::MutexGuard<'_, HashMap<ConsoleId, Arc<TransientRouter>>> {
        self.routers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach a router (default policy) for `console`. Re-attaching an
    /// id disposes and replaces the previous router.
    pub fn attach(
        &self,
        console: ConsoleId,
        session: Arc<dyn ClientSession>,
        receiver: Arc<dyn Receiver>,
    ) -> Arc<TransientRouter> {
        self.attach_with_policy(console, session, receiver, DispatchPolicy::default())
    }

    /// Attach a router with an explicit dispatch policy.
    pub fn attach_with_policy(
        &self,
        console: ConsoleId,
        session: Arc<dyn ClientSession>,
        receiver: Arc<dyn Receiver>,
        policy: DispatchPolicy,
    ) -> Arc<TransientRouter> {
        let router = Arc::new(TransientRouter::with_policy(session, receiver, policy));
        debug!(console = %console, ?policy, "attached transient router");
        if let Some(previous) = self.routers().insert(console, Arc::clone(&router)) {
            previous.dispose();
        }
        router
    }

    /// Dispose and forget the router for `console`. No-op for unknown
    /// ids, so console-disposal wiring can call this unconditionally.
    pub fn detach(&self, console: &ConsoleId) {
        if let Some(router) = self.routers().remove(console) {
            router.dispose();
            debug!(console = %console, "detached transient router");
        }
    }

    /// The router attached for `console`, if any.
    pub fn router(&self, console: &ConsoleId) -> Option<Arc<TransientRouter>> {
        self.routers().get(console).cloned()
    }

    /// Flip the enabled flag on `console`'s router and return the new
    /// value. This is the toggle command's execute path.
    pub fn toggle(&self, console: &ConsoleId) -> Result<bool, RegistryError> {
        let router = self
            .router(console)
            .ok_or_else(|| RegistryError::ConsoleNotFound(console.clone()))?;
        let enabled = !router.enabled();
        router.set_enabled(enabled);
        Ok(enabled)
    }

    /// Current enabled state for `console` — the toggle-state indicator.
    pub fn is_enabled(&self, console: &ConsoleId) -> Result<bool, RegistryError> {
        self.router(console)
            .map(|r| r.enabled())
            .ok_or_else(|| RegistryError::ConsoleNotFound(console.clone()))
    }

    /// Number of consoles with an attached router.
    pub fn len(&self) -> usize {
        self.routers().len()
    }

    /// Whether no console is attached.
    pub fn is_empty(&self) -> bool {
        self.routers().is_empty()
    }
}
