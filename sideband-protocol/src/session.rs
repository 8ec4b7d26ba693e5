//! The client-session contract — the message source a router observes.

use crate::id::ClientId;
use crate::signal::IopubSignal;

/// A client session attached to a kernel's broadcast channel.
///
/// The router borrows the session for its lifetime: it subscribes to
/// [`iopub`](Self::iopub) on construction and queries
/// [`kernel_client_id`](Self::kernel_client_id) on every message to
/// filter out its own request cycle's traffic.
///
/// Implementations:
/// - a live kernel connection (production)
/// - `FixedSession` (test-utils feature): scripted identity, real signal
pub trait ClientSession: Send + Sync {
    /// The kernel's own client identity on the channel. `None` when no
    /// kernel is live, in which case the router ignores all traffic.
    fn kernel_client_id(&self) -> Option<ClientId>;

    /// The broadcast signal delivering this session's IOPub messages.
    fn iopub(&self) -> &IopubSignal;
}
