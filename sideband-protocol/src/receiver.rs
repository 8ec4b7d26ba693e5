//! The Receiver contract — what the router requires of a host console.
//!
//! The request-id → block mapping lives entirely behind this trait. The
//! router is stateless beyond its enabled flag and subscription: it never
//! caches a handle across calls, so [`Receiver::get_block`] is invoked on
//! every routed message and should be O(1) or O(log n).

use crate::block::BlockHandle;
use crate::id::RequestId;

/// A receiver of injected display blocks.
///
/// Implementations:
/// - a console widget's model layer (production)
/// - `RecordingReceiver` (test-utils feature): records every call
///
/// Mutations are assumed synchronous and reentrant-safe from the router's
/// single calling context; `update` may be coalesced internally.
pub trait Receiver: Send + Sync {
    /// Allocate a new, empty display block. The caller holds the handle
    /// until [`add_block`](Self::add_block) registers it.
    fn create_block(&self) -> BlockHandle;

    /// Associate `block` with the request that produced it. The router
    /// never calls this twice for the same id — the lookup in
    /// [`get_block`](Self::get_block) guards creation.
    fn add_block(&self, block: BlockHandle, request: &RequestId);

    /// Look up the block associated with a request id. Absence is an
    /// explicit `None`, never a sentinel.
    fn get_block(&self, request: &RequestId) -> Option<BlockHandle>;

    /// Request a re-render of the visible console. Called at most once
    /// per handled message.
    fn update(&self);
}
