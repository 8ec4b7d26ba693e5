//! RecordingReceiver — HashMap-backed Receiver that records every call.

use crate::block::{BlockHandle, DisplayBlock};
use crate::id::RequestId;
use crate::receiver::Receiver;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// One recorded receiver call, for inspection in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiverCall {
    /// `create_block` was called.
    CreateBlock,
    /// `add_block` was called with this request id.
    AddBlock(RequestId),
    /// `get_block` was called with this request id.
    GetBlock(RequestId),
    /// `update` was called.
    Update,
}

/// A receiver that stores blocks in a `HashMap` and records every call.
/// Use [`calls`](Self::calls) to assert on what the router did.
#[derive(Default)]
pub struct RecordingReceiver {
    blocks: Mutex<HashMap<RequestId, BlockHandle>>,
    calls: Mutex<Vec<ReceiverCall>>,
}

impl RecordingReceiver {
    /// A new, empty receiver.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: ReceiverCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    /// Snapshot of every call made so far, in order.
    pub fn calls(&self) -> Vec<ReceiverCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many calls match the given predicate.
    pub fn count(&self, pred: impl Fn(&ReceiverCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    /// How many times `update` was called.
    pub fn update_count(&self) -> usize {
        self.count(|c| matches!(c, ReceiverCall::Update))
    }

    /// How many times `create_block` was called.
    pub fn create_count(&self) -> usize {
        self.count(|c| matches!(c, ReceiverCall::CreateBlock))
    }

    /// True when no receiver method has been called at all.
    pub fn is_untouched(&self) -> bool {
        self.calls().is_empty()
    }

    /// Snapshot of the block registered under `request`, if any.
    pub fn block_snapshot(&self, request: &RequestId) -> Option<DisplayBlock> {
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(request)
            .map(BlockHandle::snapshot)
    }
}

impl Receiver for RecordingReceiver {
    fn create_block(&self) -> BlockHandle {
        self.record(ReceiverCall::CreateBlock);
        BlockHandle::new(DisplayBlock::new())
    }

    fn add_block(&self, block: BlockHandle, request: &RequestId) {
        self.record(ReceiverCall::AddBlock(request.clone()));
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(request.clone(), block);
    }

    fn get_block(&self, request: &RequestId) -> Option<BlockHandle> {
        self.record(ReceiverCall::GetBlock(request.clone()));
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(request)
            .cloned()
    }

    fn update(&self) {
        self.record(ReceiverCall::Update);
    }
}
