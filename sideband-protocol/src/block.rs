//! The display-block model — the visual unit injected into a console.
//!
//! Blocks are owned by the [`Receiver`](crate::receiver::Receiver); the
//! router only ever touches one through a [`BlockHandle`] for the span of
//! a single message-handling call. The handle is a shared reference
//! because ownership transfers to the receiver at registration while the
//! router still appends the triggering message's output afterwards.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// Style marker attached to every injected block so the UI can visually
/// distinguish foreign content from user-authored history.
pub const TRANSIENT_BLOCK_TAG: &str = "sideband-transient";

/// The kind tag stamped on an output record.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    /// Result of an execution.
    ExecuteResult,
    /// Rich display data.
    DisplayData,
    /// Streamed text.
    Stream,
    /// An error payload.
    Error,
}

/// One record in a block's ordered output sequence.
///
/// The router always stamps `output_type` itself from the message kind,
/// overriding whatever the payload claimed.
#[non_exhaustive]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputRecord {
    /// What kind of output this is.
    pub output_type: OutputType,
    /// The message content carrying the output payload.
    pub data: serde_json::Value,
}

impl OutputRecord {
    /// An output record stamped with the given type.
    pub fn new(output_type: OutputType, data: serde_json::Value) -> Self {
        Self { output_type, data }
    }

    /// A display-data output (the transient routing path).
    pub fn display_data(data: serde_json::Value) -> Self {
        Self::new(OutputType::DisplayData, data)
    }
}

/// A display block: execution counter, textual body, trust flag, and an
/// ordered output sequence.
#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayBlock {
    /// The execution counter shown next to the block, when known.
    pub execution_count: Option<i64>,
    /// The block's textual body (the code that was executed).
    pub source: String,
    /// Whether the block's content is trusted by the host.
    pub trusted: bool,
    /// Style markers for the UI layer.
    pub tags: Vec<String>,
    /// Ordered output records.
    pub outputs: Vec<OutputRecord>,
    /// A clear was requested but deferred until the next output arrives.
    pub pending_clear: bool,
}

impl DisplayBlock {
    /// A new, empty, untrusted block.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Cheaply cloneable shared handle to a [`DisplayBlock`].
#[derive(Debug, Clone, Default)]
pub struct BlockHandle(Arc<Mutex<DisplayBlock>>);

impl BlockHandle {
    /// Wrap a block in a shared handle.
    pub fn new(block: DisplayBlock) -> Self {
        Self(Arc::new(Mutex::new(block)))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DisplayBlock> {
        // Single calling context by contract; recover rather than
        // propagate poisoning from a panicked test thread.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an output record. A pending deferred clear resolves here:
    /// the outputs present before the clear request are dropped, then the
    /// new record is appended.
    pub fn push_output(&self, output: OutputRecord) {
        let mut block = self.lock();
        if block.pending_clear {
            block.outputs.clear();
            block.pending_clear = false;
        }
        block.outputs.push(output);
    }

    /// Clear the output sequence. With `wait` set, clearing is deferred
    /// until the next output arrives instead of happening immediately —
    /// the flag is delegated here by the router, not decided by it.
    pub fn clear_outputs(&self, wait: bool) {
        let mut block = self.lock();
        if wait {
            block.pending_clear = true;
        } else {
            block.outputs.clear();
            block.pending_clear = false;
        }
    }

    /// Set the block's body and execution counter, marking it trusted.
    /// Used when mirroring a foreign client's accepted input.
    pub fn set_input(&self, source: impl Into<String>, execution_count: Option<i64>) {
        let mut block = self.lock();
        block.source = source.into();
        block.execution_count = execution_count;
        block.trusted = true;
    }

    /// Attach a style marker, once.
    pub fn tag(&self, tag: &str) {
        let mut block = self.lock();
        if !block.tags.iter().any(|t| t == tag) {
            block.tags.push(tag.to_owned());
        }
    }

    /// Clone the current block state for inspection.
    pub fn snapshot(&self) -> DisplayBlock {
        self.lock().clone()
    }
}
