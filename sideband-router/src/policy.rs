//! Dispatch policies — which message kinds drive the console.
//!
//! Two policies exist and they are mutually exclusive by construction:
//! a router runs exactly one, chosen when it is built. Merging them
//! would double-handle the standard execution kinds that the narrow
//! policy deliberately ignores.

use sideband_protocol::block::{BlockHandle, OutputRecord, TRANSIENT_BLOCK_TAG};
use sideband_protocol::id::RequestId;
use sideband_protocol::message::{IopubMessage, MessageKind};
use sideband_protocol::receiver::Receiver;
use tracing::{debug, trace};

/// How a router maps message kinds to display blocks.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// React only to `transient_display_data` — content other clients
    /// explicitly marked for ephemeral display. The production default.
    #[default]
    Transient,
    /// Mirror the standard execution lifecycle kinds (`execute_input`,
    /// `execute_result`, `display_data`, `stream`, `error`,
    /// `clear_output`) of foreign requests. Kept for hosts that want a
    /// full echo of other clients' activity; off by default.
    LegacyMirror,
}

impl DispatchPolicy {
    /// The initial value of a router's enabled flag under this policy.
    /// Transient injection is opt-out; full mirroring is opt-in.
    pub fn default_enabled(&self) -> bool {
        matches!(self, Self::Transient)
    }

    /// Route one already-filtered message. `request` is the message's
    /// originating request id; self-origin and gating checks have
    /// already passed. Returns whether the message was handled.
    pub(crate) fn route(
        &self,
        receiver: &dyn Receiver,
        msg: &IopubMessage,
        request: &RequestId,
    ) -> bool {
        match self {
            Self::Transient => route_transient(receiver, msg, request),
            Self::LegacyMirror => route_legacy(receiver, msg, request),
        }
    }
}

/// Find the block for `request` or inject a new tagged one.
fn get_or_create(receiver: &dyn Receiver, request: &RequestId) -> BlockHandle {
    match receiver.get_block(request) {
        Some(block) => block,
        None => {
            let block = receiver.create_block();
            block.tag(TRANSIENT_BLOCK_TAG);
            receiver.add_block(block.clone(), request);
            debug!(request = %request, "injected transient block");
            block
        }
    }
}

fn route_transient(receiver: &dyn Receiver, msg: &IopubMessage, request: &RequestId) -> bool {
    if msg.kind() != Some(MessageKind::TransientDisplayData) {
        trace!(msg_type = %msg.header.msg_type, "ignoring non-transient kind");
        return false;
    }

    let block = get_or_create(receiver, request);
    block.push_output(OutputRecord::display_data(msg.content.clone()));
    receiver.update();
    true
}

fn route_legacy(receiver: &dyn Receiver, msg: &IopubMessage, request: &RequestId) -> bool {
    let Some(kind) = msg.kind() else {
        trace!(msg_type = %msg.header.msg_type, "ignoring unknown kind");
        return false;
    };

    match kind {
        MessageKind::ExecuteInput => {
            let block = get_or_create(receiver, request);
            let code = msg
                .content
                .get("code")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default();
            let count = msg
                .content
                .get("execution_count")
                .and_then(serde_json::Value::as_i64);
            block.set_input(code, count);
            receiver.update();
            true
        }
        MessageKind::ClearOutput => {
            // Append-only rule applies here too: no block, no-op.
            let Some(block) = receiver.get_block(request) else {
                return false;
            };
            let wait = msg
                .content
                .get("wait")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false);
            // Whether clearing waits for the next output is the block's
            // call; the router only forwards the flag.
            block.clear_outputs(wait);
            true
        }
        kind => match kind.output_type() {
            Some(output_type) => {
                // Never synthesize a block retroactively for an
                // append-only kind.
                let Some(block) = receiver.get_block(request) else {
                    trace!(request = %request, msg_type = %msg.header.msg_type,
                        "dropping output with no block");
                    return false;
                };
                block.push_output(OutputRecord::new(output_type, msg.content.clone()));
                receiver.update();
                true
            }
            // transient_display_data is not part of the legacy set;
            // the two policies never merge.
            None => false,
        },
    }
}
