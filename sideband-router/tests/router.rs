use sideband_protocol::ClientSession;
use sideband_protocol::block::TRANSIENT_BLOCK_TAG;
use sideband_protocol::id::RequestId;
use sideband_protocol::test_utils::{
    FixedSession, ReceiverCall, RecordingReceiver, clear_output_message, error_message,
    execute_input_message, execute_result_message, stream_message, transient_message,
    unknown_message,
};
use sideband_router::{DispatchPolicy, TransientRouter};
use std::sync::Arc;

fn transient_router() -> (Arc<FixedSession>, Arc<RecordingReceiver>, TransientRouter) {
    let session = Arc::new(FixedSession::new("me"));
    let receiver = Arc::new(RecordingReceiver::new());
    let router = TransientRouter::new(session.clone(), receiver.clone());
    (session, receiver, router)
}

fn legacy_router() -> (Arc<FixedSession>, Arc<RecordingReceiver>, TransientRouter) {
    let session = Arc::new(FixedSession::new("me"));
    let receiver = Arc::new(RecordingReceiver::new());
    let router = TransientRouter::with_policy(
        session.clone(),
        receiver.clone(),
        DispatchPolicy::LegacyMirror,
    );
    (session, receiver, router)
}

fn data(text: &str) -> serde_json::Value {
    serde_json::json!({ "text/plain": text })
}

// --- Defaults ---

#[test]
fn transient_policy_starts_enabled() {
    let (_, _, router) = transient_router();
    assert!(router.enabled());
    assert_eq!(router.policy(), DispatchPolicy::Transient);
}

#[test]
fn legacy_policy_starts_disabled() {
    let (_, _, router) = legacy_router();
    assert!(!router.enabled());
}

// --- Gating ---

#[test]
fn disabled_router_ignores_everything() {
    let (_, receiver, router) = transient_router();
    router.set_enabled(false);

    assert!(!router.handle(&transient_message("req-1", "other", data("x"))));
    assert!(receiver.is_untouched());
}

#[test]
fn reenabling_does_not_reprocess() {
    let (_, receiver, router) = transient_router();
    router.set_enabled(false);
    router.handle(&transient_message("req-1", "other", data("x")));
    router.set_enabled(true);

    // The earlier message is gone; only new traffic is routed.
    assert!(receiver.is_untouched());
    assert!(router.handle(&transient_message("req-2", "other", data("y"))));
    assert_eq!(receiver.create_count(), 1);
}

// --- Self-origin filter ---

#[test]
fn self_originated_message_is_ignored() {
    let (_, receiver, router) = transient_router();

    assert!(!router.handle(&transient_message("req-1", "me", data("x"))));
    assert!(receiver.is_untouched());
}

#[test]
fn no_live_kernel_ignores_everything() {
    let (session, receiver, router) = transient_router();
    session.set_kernel(None);

    assert!(!router.handle(&transient_message("req-1", "other", data("x"))));
    assert!(receiver.is_untouched());
}

// --- Idempotent block creation ---

#[test]
fn second_transient_message_reuses_block() {
    let (_, receiver, router) = transient_router();
    let req = RequestId::new("req-1");

    assert!(router.handle(&transient_message("req-1", "other", data("a"))));
    assert!(router.handle(&transient_message("req-1", "other", data("b"))));

    assert_eq!(receiver.create_count(), 1);
    assert_eq!(
        receiver.count(|c| matches!(c, ReceiverCall::AddBlock(r) if *r == req)),
        1
    );
    assert_eq!(receiver.block_snapshot(&req).unwrap().outputs.len(), 2);
}

#[test]
fn distinct_requests_get_distinct_blocks() {
    let (_, receiver, router) = transient_router();

    router.handle(&transient_message("req-1", "other", data("a")));
    router.handle(&transient_message("req-2", "other", data("b")));

    assert_eq!(receiver.create_count(), 2);
    assert_eq!(
        receiver
            .block_snapshot(&RequestId::new("req-1"))
            .unwrap()
            .outputs
            .len(),
        1
    );
}

// --- Unknown kinds ---

#[test]
fn unknown_kind_is_not_handled() {
    let (_, receiver, router) = transient_router();

    assert!(!router.handle(&unknown_message("req-1", "other")));
    assert!(receiver.is_untouched());
}

#[test]
fn standard_kinds_are_ignored_under_transient_policy() {
    let (_, receiver, router) = transient_router();

    assert!(!router.handle(&execute_input_message("req-1", "other", "1+1", 1)));
    assert!(!router.handle(&execute_result_message("req-1", "other", data("2"))));
    assert!(!router.handle(&stream_message("req-1", "other", "out")));
    assert!(receiver.is_untouched());
}

// --- Disposal ---

#[test]
fn dispose_is_idempotent_and_stops_handling() {
    let (session, receiver, router) = transient_router();
    assert_eq!(session.iopub().subscriber_count(), 1);

    router.dispose();
    router.dispose();

    assert!(router.is_disposed());
    assert_eq!(session.iopub().subscriber_count(), 0);
    assert!(!router.handle(&transient_message("req-1", "other", data("x"))));
    assert!(receiver.is_untouched());
}

// --- Transient routing details ---

#[test]
fn transient_block_is_tagged_and_stamped_display_data() {
    let (_, receiver, router) = transient_router();
    router.handle(&transient_message("req-1", "other", data("x")));

    let block = receiver.block_snapshot(&RequestId::new("req-1")).unwrap();
    assert_eq!(block.tags, vec![TRANSIENT_BLOCK_TAG]);
    assert_eq!(
        block.outputs[0].output_type,
        sideband_protocol::OutputType::DisplayData
    );
}

#[test]
fn one_update_per_handled_message() {
    let (_, receiver, router) = transient_router();

    router.handle(&transient_message("req-1", "other", data("a")));
    router.handle(&transient_message("req-1", "other", data("b")));

    assert_eq!(receiver.update_count(), 2);
}

#[test]
fn message_without_parent_header_is_ignored() {
    let (_, receiver, router) = transient_router();
    let msg = sideband_protocol::IopubMessage::from_value(serde_json::json!({
        "header": { "msg_id": "m", "msg_type": "transient_display_data", "session": "b" },
        "parent_header": {},
        "content": { "data": {} }
    }))
    .unwrap();

    assert!(!router.handle(&msg));
    assert!(receiver.is_untouched());
}

// --- Legacy policy ---

#[test]
fn legacy_execute_input_creates_trusted_block() {
    let (_, receiver, router) = legacy_router();
    router.set_enabled(true);

    assert!(router.handle(&execute_input_message("req-1", "other", "print(1)", 7)));

    let block = receiver.block_snapshot(&RequestId::new("req-1")).unwrap();
    assert_eq!(block.source, "print(1)");
    assert_eq!(block.execution_count, Some(7));
    assert!(block.trusted);
    assert_eq!(receiver.update_count(), 1);
}

#[test]
fn legacy_appends_results_to_existing_block() {
    let (_, receiver, router) = legacy_router();
    router.set_enabled(true);
    let req = RequestId::new("req-1");

    router.handle(&execute_input_message("req-1", "other", "1+1", 1));
    assert!(router.handle(&stream_message("req-1", "other", "thinking...")));
    assert!(router.handle(&execute_result_message("req-1", "other", data("2"))));

    let block = receiver.block_snapshot(&req).unwrap();
    assert_eq!(block.outputs.len(), 2);
    assert_eq!(
        block.outputs[0].output_type,
        sideband_protocol::OutputType::Stream
    );
    assert_eq!(
        block.outputs[1].output_type,
        sideband_protocol::OutputType::ExecuteResult
    );
}

// Append kinds never synthesize a block.
#[test]
fn legacy_append_without_block_is_dropped() {
    let (_, receiver, router) = legacy_router();
    router.set_enabled(true);

    assert!(!router.handle(&execute_result_message("req-9", "other", data("2"))));
    assert!(!router.handle(&stream_message("req-9", "other", "x")));
    assert!(!router.handle(&error_message("req-9", "other", "ValueError")));

    // Lookups happened, mutators did not.
    assert_eq!(receiver.create_count(), 0);
    assert_eq!(
        receiver.count(|c| matches!(c, ReceiverCall::AddBlock(_))),
        0
    );
    assert_eq!(receiver.update_count(), 0);
}

#[test]
fn legacy_clear_output_honors_wait_flag() {
    let (_, receiver, router) = legacy_router();
    router.set_enabled(true);
    let req = RequestId::new("req-1");

    router.handle(&execute_input_message("req-1", "other", "loop()", 1));
    router.handle(&stream_message("req-1", "other", "tick"));
    assert!(router.handle(&clear_output_message("req-1", "other", true)));

    // Deferred: old output still visible until the next one lands.
    assert_eq!(receiver.block_snapshot(&req).unwrap().outputs.len(), 1);
    router.handle(&stream_message("req-1", "other", "tock"));
    let block = receiver.block_snapshot(&req).unwrap();
    assert_eq!(block.outputs.len(), 1);
    assert_eq!(block.outputs[0].data["text"], "tock");
}

#[test]
fn legacy_clear_without_block_is_not_handled() {
    let (_, receiver, router) = legacy_router();
    router.set_enabled(true);

    assert!(!router.handle(&clear_output_message("req-9", "other", false)));
    assert_eq!(receiver.update_count(), 0);
}

#[test]
fn legacy_ignores_transient_display_data() {
    // The two policies never merge: the custom kind belongs to the
    // transient policy only.
    let (_, receiver, router) = legacy_router();
    router.set_enabled(true);

    assert!(!router.handle(&transient_message("req-1", "other", data("x"))));
    assert_eq!(receiver.create_count(), 0);
}

// --- Subscription wiring ---

#[test]
fn router_handles_messages_emitted_on_the_signal() {
    let (session, receiver, _router) = transient_router();

    let handled = session
        .iopub()
        .emit(&transient_message("req-1", "other", data("x")));

    assert_eq!(handled, 1);
    assert_eq!(receiver.create_count(), 1);
}

#[test]
fn disposed_router_is_inert_on_the_signal() {
    let (session, receiver, router) = transient_router();
    router.dispose();

    let handled = session
        .iopub()
        .emit(&transient_message("req-1", "other", data("x")));

    assert_eq!(handled, 0);
    assert!(receiver.is_untouched());
}
