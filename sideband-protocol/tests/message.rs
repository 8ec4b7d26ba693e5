use sideband_protocol::message::{IopubMessage, MessageKind};

// --- Decoding ---

#[test]
fn decodes_full_envelope() {
    let msg = IopubMessage::from_value(serde_json::json!({
        "header": {
            "msg_id": "m-1",
            "msg_type": "transient_display_data",
            "session": "broadcast"
        },
        "parent_header": { "msg_id": "req-1", "session": "other" },
        "content": { "data": { "text/plain": "hi" } }
    }))
    .unwrap();

    assert_eq!(msg.kind(), Some(MessageKind::TransientDisplayData));
    assert_eq!(msg.originating_request().unwrap().as_str(), "req-1");
    assert_eq!(msg.originating_session(), Some("other"));
}

#[test]
fn unknown_msg_type_decodes_and_classifies_as_none() {
    let msg = IopubMessage::from_value(serde_json::json!({
        "header": { "msg_id": "m-1", "msg_type": "comm_open", "session": "s" },
        "parent_header": { "msg_id": "req-1", "session": "other" },
        "content": {}
    }))
    .unwrap();

    assert_eq!(msg.kind(), None);
}

#[test]
fn empty_parent_header_yields_no_origin() {
    // Kernel-originated traffic carries an empty parent header object.
    let msg = IopubMessage::from_value(serde_json::json!({
        "header": { "msg_id": "m-1", "msg_type": "status", "session": "s" },
        "parent_header": {},
        "content": { "execution_state": "idle" }
    }))
    .unwrap();

    assert!(msg.originating_request().is_none());
    assert!(msg.originating_session().is_none());
}

#[test]
fn missing_parent_header_yields_no_origin() {
    let msg = IopubMessage::from_value(serde_json::json!({
        "header": { "msg_id": "m-1", "msg_type": "stream", "session": "s" },
        "content": { "name": "stdout", "text": "x" }
    }))
    .unwrap();

    assert!(msg.originating_request().is_none());
    assert!(msg.originating_session().is_none());
}

#[test]
fn from_slice_rejects_garbage() {
    assert!(IopubMessage::from_slice(b"not json").is_err());
}

// --- Kind tags ---

#[test]
fn kind_tags_round_trip() {
    for kind in [
        MessageKind::ExecuteInput,
        MessageKind::ExecuteResult,
        MessageKind::DisplayData,
        MessageKind::Stream,
        MessageKind::Error,
        MessageKind::ClearOutput,
        MessageKind::TransientDisplayData,
    ] {
        assert_eq!(MessageKind::from_tag(kind.as_tag()), Some(kind));
    }
    assert_eq!(MessageKind::from_tag("status"), None);
}
