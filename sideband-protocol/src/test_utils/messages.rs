//! Builders for the message shapes the router classifies.

use crate::message::{IopubMessage, MessageHeader, MessageKind};

fn message(
    kind_tag: &str,
    request: &str,
    session: &str,
    content: serde_json::Value,
) -> IopubMessage {
    IopubMessage {
        header: MessageHeader {
            msg_id: format!("msg-{kind_tag}-{request}"),
            msg_type: kind_tag.to_owned(),
            session: "broadcast".to_owned(),
            ..MessageHeader::default()
        },
        parent_header: Some(MessageHeader {
            msg_id: request.to_owned(),
            session: session.to_owned(),
            ..MessageHeader::default()
        }),
        content,
    }
}

/// A `transient_display_data` message for `request`, originated by
/// `session`.
pub fn transient_message(request: &str, session: &str, data: serde_json::Value) -> IopubMessage {
    message(
        MessageKind::TransientDisplayData.as_tag(),
        request,
        session,
        serde_json::json!({ "data": data }),
    )
}

/// An `execute_input` message carrying code and an execution counter.
pub fn execute_input_message(
    request: &str,
    session: &str,
    code: &str,
    execution_count: i64,
) -> IopubMessage {
    message(
        MessageKind::ExecuteInput.as_tag(),
        request,
        session,
        serde_json::json!({ "code": code, "execution_count": execution_count }),
    )
}

/// An `execute_result` message.
pub fn execute_result_message(
    request: &str,
    session: &str,
    data: serde_json::Value,
) -> IopubMessage {
    message(
        MessageKind::ExecuteResult.as_tag(),
        request,
        session,
        serde_json::json!({ "data": data }),
    )
}

/// A `stream` message carrying a chunk of text.
pub fn stream_message(request: &str, session: &str, text: &str) -> IopubMessage {
    message(
        MessageKind::Stream.as_tag(),
        request,
        session,
        serde_json::json!({ "name": "stdout", "text": text }),
    )
}

/// An `error` message.
pub fn error_message(request: &str, session: &str, ename: &str) -> IopubMessage {
    message(
        MessageKind::Error.as_tag(),
        request,
        session,
        serde_json::json!({ "ename": ename, "evalue": "", "traceback": [] }),
    )
}

/// A `clear_output` message with the given deferred-clear flag.
pub fn clear_output_message(request: &str, session: &str, wait: bool) -> IopubMessage {
    message(
        MessageKind::ClearOutput.as_tag(),
        request,
        session,
        serde_json::json!({ "wait": wait }),
    )
}

/// A message of a kind no dispatch policy recognizes.
pub fn unknown_message(request: &str, session: &str) -> IopubMessage {
    message(
        "comm_msg",
        request,
        session,
        serde_json::json!({ "data": {} }),
    )
}
