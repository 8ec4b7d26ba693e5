//! The wire model — IOPub message envelopes and their classification.
//!
//! Classification is deliberately separate from deserialization: a kernel
//! may broadcast message kinds this crate has never heard of, and those
//! must decode cleanly and classify as "unknown" rather than fail. The
//! router treats unknown kinds as no-ops, so a decode error here would
//! turn a harmless foreign message into a fault in the host console.

use crate::error::ProtocolError;
use crate::id::RequestId;
use serde::{Deserialize, Serialize};

/// The message kinds the router knows how to classify.
///
/// Tags follow the kernel messaging convention (snake_case strings on the
/// wire). Anything else is unknown and ignored by every dispatch policy.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A client's code was accepted for execution (carries the code and
    /// execution counter).
    ExecuteInput,
    /// The result of an execution.
    ExecuteResult,
    /// Rich display data.
    DisplayData,
    /// A chunk of streamed text (stdout/stderr).
    Stream,
    /// An execution error.
    Error,
    /// A request to clear previously displayed output.
    ClearOutput,
    /// Content meant for ephemeral, non-authoritative display.
    TransientDisplayData,
}

impl MessageKind {
    /// Classify a wire tag. Unknown tags yield `None`, never an error.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "execute_input" => Some(Self::ExecuteInput),
            "execute_result" => Some(Self::ExecuteResult),
            "display_data" => Some(Self::DisplayData),
            "stream" => Some(Self::Stream),
            "error" => Some(Self::Error),
            "clear_output" => Some(Self::ClearOutput),
            "transient_display_data" => Some(Self::TransientDisplayData),
            _ => None,
        }
    }

    /// The output type a mirrored message of this kind is stamped with,
    /// for the kinds that carry appendable output.
    pub fn output_type(&self) -> Option<crate::block::OutputType> {
        use crate::block::OutputType;
        match self {
            Self::ExecuteResult => Some(OutputType::ExecuteResult),
            Self::DisplayData => Some(OutputType::DisplayData),
            Self::Stream => Some(OutputType::Stream),
            Self::Error => Some(OutputType::Error),
            _ => None,
        }
    }

    /// The wire tag for this kind.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::ExecuteInput => "execute_input",
            Self::ExecuteResult => "execute_result",
            Self::DisplayData => "display_data",
            Self::Stream => "stream",
            Self::Error => "error",
            Self::ClearOutput => "clear_output",
            Self::TransientDisplayData => "transient_display_data",
        }
    }
}

/// A message header. Every field defaults so partial headers — including
/// the empty `{}` parent header kernels send on kernel-originated
/// messages — decode without error.
#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageHeader {
    /// Unique id of this message (or, in a parent header, of the
    /// originating request).
    #[serde(default)]
    pub msg_id: String,
    /// The wire tag naming the message kind.
    #[serde(default)]
    pub msg_type: String,
    /// Identity of the client session that produced the message.
    #[serde(default)]
    pub session: String,
    /// The requesting user, when the transport carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// ISO 8601 timestamp, when the transport carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// One message off the IOPub broadcast channel.
#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IopubMessage {
    /// This message's own header.
    pub header: MessageHeader,
    /// Header of the request that caused this message. Absent (or empty)
    /// for kernel-originated traffic with no parent.
    #[serde(default)]
    pub parent_header: Option<MessageHeader>,
    /// Kind-dependent payload.
    #[serde(default)]
    pub content: serde_json::Value,
}

impl IopubMessage {
    /// Decode a message from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Decode a message from a raw transport frame.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Classify this message's kind. `None` for tags the router doesn't
    /// know.
    pub fn kind(&self) -> Option<MessageKind> {
        MessageKind::from_tag(&self.header.msg_type)
    }

    /// The id of the request this message originated from — the routing
    /// key for display blocks. `None` when there is no parent header or
    /// its id is empty.
    pub fn originating_request(&self) -> Option<RequestId> {
        self.parent_header
            .as_ref()
            .filter(|h| !h.msg_id.is_empty())
            .map(|h| RequestId::new(h.msg_id.clone()))
    }

    /// Identity of the client session whose request caused this message.
    /// Same absence rules as [`originating_request`](Self::originating_request).
    pub fn originating_session(&self) -> Option<&str> {
        self.parent_header
            .as_ref()
            .map(|h| h.session.as_str())
            .filter(|s| !s.is_empty())
    }
}
