//! # sideband-protocol — wire model and collaborator contracts
//!
//! A computational kernel broadcasts everything it does on an IOPub
//! channel, to every client attached to it. This crate defines the
//! vocabulary a console needs to surface that *foreign* activity: the
//! message envelope, the display-block model, and the two contracts the
//! router in `sideband-router` is written against.
//!
//! ## The Contracts
//!
//! | Contract | Trait | What it does |
//! |----------|-------|-------------|
//! | Session | [`ClientSession`] | Kernel identity + IOPub subscription |
//! | Receiver | [`Receiver`] | Create, store, look up, re-render blocks |
//!
//! ## Design Principle
//!
//! Classification is separate from deserialization: unknown message
//! kinds decode cleanly and classify as `None`. The router is a
//! best-effort observer — a malformed or unexpected message must never
//! interrupt the host console's own operation, so nothing on the routing
//! path returns an error.
//!
//! ## Dependency Notes
//!
//! Message content and output payloads are `serde_json::Value`: the wire
//! format is JSON and payload shapes vary per message kind, so a typed
//! payload per kind would buy little and cost trait-object ergonomics.

#![deny(missing_docs)]

pub mod block;
pub mod error;
pub mod id;
pub mod message;
pub mod receiver;
pub mod session;
pub mod signal;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use block::{BlockHandle, DisplayBlock, OutputRecord, OutputType, TRANSIENT_BLOCK_TAG};
pub use error::{ProtocolError, RegistryError};
pub use id::{ClientId, ConsoleId, RequestId};
pub use message::{IopubMessage, MessageHeader, MessageKind};
pub use receiver::Receiver;
pub use session::ClientSession;
pub use signal::{IopubHandler, IopubSignal, SubscriptionToken};
