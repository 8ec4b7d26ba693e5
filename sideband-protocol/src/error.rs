//! Error types for the protocol and registration layers.
//!
//! The router itself raises nothing — every anomalous message is a silent
//! no-op signalled by a `bool` handled flag. Errors exist only where a real
//! failure mode does: decoding raw transport frames, and addressing a
//! console the registry doesn't know.

use crate::id::ConsoleId;
use thiserror::Error;

/// Wire decoding errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame was not a valid message envelope.
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Registration layer errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No router is attached for the addressed console.
    #[error("no router attached for console: {0}")]
    ConsoleNotFound(ConsoleId),
}
