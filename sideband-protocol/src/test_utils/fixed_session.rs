//! FixedSession — scripted client identity over a real signal.

use crate::id::ClientId;
use crate::session::ClientSession;
use crate::signal::IopubSignal;
use std::sync::{Mutex, PoisonError};

/// A session with a scripted kernel identity and a real [`IopubSignal`].
///
/// Tests emit messages through [`iopub`](ClientSession::iopub) directly
/// and can drop the kernel mid-test with [`set_kernel`](Self::set_kernel).
pub struct FixedSession {
    client: Mutex<Option<ClientId>>,
    iopub: IopubSignal,
}

impl FixedSession {
    /// A session whose kernel identifies as `client`.
    pub fn new(client: impl Into<ClientId>) -> Self {
        Self {
            client: Mutex::new(Some(client.into())),
            iopub: IopubSignal::new(),
        }
    }

    /// A session with no live kernel.
    pub fn without_kernel() -> Self {
        Self {
            client: Mutex::new(None),
            iopub: IopubSignal::new(),
        }
    }

    /// Replace the kernel identity (`None` simulates kernel shutdown).
    pub fn set_kernel(&self, client: Option<ClientId>) {
        *self.client.lock().unwrap_or_else(PoisonError::into_inner) = client;
    }
}

impl ClientSession for FixedSession {
    fn kernel_client_id(&self) -> Option<ClientId> {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn iopub(&self) -> &IopubSignal {
        &self.iopub
    }
}
