//! In-memory implementations and message builders for testing.
//!
//! Available behind the `test-utils` feature flag. These are minimal
//! implementations that prove the trait APIs are usable.

mod fixed_session;
mod messages;
mod recording_receiver;

pub use fixed_session::FixedSession;
pub use messages::{
    clear_output_message, error_message, execute_input_message, execute_result_message,
    stream_message, transient_message, unknown_message,
};
pub use recording_receiver::{ReceiverCall, RecordingReceiver};
