use sideband_protocol::message::IopubMessage;
use sideband_protocol::signal::IopubSignal;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn any_message() -> IopubMessage {
    IopubMessage::from_value(serde_json::json!({
        "header": { "msg_id": "m", "msg_type": "stream", "session": "s" },
        "content": {}
    }))
    .unwrap()
}

#[test]
fn emit_reaches_connected_handler() {
    let signal = IopubSignal::new();
    let seen = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&seen);
    signal.connect(Arc::new(move |_msg| {
        counter.fetch_add(1, Ordering::Relaxed);
        true
    }));

    assert_eq!(signal.emit(&any_message()), 1);
    assert_eq!(seen.load(Ordering::Relaxed), 1);
}

#[test]
fn emit_counts_only_handled() {
    let signal = IopubSignal::new();
    signal.connect(Arc::new(|_| false));
    signal.connect(Arc::new(|_| true));

    assert_eq!(signal.emit(&any_message()), 1);
}

#[test]
fn disconnect_makes_subscription_inert() {
    let signal = IopubSignal::new();
    let seen = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&seen);
    let token = signal.connect(Arc::new(move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
        true
    }));

    assert!(signal.disconnect(token));
    assert_eq!(signal.emit(&any_message()), 0);
    assert_eq!(seen.load(Ordering::Relaxed), 0);
}

#[test]
fn double_disconnect_returns_false() {
    let signal = IopubSignal::new();
    let token = signal.connect(Arc::new(|_| true));

    assert!(signal.disconnect(token));
    assert!(!signal.disconnect(token));
}

#[test]
fn tokens_are_distinct_per_subscription() {
    let signal = IopubSignal::new();
    let a = signal.connect(Arc::new(|_| true));
    let b = signal.connect(Arc::new(|_| true));
    assert_ne!(a, b);

    // Surrendering one leaves the other connected.
    assert!(signal.disconnect(a));
    assert_eq!(signal.subscriber_count(), 1);
    assert_eq!(signal.emit(&any_message()), 1);
    assert!(signal.disconnect(b));
}
