use super::*;
use std::sync::atomic::AtomicUsize;

fn counting_handler(counter: &Arc<AtomicUsize>) -> AuthStateHandler {
    let counter = counter.clone();
    Arc::new(move |_event, _session| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

// =============================================================================
// BackendError
// =============================================================================

#[test]
fn api_error_displays_backend_message_verbatim() {
    let err = BackendError::Api { status: 400, message: "Invalid login credentials".into() };
    assert_eq!(err.to_string(), "Invalid login credentials");
}

#[test]
fn request_error_display_is_prefixed() {
    let err = BackendError::Request("connection refused".into());
    assert_eq!(err.to_string(), "request failed: connection refused");
}

// =============================================================================
// Listeners
// =============================================================================

#[test]
fn emit_reaches_every_listener() {
    let listeners = Listeners::new();
    let counter = Arc::new(AtomicUsize::new(0));
    let _a = listeners.register(counting_handler(&counter));
    let _b = listeners.register(counting_handler(&counter));

    listeners.emit(AuthEvent::SignedOut, None);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn unsubscribe_removes_listener() {
    let listeners = Listeners::new();
    let counter = Arc::new(AtomicUsize::new(0));
    let sub = listeners.register(counting_handler(&counter));
    assert_eq!(listeners.len(), 1);

    sub.unsubscribe();
    assert!(listeners.is_empty());

    listeners.emit(AuthEvent::SignedOut, None);
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn dropping_subscription_cancels_it() {
    let listeners = Listeners::new();
    let counter = Arc::new(AtomicUsize::new(0));
    {
        let _sub = listeners.register(counting_handler(&counter));
        assert_eq!(listeners.len(), 1);
    }
    assert!(listeners.is_empty());
}

#[test]
fn subscription_outliving_registry_is_harmless() {
    let counter = Arc::new(AtomicUsize::new(0));
    let sub = {
        let listeners = Listeners::new();
        listeners.register(counting_handler(&counter))
    };
    sub.unsubscribe();
}

#[test]
fn handler_may_register_during_emit() {
    let listeners = Listeners::new();
    let nested = Arc::new(Mutex::new(Vec::new()));
    let registry = listeners.clone();
    let nested_subs = nested.clone();
    let _sub = listeners.register(Arc::new(move |_event, _session| {
        let sub = registry.register(Arc::new(|_, _| {}));
        nested_subs.lock().unwrap().push(sub);
    }));

    listeners.emit(AuthEvent::SignedIn, None);
    assert_eq!(listeners.len(), 2);
}

#[test]
fn subscription_debug_reports_activity() {
    let sub = Subscription::new(|| {});
    assert!(format!("{sub:?}").contains("active: true"));
}
