use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn counter() -> (Arc<AtomicUsize>, impl Fn(&AuthEvent) + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&count);
    (count, move |_: &AuthEvent| {
        inner.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn emit_reaches_every_listener() {
    let bus = EventBus::new();
    let (a, la) = counter();
    let (b, lb) = counter();
    let _sa = bus.subscribe(la);
    let _sb = bus.subscribe(lb);

    bus.emit(&AuthEvent::SignedOut);

    assert_eq!(a.load(Ordering::SeqCst), 1);
    assert_eq!(b.load(Ordering::SeqCst), 1);
}

#[test]
fn dropping_subscription_removes_listener() {
    let bus = EventBus::new();
    let (count, listener) = counter();
    let sub = bus.subscribe(listener);
    drop(sub);

    bus.emit(&AuthEvent::SignedOut);

    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(bus.listener_count(), 0);
}

#[test]
fn explicit_unsubscribe_only_removes_own_listener() {
    let bus = EventBus::new();
    let (a, la) = counter();
    let (b, lb) = counter();
    let sa = bus.subscribe(la);
    let _sb = bus.subscribe(lb);

    sa.unsubscribe();
    bus.emit(&AuthEvent::TokenExpired);

    assert_eq!(a.load(Ordering::SeqCst), 0);
    assert_eq!(b.load(Ordering::SeqCst), 1);
}

#[test]
fn subscription_outliving_bus_drops_cleanly() {
    let bus = EventBus::new();
    let (_count, listener) = counter();
    let sub = bus.subscribe(listener);
    drop(bus);
    drop(sub);
}

#[test]
fn listener_may_emit_reentrantly() {
    let bus = EventBus::new();
    let (count, listener) = counter();
    let _counting = bus.subscribe(listener);
    let relay = bus.clone();
    let _relay = bus.subscribe(move |event| {
        if matches!(event, AuthEvent::TokenExpired) {
            relay.emit(&AuthEvent::SignedOut);
        }
    });

    bus.emit(&AuthEvent::TokenExpired);

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn event_names_are_stable() {
    assert_eq!(AuthEvent::SignedIn(Identity::default()).name(), "signed_in");
    assert_eq!(AuthEvent::InitialSession(None).name(), "initial_session");
}
