use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Info, "one".to_owned());
    let b = state.push(ToastKind::Error, "two".to_owned());
    assert!(b > a);
    assert_eq!(state.items().len(), 2);
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Info, "one".to_owned());
    let b = state.push(ToastKind::Success, "two".to_owned());
    assert!(state.dismiss(a));
    assert!(!state.dismiss(a));
    assert_eq!(state.items()[0].id, b);
}

#[test]
fn overflow_drops_oldest() {
    let mut state = ToastState::default();
    for i in 0..=MAX_VISIBLE {
        state.push(ToastKind::Info, format!("toast {i}"));
    }
    assert_eq!(state.items().len(), MAX_VISIBLE);
    assert_eq!(state.items()[0].message, "toast 1");
}

#[test]
fn notify_pushes_into_signal() {
    let toasts = RwSignal::new(ToastState::default());
    notify(toasts, ToastKind::Error, "Sign-out failed");
    let items = toasts.get_untracked();
    assert_eq!(items.items().len(), 1);
    assert_eq!(items.items()[0].kind, ToastKind::Error);
}

#[test]
fn kind_classes_are_distinct() {
    assert_ne!(ToastKind::Info.class(), ToastKind::Error.class());
    assert!(ToastKind::Success.class().starts_with("toast "));
}
