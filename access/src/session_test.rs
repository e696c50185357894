use super::*;
use crate::role::Role;

fn alice() -> Identity {
    Identity {
        id: "u1".to_owned(),
        email: Some("alice@example.com".to_owned()),
        display_name: Some("Alice".to_owned()),
        roles: [Role::Student].into_iter().collect(),
        is_demo: false,
    }
}

fn signed_in() -> Session {
    let mut session = Session::new();
    session.begin_check().unwrap();
    session.resolve(Some(alice())).unwrap();
    session
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn new_session_is_uninitialized_and_not_ready() {
    let session = Session::new();
    assert_eq!(session.phase(), Phase::Uninitialized);
    assert!(!session.auth_state_ready());
    assert!(!session.is_authenticated());
    assert!(!session.is_loading());
    assert!(session.roles().is_empty());
}

// =============================================================
// Check / resolve
// =============================================================

#[test]
fn begin_check_sets_loading() {
    let mut session = Session::new();
    session.begin_check().unwrap();
    assert!(session.is_loading());
    assert!(!session.auth_state_ready());
}

#[test]
fn resolve_with_user_authenticates_and_marks_ready() {
    let session = signed_in();
    assert_eq!(session.phase(), Phase::Authenticated);
    assert!(session.is_authenticated());
    assert!(session.auth_state_ready());
    assert!(session.roles().contains(Role::Student));
}

#[test]
fn resolve_without_user_is_anonymous_and_ready() {
    let mut session = Session::new();
    session.begin_check().unwrap();
    session.resolve(None).unwrap();
    assert_eq!(session.phase(), Phase::Anonymous);
    assert!(!session.is_authenticated());
    assert!(session.auth_state_ready());
}

#[test]
fn settle_check_applies_current_check() {
    let mut session = Session::new();
    let check = session.begin_check().unwrap();
    session.settle_check(check, Some(alice())).unwrap();
    assert_eq!(session.phase(), Phase::Authenticated);
    assert!(session.auth_state_ready());
}

#[test]
fn superseded_check_cannot_settle() {
    let mut session = Session::new();
    let restore = session.begin_check().unwrap();
    let login = session.begin_check().unwrap();
    session.settle_check(login, Some(alice())).unwrap();
    let snapshot = session.clone();

    assert_eq!(session.settle_check(restore, None), Err(SessionError::StaleCheck));
    assert_eq!(session.fail_check(restore), Err(SessionError::StaleCheck));
    assert_eq!(session, snapshot);
}

#[test]
fn older_check_is_stale_while_newer_is_in_flight() {
    let mut session = Session::new();
    let first = session.begin_check().unwrap();
    let _second = session.begin_check().unwrap();
    assert_eq!(session.settle_check(first, Some(alice())), Err(SessionError::StaleCheck));
    assert!(session.is_loading());
    assert!(!session.is_authenticated());
}

#[test]
fn check_settled_by_event_rejects_late_result() {
    let mut session = signed_in();
    let check = session.begin_check().unwrap();
    assert!(session.apply(&AuthEvent::TokenExpired));
    assert_eq!(session.settle_check(check, Some(alice())), Err(SessionError::StaleCheck));
    assert!(!session.is_authenticated());
}

#[test]
fn fail_check_keeps_previous_user() {
    let mut session = signed_in();
    let check = session.begin_check().unwrap();
    session.fail_check(check).unwrap();
    assert_eq!(session.phase(), Phase::Authenticated);
    assert_eq!(session.current_user(), Some(&alice()));
}

#[test]
fn fail_check_on_first_check_settles_anonymous_and_ready() {
    let mut session = Session::new();
    let check = session.begin_check().unwrap();
    session.fail_check(check).unwrap();
    assert_eq!(session.phase(), Phase::Anonymous);
    assert!(session.auth_state_ready());
}

#[test]
fn fail_check_after_settling_is_rejected() {
    let mut session = Session::new();
    let check = session.begin_check().unwrap();
    session.resolve(None).unwrap();
    let snapshot = session.clone();
    assert_eq!(session.fail_check(check), Err(SessionError::StaleCheck));
    assert_eq!(session, snapshot);
}

#[test]
fn results_during_logout_are_left_to_the_sign_out() {
    let mut session = signed_in();
    let check = session.begin_check().unwrap();
    session.begin_logout().unwrap();
    assert_eq!(session.settle_check(check, None), Err(SessionError::LogoutInFlight));
    assert_eq!(session.fail_check(check), Err(SessionError::LogoutInFlight));
    assert!(session.is_logging_out());
}

// =============================================================
// Logout
// =============================================================

#[test]
fn begin_logout_raises_flag_and_keeps_user() {
    let mut session = signed_in();
    session.begin_logout().unwrap();
    assert!(session.is_logging_out());
    assert!(session.is_authenticated());
}

#[test]
fn second_begin_logout_is_rejected_without_change() {
    let mut session = signed_in();
    session.begin_logout().unwrap();
    let snapshot = session.clone();
    assert_eq!(session.begin_logout(), Err(SessionError::LogoutInFlight));
    assert_eq!(session, snapshot);
}

#[test]
fn begin_logout_requires_user() {
    let mut session = Session::new();
    session.resolve(None).unwrap();
    assert_eq!(session.begin_logout(), Err(SessionError::NotAuthenticated));
}

#[test]
fn finish_logout_lands_anonymous_and_stays_ready() {
    let mut session = signed_in();
    session.begin_logout().unwrap();
    session.finish_logout().unwrap();
    assert_eq!(session.phase(), Phase::Anonymous);
    assert!(!session.is_authenticated());
    assert!(!session.is_logging_out());
    assert!(session.auth_state_ready());
}

#[test]
fn abort_logout_restores_authenticated() {
    let mut session = signed_in();
    session.begin_logout().unwrap();
    session.abort_logout().unwrap();
    assert_eq!(session.phase(), Phase::Authenticated);
    assert!(!session.is_logging_out());
    assert_eq!(session.current_user(), Some(&alice()));
}

#[test]
fn finish_and_abort_require_logout_in_flight() {
    let mut session = signed_in();
    assert_eq!(session.finish_logout(), Err(SessionError::NoLogoutInFlight));
    assert_eq!(session.abort_logout(), Err(SessionError::NoLogoutInFlight));
}

#[test]
fn checks_are_refused_while_logging_out() {
    let mut session = signed_in();
    session.begin_logout().unwrap();
    assert_eq!(session.begin_check(), Err(SessionError::LogoutInFlight));
    assert_eq!(session.resolve(None), Err(SessionError::LogoutInFlight));
    assert!(session.is_logging_out());
}

#[test]
fn ready_never_resets_across_login_logout_cycles() {
    let mut session = signed_in();
    for _ in 0..3 {
        session.begin_logout().unwrap();
        session.finish_logout().unwrap();
        assert!(session.auth_state_ready());
        session.begin_check().unwrap();
        assert!(session.auth_state_ready());
        session.resolve(Some(alice())).unwrap();
        assert!(session.auth_state_ready());
    }
}

// =============================================================
// Provider events
// =============================================================

#[test]
fn initial_session_event_resolves_uninitialized_session() {
    let mut session = Session::new();
    assert!(session.apply(&AuthEvent::InitialSession(Some(alice()))));
    assert_eq!(session.phase(), Phase::Authenticated);
    assert!(session.auth_state_ready());
}

#[test]
fn initial_session_event_ignored_once_settled() {
    let mut session = signed_in();
    assert!(!session.apply(&AuthEvent::InitialSession(None)));
    assert!(session.is_authenticated());
}

#[test]
fn initial_session_event_ignored_while_login_pending() {
    let mut session = Session::new();
    let _restore = session.begin_check().unwrap();
    let login = session.begin_check().unwrap();
    assert!(!session.apply(&AuthEvent::InitialSession(None)));
    assert!(session.is_loading());
    session.settle_check(login, Some(alice())).unwrap();
    assert!(session.is_authenticated());
}

#[test]
fn signed_out_event_while_logging_out_is_left_to_logout_call() {
    let mut session = signed_in();
    session.begin_logout().unwrap();
    assert!(!session.apply(&AuthEvent::SignedOut));
    assert!(session.is_logging_out());
}

#[test]
fn signed_out_event_from_elsewhere_goes_anonymous() {
    let mut session = signed_in();
    assert!(session.apply(&AuthEvent::SignedOut));
    assert_eq!(session.phase(), Phase::Anonymous);
}

#[test]
fn token_refreshed_replaces_user_without_loading() {
    let mut session = signed_in();
    let mut updated = alice();
    updated.roles.insert(Role::Instructor);
    assert!(session.apply(&AuthEvent::TokenRefreshed(updated.clone())));
    assert_eq!(session.phase(), Phase::Authenticated);
    assert_eq!(session.current_user(), Some(&updated));
}

#[test]
fn token_refreshed_ignored_when_anonymous() {
    let mut session = Session::new();
    session.resolve(None).unwrap();
    assert!(!session.apply(&AuthEvent::TokenRefreshed(alice())));
    assert!(!session.is_authenticated());
}

#[test]
fn token_expired_drops_user() {
    let mut session = signed_in();
    assert!(session.apply(&AuthEvent::TokenExpired));
    assert!(!session.is_authenticated());
    assert!(session.auth_state_ready());
}
