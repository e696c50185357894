use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

// =============================================================================
// ENDPOINTS
// =============================================================================

#[test]
fn grant_paths_match_gotrue_routes() {
    assert_eq!(PASSWORD_GRANT, "token?grant_type=password");
    assert_eq!(REFRESH_GRANT, "token?grant_type=refresh_token");
}

#[test]
fn profile_path_filters_by_encoded_id() {
    assert_eq!(
        profile_path("a b"),
        "profiles?id=eq.a%20b&select=id,full_name,roles,is_demo"
    );
}

// =============================================================================
// FAILURE CLASSIFICATION
// =============================================================================

#[test]
fn invalid_grant_is_invalid_credentials() {
    let body = ErrorBody {
        error: Some("invalid_grant".to_owned()),
        error_description: Some("Invalid login credentials".to_owned()),
        ..ErrorBody::default()
    };
    assert_eq!(classify_failure(400, &body), AuthError::InvalidCredentials);
}

#[test]
fn rate_limit_keeps_status() {
    let body = ErrorBody { msg: Some("Rate limit exceeded".to_owned()), ..ErrorBody::default() };
    assert_eq!(
        classify_failure(429, &body),
        AuthError::Provider { status: 429, message: "Rate limit exceeded".to_owned() }
    );
}

#[test]
fn empty_body_gets_generic_message() {
    assert_eq!(
        classify_failure(500, &ErrorBody::default()),
        AuthError::Provider { status: 500, message: "request failed".to_owned() }
    );
}

#[test]
fn revoked_covers_auth_statuses_only() {
    assert!(is_revoked(&AuthError::InvalidCredentials));
    assert!(is_revoked(&AuthError::Provider { status: 401, message: String::new() }));
    assert!(!is_revoked(&AuthError::Provider { status: 503, message: String::new() }));
    assert!(!is_revoked(&AuthError::Network("offline".to_owned())));
}

// =============================================================================
// SERVER STUBS
// =============================================================================

#[test]
fn unconfigured_provider_reports_it() {
    assert!(!SupabaseAuth::new(None).is_configured());
}

#[tokio::test]
async fn server_side_session_is_anonymous() {
    let auth = SupabaseAuth::new(None);
    assert_eq!(auth.get_session().await, Ok(None));
}

#[tokio::test]
async fn server_side_sign_in_is_unavailable() {
    let auth = SupabaseAuth::new(None);
    let creds = Credentials::validate("a@b.co", "pw").unwrap();
    assert_eq!(auth.sign_in_with_password(&creds).await, Err(AuthError::Unavailable));
}

#[test]
fn listeners_receive_bus_events_until_dropped() {
    let auth = SupabaseAuth::new(None);
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let sub = auth.on_auth_state_change(Box::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    auth.events().emit(&AuthEvent::SignedOut);
    drop(sub);
    auth.events().emit(&AuthEvent::SignedOut);
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}
