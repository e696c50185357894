use super::*;
use crate::identity::Identity;
use crate::policy::{BypassPredicate, RoleBypass};

fn user(roles: &[Role]) -> Identity {
    Identity { id: "u1".to_owned(), roles: roles.iter().copied().collect(), ..Identity::default() }
}

fn authenticated(roles: &[Role]) -> Session {
    let mut session = Session::new();
    session.resolve(Some(user(roles))).unwrap();
    session
}

fn anonymous() -> Session {
    let mut session = Session::new();
    session.resolve(None).unwrap();
    session
}

fn here() -> Location {
    Location::parse("/dashboard/admin?tab=users")
}

fn check(session: &Session, required: &[Role]) -> Decision {
    decide(session, required, &here(), &AccessPolicy::default())
}

/// Every reachable session shape, for totality sweeps.
fn all_sessions() -> Vec<Session> {
    let mut out = vec![Session::new()];
    let mut checking = Session::new();
    checking.begin_check().unwrap();
    out.push(checking);
    out.push(anonymous());
    for role in Role::ALL {
        let signed_in = authenticated(&[role]);
        let mut refreshing = signed_in.clone();
        refreshing.begin_check().unwrap();
        let mut logging_out = signed_in.clone();
        logging_out.begin_logout().unwrap();
        out.extend([signed_in, refreshing, logging_out]);
    }
    out
}

fn requirement_sets() -> Vec<Vec<Role>> {
    let mut sets = vec![vec![], Role::ALL.to_vec()];
    sets.extend(Role::ALL.iter().map(|r| vec![*r]));
    sets.push(vec![Role::Admin, Role::SuperAdmin]);
    sets
}

// =============================================================
// Scenarios
// =============================================================

#[test]
fn scenario_loading_before_ready() {
    let mut session = Session::new();
    session.begin_check().unwrap();
    assert_eq!(check(&session, &[Role::Admin]), Decision::Loading);
    assert_eq!(check(&session, &[]), Decision::Loading);
}

#[test]
fn scenario_anonymous_redirects_to_login_with_origin() {
    let decision = check(&anonymous(), &[]);
    assert_eq!(decision, Decision::RedirectLogin { logout: false, return_to: Some(here()) });
    assert_eq!(
        decision.redirect_target().as_deref(),
        Some("/login?redirect=%2Fdashboard%2Fadmin%3Ftab%3Dusers")
    );
}

#[test]
fn scenario_student_on_admin_route_goes_to_dashboard() {
    let decision = check(&authenticated(&[Role::Student]), &[Role::Admin]);
    assert_eq!(decision, Decision::RedirectDashboard);
    assert_eq!(decision.redirect_target().as_deref(), Some("/dashboard"));
}

#[test]
fn scenario_admin_renders_admin_or_super_admin_route() {
    assert_eq!(check(&authenticated(&[Role::Admin]), &[Role::Admin, Role::SuperAdmin]), Decision::Render);
}

#[test]
fn scenario_logout_flag_overrides_authenticated_render() {
    let mut session = authenticated(&[Role::Admin]);
    assert_eq!(check(&session, &[Role::Admin]), Decision::Render);
    session.begin_logout().unwrap();
    let decision = check(&session, &[Role::Admin]);
    assert_eq!(decision, Decision::RedirectLogin { logout: true, return_to: None });
    assert_eq!(decision.redirect_target().as_deref(), Some("/login?logout=true"));
}

// =============================================================
// Properties over every session shape
// =============================================================

#[test]
fn not_ready_always_loads() {
    for session in all_sessions().into_iter().filter(|s| !s.auth_state_ready()) {
        for required in requirement_sets() {
            assert_eq!(check(&session, &required), Decision::Loading);
        }
    }
}

#[test]
fn loading_always_loads() {
    for session in all_sessions().into_iter().filter(Session::is_loading) {
        for required in requirement_sets() {
            assert_eq!(check(&session, &required), Decision::Loading);
        }
    }
}

#[test]
fn logging_out_always_redirects_with_marker() {
    for session in all_sessions().into_iter().filter(Session::is_logging_out) {
        for required in requirement_sets() {
            assert_eq!(check(&session, &required), Decision::RedirectLogin { logout: true, return_to: None });
        }
    }
}

#[test]
fn ready_anonymous_always_redirects_with_origin() {
    for required in requirement_sets() {
        assert_eq!(
            check(&anonymous(), &required),
            Decision::RedirectLogin { logout: false, return_to: Some(here()) }
        );
    }
}

#[test]
fn settled_authenticated_renders_iff_roles_overlap() {
    for session in all_sessions().into_iter().filter(|s| {
        s.auth_state_ready() && s.is_authenticated() && !s.is_loading() && !s.is_logging_out()
    }) {
        for required in requirement_sets() {
            let expected = if required.is_empty() || session.roles().contains_any(&required) {
                Decision::Render
            } else {
                Decision::RedirectDashboard
            };
            assert_eq!(check(&session, &required), expected);
        }
    }
}

// =============================================================
// Policy bypass
// =============================================================

#[test]
fn demo_bypass_opens_business_route() {
    let mut demo = user(&[]);
    demo.is_demo = true;
    let mut session = Session::new();
    session.resolve(Some(demo)).unwrap();
    let policy = AccessPolicy {
        bypasses: vec![RoleBypass { grants: Role::BusinessAdmin, when: BypassPredicate::DemoAccount }],
    };

    assert_eq!(decide(&session, &[Role::BusinessAdmin], &here(), &policy), Decision::Render);
    assert_eq!(
        decide(&session, &[Role::BusinessAdmin], &here(), &AccessPolicy::default()),
        Decision::RedirectDashboard
    );
}

#[test]
fn redirect_login_without_origin_targets_plain_login() {
    let decision = Decision::RedirectLogin { logout: false, return_to: None };
    assert_eq!(decision.redirect_target().as_deref(), Some("/login"));
}

#[test]
fn non_redirect_outcomes_have_no_target() {
    assert_eq!(Decision::Loading.redirect_target(), None);
    assert_eq!(Decision::Render.redirect_target(), None);
}
