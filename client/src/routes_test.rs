use super::*;
use access::{Gate, Location, Session};

fn leaf(path: &str) -> Option<Screen> {
    ROUTES.match_path(path).and_then(|m| m.leaf().map(|l| l.element))
}

fn signed_in(roles: &[Role], is_demo: bool) -> Session {
    let mut session = Session::new();
    session
        .resolve(Some(access::Identity {
            id: "u1".to_owned(),
            roles: roles.iter().copied().collect(),
            is_demo,
            ..access::Identity::default()
        }))
        .unwrap();
    session
}

#[test]
fn route_table_builds() {
    assert!(RouteTree::build(route_table()).is_ok());
    assert!(!ROUTES.is_empty());
}

#[test]
fn public_screens_are_open() {
    for (pattern, gate) in ROUTES.patterns() {
        if !pattern.starts_with("/dashboard") {
            assert_eq!(gate, Gate::Open, "{pattern}");
        }
    }
}

#[test]
fn every_dashboard_route_is_guarded() {
    let dashboard: Vec<_> = ROUTES.patterns().into_iter().filter(|(p, _)| p.starts_with("/dashboard")).collect();
    assert!(!dashboard.is_empty());
    for (pattern, gate) in dashboard {
        assert!(matches!(gate, Gate::Guarded { .. }), "{pattern}");
    }
}

#[test]
fn paths_resolve_to_screens() {
    assert_eq!(leaf("/"), Some(Screen::Home));
    assert_eq!(leaf("/courses"), Some(Screen::Courses));
    assert_eq!(leaf("/courses/rust-101"), Some(Screen::CourseDetail));
    assert_eq!(leaf("/dashboard"), Some(Screen::DashboardHome));
    assert_eq!(leaf("/dashboard/admin"), Some(Screen::AdminArea));
    assert_eq!(leaf("/dashboard/admin/reports"), Some(Screen::Placeholder("Reports")));
    assert_eq!(leaf("/nowhere/at/all"), Some(Screen::NotFound));
}

#[test]
fn course_id_is_captured() {
    let matched = ROUTES.match_path("/courses/rust-101").unwrap();
    assert_eq!(matched.params.get("course_id").map(String::as_str), Some("rust-101"));
}

#[test]
fn dashboard_children_render_inside_layout() {
    let matched = ROUTES.match_path("/dashboard/messages").unwrap();
    let screens: Vec<_> = matched.levels.iter().map(|l| l.element).collect();
    assert_eq!(screens, vec![Screen::DashboardLayout, Screen::Messages]);
}

#[test]
fn student_cannot_open_admin_area() {
    let matched = ROUTES.match_path("/dashboard/admin").unwrap();
    let here = Location::parse("/dashboard/admin");
    let decision = matched.decide(&signed_in(&[Role::Student], false), &here, &crate::config::access_policy());
    assert_eq!(decision, access::Decision::RedirectDashboard);
}

#[test]
fn only_super_admin_opens_platform_settings() {
    let matched = ROUTES.match_path("/dashboard/admin/settings").unwrap();
    let here = Location::parse("/dashboard/admin/settings");
    let policy = crate::config::access_policy();
    assert_eq!(matched.decide(&signed_in(&[Role::Admin], false), &here, &policy), access::Decision::RedirectDashboard);
    assert_eq!(matched.decide(&signed_in(&[Role::SuperAdmin], false), &here, &policy), access::Decision::Render);
}

#[test]
fn demo_account_opens_business_area() {
    let matched = ROUTES.match_path("/dashboard/business").unwrap();
    let here = Location::parse("/dashboard/business");
    let decision = matched.decide(&signed_in(&[], true), &here, &crate::config::access_policy());
    assert_eq!(decision, access::Decision::Render);
}

#[test]
fn anonymous_visitor_is_sent_to_login_with_return_path() {
    let matched = ROUTES.match_path("/dashboard/messages").unwrap();
    let here = Location::parse("/dashboard/messages?thread=7");
    let mut session = Session::new();
    session.resolve(None).unwrap();
    let decision = matched.decide(&session, &here, &crate::config::access_policy());
    assert_eq!(
        decision.redirect_target().as_deref(),
        Some("/login?redirect=%2Fdashboard%2Fmessages%3Fthread%3D7")
    );
}
