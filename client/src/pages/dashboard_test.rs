use super::*;

fn labels(roles: &[Role]) -> Vec<&'static str> {
    visible_areas(&roles.iter().copied().collect()).into_iter().map(|a| a.label).collect()
}

#[test]
fn everyone_sees_overview_and_messages() {
    assert_eq!(labels(&[]), vec!["Overview", "Messages"]);
}

#[test]
fn student_sees_learning_area_only() {
    assert_eq!(labels(&[Role::Student]), vec!["Overview", "My learning", "Messages"]);
}

#[test]
fn admin_sees_administration_and_staff_tools() {
    let visible = labels(&[Role::Admin]);
    assert!(visible.contains(&"Administration"));
    assert!(visible.contains(&"Staff tools"));
    assert!(!visible.contains(&"Business"));
}

#[test]
fn area_links_match_route_table() {
    for area in AREAS {
        let matched = crate::routes::ROUTES.match_path(area.href).unwrap();
        let leaf = matched.leaf().unwrap();
        assert_ne!(leaf.element, crate::routes::Screen::NotFound, "{}", area.href);
    }
}
