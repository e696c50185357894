use super::*;

fn user(roles: &[Role], is_demo: bool) -> Identity {
    Identity {
        id: "u1".to_owned(),
        roles: roles.iter().copied().collect(),
        is_demo,
        ..Identity::default()
    }
}

fn demo_policy() -> AccessPolicy {
    AccessPolicy {
        bypasses: vec![RoleBypass { grants: Role::BusinessAdmin, when: BypassPredicate::DemoAccount }],
    }
}

#[test]
fn default_policy_grants_nothing_extra() {
    let demo = user(&[Role::Student], true);
    assert_eq!(AccessPolicy::default().effective_roles(&demo), demo.roles);
}

#[test]
fn demo_bypass_grants_business_admin_to_demo_accounts() {
    let demo = user(&[], true);
    assert!(demo_policy().permits(&demo, &[Role::BusinessAdmin]));
}

#[test]
fn demo_bypass_ignores_regular_accounts() {
    let regular = user(&[Role::Student], false);
    assert!(!demo_policy().permits(&regular, &[Role::BusinessAdmin]));
}

#[test]
fn demo_bypass_does_not_open_unrelated_roles() {
    let demo = user(&[], true);
    assert!(!demo_policy().permits(&demo, &[Role::Admin]));
}

#[test]
fn empty_requirement_is_permitted() {
    assert!(AccessPolicy::default().permits(&user(&[], false), &[]));
}

#[test]
fn from_yaml_parses_bypass_list() {
    let raw = "bypasses:\n  - grants: business_admin\n    when: demo_account\n";
    assert_eq!(AccessPolicy::from_yaml(raw).unwrap(), demo_policy());
}

#[test]
fn from_yaml_accepts_empty_document() {
    assert_eq!(AccessPolicy::from_yaml("{}").unwrap(), AccessPolicy::default());
}

#[test]
fn from_yaml_rejects_unknown_predicate() {
    let raw = "bypasses:\n  - grants: admin\n    when: friday_afternoon\n";
    assert!(AccessPolicy::from_yaml(raw).is_err());
}

#[test]
fn from_yaml_rejects_unknown_role() {
    let raw = "bypasses:\n  - grants: wizard\n    when: demo_account\n";
    assert!(AccessPolicy::from_yaml(raw).is_err());
}
