use crate::{Member, Permission};

use uuid::Uuid;

fn member_with_role(role: &str) -> Member {
    Member::new(Uuid::new_v4(), Uuid::new_v4(), role)
}

#[test]
fn test_owner_and_admin_hold_every_permission() {
    for role in ["owner", "admin"] {
        let member = member_with_role(role);
        assert!(member.has_permission(Permission::ViewAll));
        assert!(member.has_permission(Permission::CreateAll));
        assert!(member.has_permission(Permission::UpdateAll));
        assert!(member.has_permission(Permission::DeleteAll));
        assert!(member.has_permission(Permission::ViewOwn));
        assert!(member.has_permission(Permission::CreateOwn));
        assert!(member.has_permission(Permission::UpdateOwn));
        assert!(member.has_permission(Permission::DeleteOwn));
    }
}

#[test]
fn test_manager_sees_everything_but_writes_own_only() {
    let member = member_with_role("manager");

    assert!(member.has_permission(Permission::ViewAll));
    assert!(member.has_permission(Permission::ViewOwn));
    assert!(member.has_permission(Permission::CreateOwn));
    assert!(member.has_permission(Permission::UpdateOwn));
    assert!(member.has_permission(Permission::DeleteOwn));

    assert!(!member.has_permission(Permission::CreateAll));
    assert!(!member.has_permission(Permission::UpdateAll));
    assert!(!member.has_permission(Permission::DeleteAll));
}

#[test]
fn test_employee_is_limited_to_own_entries() {
    let member = member_with_role("employee");

    assert!(member.has_permission(Permission::ViewOwn));
    assert!(member.has_permission(Permission::CreateOwn));
    assert!(member.has_permission(Permission::UpdateOwn));
    assert!(member.has_permission(Permission::DeleteOwn));

    assert!(!member.has_permission(Permission::ViewAll));
    assert!(!member.has_permission(Permission::CreateAll));
    assert!(!member.has_permission(Permission::UpdateAll));
    assert!(!member.has_permission(Permission::DeleteAll));
}

#[test]
fn test_unknown_role_holds_nothing() {
    let member = member_with_role("intern");

    assert!(!member.has_permission(Permission::ViewOwn));
    assert!(!member.has_permission(Permission::ViewAll));
    assert!(!member.has_permission(Permission::CreateOwn));
    assert!(!member.has_permission(Permission::UpdateOwn));
    assert!(!member.has_permission(Permission::DeleteOwn));
}
