#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use domacl_core::entry::{Role, WILDCARD};
use domacl_core::error::ErrorCode;
use domacl_store::{AccessControlStore, DomainRoleRegistry};

use common::dre;

#[test]
fn update_then_get_round_trip() {
    let store = AccessControlStore::new();
    let entry = dre("alice", Role::Owner, &["d1", "d2"]);
    assert!(store.update_domain_role(entry.clone()));
    assert_eq!(store.get_domain_role("alice", Role::Owner), Some(entry));
    assert!(store.get_domain_role("alice", Role::Master).is_none());
}

#[test]
fn update_replaces_by_uid_and_role() {
    let store = AccessControlStore::new();
    store.update_domain_role(dre("alice", Role::Master, &["d1"]));
    store.update_domain_role(dre("alice", Role::Master, &["d2", "d3"]));
    store.update_domain_role(dre("alice", Role::Owner, &["d4"]));

    let roles = store.get_domain_roles("alice");
    assert_eq!(roles.len(), 2);
    let master = store.get_domain_role("alice", Role::Master).unwrap();
    assert_eq!(master.domains, vec!["d2".to_string(), "d3".to_string()]);
    assert!(master.administers("d3"));
    assert!(!master.administers("d1"));
}

#[test]
fn roles_do_not_resolve_wildcard() {
    let store = AccessControlStore::new();
    store.update_domain_role(dre(WILDCARD, Role::Master, &["d1"]));
    assert!(store.get_domain_roles("alice").is_empty());
    assert_eq!(store.get_domain_roles(WILDCARD).len(), 1);
}

#[test]
fn remove_twice() {
    let store = AccessControlStore::new();
    store.update_domain_role(dre("alice", Role::Master, &["d1"]));
    assert!(store.remove_domain_role("alice", Role::Master));
    assert!(store.get_domain_role("alice", Role::Master).is_none());
    assert!(!store.remove_domain_role("alice", Role::Master));

    let err = store.try_remove_domain_role("alice", Role::Master).unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[test]
fn empty_uid_is_storage_failure() {
    let store = AccessControlStore::new();
    assert!(!store.update_domain_role(dre("", Role::Owner, &["d1"])));
    let err = store.try_update_domain_role(dre("", Role::Owner, &[])).unwrap_err();
    assert_eq!(err.code(), ErrorCode::StorageFailure);
    assert_eq!(store.stats().domain_roles, 0);
}

#[test]
fn registry_orders_master_before_owner() {
    let mut registry = DomainRoleRegistry::new();
    registry.update_domain_role(dre("bob", Role::Owner, &[])).unwrap();
    registry.update_domain_role(dre("bob", Role::Master, &[])).unwrap();
    registry.update_domain_role(dre("bobby", Role::Master, &[])).unwrap();

    let roles = registry.get_domain_roles("bob");
    assert_eq!(roles.iter().map(|r| r.role).collect::<Vec<_>>(), vec![Role::Master, Role::Owner]);
    assert_eq!(registry.len(), 3);
}
