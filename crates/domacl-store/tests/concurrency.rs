//! Readers racing writers through cloned facade handles.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::thread;

use domacl_core::entry::{Permission, TrustLevel};
use domacl_store::AccessControlStore;

use common::{master_ace, owner_ace};

const ROUNDS: usize = 500;

#[test]
fn updates_are_never_observed_half_done() {
    let store = AccessControlStore::new();
    store.update_master_ace(master_ace("alice", "d1", "i1", "op1"));
    store.update_owner_ace(owner_ace("alice", "d1", "i1", "op1", Permission::Yes));

    let writer = {
        let store = store.clone();
        thread::spawn(move || {
            for i in 0..ROUNDS {
                let mut master = master_ace("alice", "d1", "i1", "op1");
                master.default_required_trust_level = if i % 2 == 0 {
                    TrustLevel::Mid
                } else {
                    TrustLevel::Low
                };
                assert!(store.update_master_ace(master));

                let permission = if i % 2 == 0 { Permission::No } else { Permission::Ask };
                assert!(store.update_owner_ace(owner_ace("alice", "d1", "i1", "op1", permission)));
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    assert!(store.get_master_ace("alice", "d1", "i1", "op1").is_some());
                    assert_eq!(store.get_master_aces_by_interface("d1", "i1").len(), 1);
                    assert_eq!(store.get_owner_aces("alice").len(), 1);
                    let triplet = store.get_access_control_triplet("alice", "d1", "i1", "op1");
                    assert!(triplet.master.is_some());
                    assert!(triplet.owner.is_some());
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }

    let stats = store.stats();
    assert_eq!(stats.master_aces, 1);
    assert_eq!(stats.owner_aces, 1);
}

#[test]
fn concurrent_writers_on_distinct_keys() {
    let store = AccessControlStore::new();
    let writers: Vec<_> = (0..4)
        .map(|t| {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    let uid = format!("user{t}");
                    let op = format!("op{i}");
                    assert!(store.update_master_ace(master_ace(&uid, "d1", "i1", &op)));
                }
            })
        })
        .collect();
    for w in writers {
        w.join().unwrap();
    }

    assert_eq!(store.stats().master_aces, 200);
    assert_eq!(store.get_master_aces("user3").len(), 50);
    assert_eq!(store.get_master_aces_for_interface("user2", "d1", "i1").len(), 50);
}
