//! domacl store library entry.
//!
//! This crate wires the domain role registry, the six control entry stores,
//! and the tier validators into one access control facade, plus the config
//! and provisioning needed to seed it at startup. It is consumed by the
//! binary (`main.rs`), by authorization evaluators, and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod access_control;
pub mod config;
pub mod domain_role;
pub mod provisioning;
pub mod store;

pub use access_control::{AccessControlStore, AceTriplet, StoreStats};
pub use domain_role::DomainRoleRegistry;
pub use provisioning::{DefaultProvisioning, Provisioning, StaticProvisioning};
pub use store::{ControlEntryStore, EntryBackend, MemoryBackend};
