//! Access control facade.
//!
//! Owns the domain role registry and the six control entry stores behind one
//! mutex. Reads and writes take the same lock, so an update (remove, then
//! insert) is never observed half done. Mediator and Owner writes are checked
//! against the current Master/Mediator entries before they are committed.
//!
//! Every write comes in two forms: `try_*` returns the reason a write did not
//! take effect, the plain form only reports success.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use domacl_core::entry::{
    ControlEntry, DomainRoleEntry, EntryKey, MasterAccessControlEntry,
    MasterRegistrationControlEntry, MediatorAccessControlEntry, MediatorRegistrationControlEntry,
    OwnerAccessControlEntry, OwnerRegistrationControlEntry, Role, WILDCARD,
};
use domacl_core::error::{DomAclError, Result};
use domacl_core::validate::{AceValidator, RceValidator};

use crate::domain_role::DomainRoleRegistry;
use crate::provisioning::Provisioning;
use crate::store::ControlEntryStore;

/// Entry counts per list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub domain_roles: usize,
    pub master_aces: usize,
    pub mediator_aces: usize,
    pub owner_aces: usize,
    pub master_rces: usize,
    pub mediator_rces: usize,
    pub owner_rces: usize,
}

/// The three access entries that apply to one call, read under a single lock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AceTriplet {
    pub master: Option<MasterAccessControlEntry>,
    pub mediator: Option<MediatorAccessControlEntry>,
    pub owner: Option<OwnerAccessControlEntry>,
}

struct Stores {
    domain_roles: DomainRoleRegistry,
    master_aces: ControlEntryStore<MasterAccessControlEntry>,
    mediator_aces: ControlEntryStore<MediatorAccessControlEntry>,
    owner_aces: ControlEntryStore<OwnerAccessControlEntry>,
    master_rces: ControlEntryStore<MasterRegistrationControlEntry>,
    mediator_rces: ControlEntryStore<MediatorRegistrationControlEntry>,
    owner_rces: ControlEntryStore<OwnerRegistrationControlEntry>,
}

impl Stores {
    fn new() -> Self {
        Self {
            domain_roles: DomainRoleRegistry::new(),
            master_aces: ControlEntryStore::new("master_ace"),
            mediator_aces: ControlEntryStore::new("mediator_ace"),
            owner_aces: ControlEntryStore::new("owner_ace"),
            master_rces: ControlEntryStore::new("master_rce"),
            mediator_rces: ControlEntryStore::new("mediator_rce"),
            owner_rces: ControlEntryStore::new("owner_rce"),
        }
    }

    /// Undo any update interrupted by a panic inside a backend.
    fn recover(&mut self) {
        self.master_aces.recover();
        self.mediator_aces.recover();
        self.owner_aces.recover();
        self.master_rces.recover();
        self.mediator_rces.recover();
        self.owner_rces.recover();
    }

    fn master_ace(&self, key: &EntryKey) -> Option<MasterAccessControlEntry> {
        self.master_aces.entry(key)
    }

    // The store already resolves the wildcard uid; the second lookup is a
    // safety net that must agree with it.
    fn mediator_ace(&self, key: &EntryKey) -> Option<MediatorAccessControlEntry> {
        self.mediator_aces
            .entry(key)
            .or_else(|| self.mediator_aces.entry(&key.with_uid(WILDCARD)))
    }

    fn owner_ace(&self, key: &EntryKey) -> Option<OwnerAccessControlEntry> {
        self.owner_aces
            .entry(key)
            .or_else(|| self.owner_aces.entry(&key.with_uid(WILDCARD)))
    }

    fn master_rce(&self, key: &EntryKey) -> Option<MasterRegistrationControlEntry> {
        self.master_rces.entry(key)
    }

    fn mediator_rce(&self, key: &EntryKey) -> Option<MediatorRegistrationControlEntry> {
        self.mediator_rces
            .entry(key)
            .or_else(|| self.mediator_rces.entry(&key.with_uid(WILDCARD)))
    }

    fn owner_rce(&self, key: &EntryKey) -> Option<OwnerRegistrationControlEntry> {
        self.owner_rces
            .entry(key)
            .or_else(|| self.owner_rces.entry(&key.with_uid(WILDCARD)))
    }

    fn commit_mediator_ace(&mut self, entry: MediatorAccessControlEntry) -> Result<()> {
        let key = entry.key();
        let master = self.master_ace(&key);
        let validator = AceValidator::new(master.as_ref(), Some(&entry), None);
        if let Some(reason) = validator.mediator_violation() {
            return Err(rejected("mediator_ace", &key, reason));
        }
        self.mediator_aces.update(entry)
    }

    fn commit_owner_ace(&mut self, entry: OwnerAccessControlEntry) -> Result<()> {
        let key = entry.key();
        let master = self.master_ace(&key);
        let mediator = self.mediator_ace(&key);
        let validator = AceValidator::new(master.as_ref(), mediator.as_ref(), Some(&entry));
        if let Some(reason) = validator.owner_violation() {
            return Err(rejected("owner_ace", &key, reason));
        }
        self.owner_aces.update(entry)
    }

    fn commit_mediator_rce(&mut self, entry: MediatorRegistrationControlEntry) -> Result<()> {
        let key = entry.key();
        let master = self.master_rce(&key);
        let validator = RceValidator::new(master.as_ref(), Some(&entry), None);
        if let Some(reason) = validator.mediator_violation() {
            return Err(rejected("mediator_rce", &key, reason));
        }
        self.mediator_rces.update(entry)
    }

    fn commit_owner_rce(&mut self, entry: OwnerRegistrationControlEntry) -> Result<()> {
        let key = entry.key();
        let master = self.master_rce(&key);
        let mediator = self.mediator_rce(&key);
        let validator = RceValidator::new(master.as_ref(), mediator.as_ref(), Some(&entry));
        if let Some(reason) = validator.owner_violation() {
            return Err(rejected("owner_rce", &key, reason));
        }
        self.owner_rces.update(entry)
    }
}

fn rejected(store: &'static str, key: &EntryKey, reason: &'static str) -> DomAclError {
    tracing::debug!(store, key = %key, reason, "control entry rejected");
    DomAclError::ValidationRejected(format!("{store} {key}: {reason}"))
}

/// Hierarchical access control policy store.
///
/// Cheap to clone; clones share the same stores.
#[derive(Clone)]
pub struct AccessControlStore {
    inner: Arc<Mutex<Stores>>,
}

impl Default for AccessControlStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessControlStore {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Stores::new())),
        }
    }

    /// Store seeded from `source`: domain roles, then Master ACEs, then Master
    /// RCEs, each through the regular update path. With `strict`, the first
    /// rejected entry aborts construction; otherwise it is logged and skipped.
    pub fn provisioned(source: &dyn Provisioning, strict: bool) -> Result<Self> {
        let store = Self::new();
        let mut loaded = 0usize;
        let mut skipped = 0usize;

        let mut apply = |kind: &'static str, outcome: Result<()>| -> Result<()> {
            match outcome {
                Ok(()) => {
                    loaded += 1;
                    Ok(())
                }
                Err(e) if strict => Err(e),
                Err(e) => {
                    tracing::warn!(kind, code = e.code().as_str(), error = %e, "provisioned entry skipped");
                    skipped += 1;
                    Ok(())
                }
            }
        };

        for dre in source.domain_role_entries() {
            apply("domain_role", store.try_update_domain_role(dre))?;
        }
        for ace in source.master_access_control_entries() {
            apply("master_ace", store.try_update_master_ace(ace))?;
        }
        for rce in source.master_registration_control_entries() {
            apply("master_rce", store.try_update_master_rce(rce))?;
        }

        tracing::info!(loaded, skipped, "access control store provisioned");
        Ok(store)
    }

    fn lock(&self) -> MutexGuard<'_, Stores> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                // A panic while holding the lock is a logic bug; keep serving
                // once every store is back to a whole state.
                tracing::error!("access control store mutex poisoned; recovering");
                let mut guard = poisoned.into_inner();
                guard.recover();
                self.inner.clear_poison();
                guard
            }
        }
    }

    pub fn stats(&self) -> StoreStats {
        let s = self.lock();
        StoreStats {
            domain_roles: s.domain_roles.len(),
            master_aces: s.master_aces.len(),
            mediator_aces: s.mediator_aces.len(),
            owner_aces: s.owner_aces.len(),
            master_rces: s.master_rces.len(),
            mediator_rces: s.mediator_rces.len(),
            owner_rces: s.owner_rces.len(),
        }
    }

    /// Master, Mediator and Owner ACE for one call, as one consistent read.
    pub fn get_access_control_triplet(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> AceTriplet {
        let key = EntryKey::access(uid, domain, interface_name, operation);
        let s = self.lock();
        AceTriplet {
            master: s.master_ace(&key),
            mediator: s.mediator_ace(&key),
            owner: s.owner_ace(&key),
        }
    }

    // --- domain roles ---

    pub fn get_domain_roles(&self, uid: &str) -> Vec<DomainRoleEntry> {
        self.lock().domain_roles.get_domain_roles(uid)
    }

    pub fn get_domain_role(&self, uid: &str, role: Role) -> Option<DomainRoleEntry> {
        self.lock().domain_roles.get_domain_role(uid, role)
    }

    pub fn try_update_domain_role(&self, entry: DomainRoleEntry) -> Result<()> {
        self.lock().domain_roles.update_domain_role(entry)
    }

    pub fn update_domain_role(&self, entry: DomainRoleEntry) -> bool {
        self.try_update_domain_role(entry).is_ok()
    }

    pub fn try_remove_domain_role(&self, uid: &str, role: Role) -> Result<()> {
        self.lock().domain_roles.remove_domain_role(uid, role)
    }

    pub fn remove_domain_role(&self, uid: &str, role: Role) -> bool {
        self.try_remove_domain_role(uid, role).is_ok()
    }

    // --- master ACL ---

    pub fn get_master_aces(&self, uid: &str) -> Vec<MasterAccessControlEntry> {
        self.lock().master_aces.entries_by_uid(uid)
    }

    pub fn get_editable_master_aces(&self, uid: &str) -> Vec<MasterAccessControlEntry> {
        let s = self.lock();
        s.master_aces.editable_entries(&s.domain_roles, uid, Role::Master)
    }

    pub fn get_master_aces_by_interface(
        &self,
        domain: &str,
        interface_name: &str,
    ) -> Vec<MasterAccessControlEntry> {
        self.lock().master_aces.entries_by_interface(domain, interface_name)
    }

    pub fn get_master_aces_for_interface(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> Vec<MasterAccessControlEntry> {
        self.lock()
            .master_aces
            .entries_for_interface(uid, domain, interface_name)
    }

    pub fn get_master_ace(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> Option<MasterAccessControlEntry> {
        self.lock()
            .master_ace(&EntryKey::access(uid, domain, interface_name, operation))
    }

    /// Master is the root of authority: no higher tier to validate against.
    pub fn try_update_master_ace(&self, entry: MasterAccessControlEntry) -> Result<()> {
        self.lock().master_aces.update(entry)
    }

    pub fn update_master_ace(&self, entry: MasterAccessControlEntry) -> bool {
        self.try_update_master_ace(entry).is_ok()
    }

    pub fn try_remove_master_ace(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> Result<()> {
        self.lock()
            .master_aces
            .remove(&EntryKey::access(uid, domain, interface_name, operation))
    }

    pub fn remove_master_ace(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> bool {
        self.try_remove_master_ace(uid, domain, interface_name, operation)
            .is_ok()
    }

    // --- mediator ACL ---

    pub fn get_mediator_aces(&self, uid: &str) -> Vec<MediatorAccessControlEntry> {
        self.lock().mediator_aces.entries_by_uid(uid)
    }

    pub fn get_editable_mediator_aces(&self, uid: &str) -> Vec<MediatorAccessControlEntry> {
        let s = self.lock();
        s.mediator_aces.editable_entries(&s.domain_roles, uid, Role::Master)
    }

    pub fn get_mediator_aces_by_interface(
        &self,
        domain: &str,
        interface_name: &str,
    ) -> Vec<MediatorAccessControlEntry> {
        self.lock().mediator_aces.entries_by_interface(domain, interface_name)
    }

    pub fn get_mediator_aces_for_interface(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> Vec<MediatorAccessControlEntry> {
        self.lock()
            .mediator_aces
            .entries_for_interface(uid, domain, interface_name)
    }

    pub fn get_mediator_ace(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> Option<MediatorAccessControlEntry> {
        self.lock()
            .mediator_ace(&EntryKey::access(uid, domain, interface_name, operation))
    }

    /// Commits only if the entry narrows the Master ACE for the same key.
    pub fn try_update_mediator_ace(&self, entry: MediatorAccessControlEntry) -> Result<()> {
        self.lock().commit_mediator_ace(entry)
    }

    pub fn update_mediator_ace(&self, entry: MediatorAccessControlEntry) -> bool {
        self.try_update_mediator_ace(entry).is_ok()
    }

    pub fn try_remove_mediator_ace(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> Result<()> {
        self.lock()
            .mediator_aces
            .remove(&EntryKey::access(uid, domain, interface_name, operation))
    }

    pub fn remove_mediator_ace(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> bool {
        self.try_remove_mediator_ace(uid, domain, interface_name, operation)
            .is_ok()
    }

    // --- owner ACL ---

    pub fn get_owner_aces(&self, uid: &str) -> Vec<OwnerAccessControlEntry> {
        self.lock().owner_aces.entries_by_uid(uid)
    }

    pub fn get_editable_owner_aces(&self, uid: &str) -> Vec<OwnerAccessControlEntry> {
        let s = self.lock();
        s.owner_aces.editable_entries(&s.domain_roles, uid, Role::Owner)
    }

    pub fn get_owner_aces_by_interface(
        &self,
        domain: &str,
        interface_name: &str,
    ) -> Vec<OwnerAccessControlEntry> {
        self.lock().owner_aces.entries_by_interface(domain, interface_name)
    }

    pub fn get_owner_aces_for_interface(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> Vec<OwnerAccessControlEntry> {
        self.lock()
            .owner_aces
            .entries_for_interface(uid, domain, interface_name)
    }

    pub fn get_owner_ace(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> Option<OwnerAccessControlEntry> {
        self.lock()
            .owner_ace(&EntryKey::access(uid, domain, interface_name, operation))
    }

    /// Commits only if the entry lies within the Mediator ACE (or, without one,
    /// the Master ACE) for the same key.
    pub fn try_update_owner_ace(&self, entry: OwnerAccessControlEntry) -> Result<()> {
        self.lock().commit_owner_ace(entry)
    }

    pub fn update_owner_ace(&self, entry: OwnerAccessControlEntry) -> bool {
        self.try_update_owner_ace(entry).is_ok()
    }

    pub fn try_remove_owner_ace(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> Result<()> {
        self.lock()
            .owner_aces
            .remove(&EntryKey::access(uid, domain, interface_name, operation))
    }

    pub fn remove_owner_ace(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> bool {
        self.try_remove_owner_ace(uid, domain, interface_name, operation)
            .is_ok()
    }

    // --- master RCL ---

    pub fn get_master_rces(&self, uid: &str) -> Vec<MasterRegistrationControlEntry> {
        self.lock().master_rces.entries_by_uid(uid)
    }

    pub fn get_editable_master_rces(&self, uid: &str) -> Vec<MasterRegistrationControlEntry> {
        let s = self.lock();
        s.master_rces.editable_entries(&s.domain_roles, uid, Role::Master)
    }

    pub fn get_master_rces_by_interface(
        &self,
        domain: &str,
        interface_name: &str,
    ) -> Vec<MasterRegistrationControlEntry> {
        self.lock().master_rces.entries_by_interface(domain, interface_name)
    }

    pub fn get_master_rces_for_interface(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> Vec<MasterRegistrationControlEntry> {
        self.lock()
            .master_rces
            .entries_for_interface(uid, domain, interface_name)
    }

    pub fn get_master_rce(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> Option<MasterRegistrationControlEntry> {
        self.lock()
            .master_rce(&EntryKey::registration(uid, domain, interface_name))
    }

    pub fn try_update_master_rce(&self, entry: MasterRegistrationControlEntry) -> Result<()> {
        self.lock().master_rces.update(entry)
    }

    pub fn update_master_rce(&self, entry: MasterRegistrationControlEntry) -> bool {
        self.try_update_master_rce(entry).is_ok()
    }

    pub fn try_remove_master_rce(&self, uid: &str, domain: &str, interface_name: &str) -> Result<()> {
        self.lock()
            .master_rces
            .remove(&EntryKey::registration(uid, domain, interface_name))
    }

    pub fn remove_master_rce(&self, uid: &str, domain: &str, interface_name: &str) -> bool {
        self.try_remove_master_rce(uid, domain, interface_name).is_ok()
    }

    // --- mediator RCL ---

    pub fn get_mediator_rces(&self, uid: &str) -> Vec<MediatorRegistrationControlEntry> {
        self.lock().mediator_rces.entries_by_uid(uid)
    }

    pub fn get_editable_mediator_rces(&self, uid: &str) -> Vec<MediatorRegistrationControlEntry> {
        let s = self.lock();
        s.mediator_rces.editable_entries(&s.domain_roles, uid, Role::Master)
    }

    pub fn get_mediator_rces_by_interface(
        &self,
        domain: &str,
        interface_name: &str,
    ) -> Vec<MediatorRegistrationControlEntry> {
        self.lock().mediator_rces.entries_by_interface(domain, interface_name)
    }

    pub fn get_mediator_rces_for_interface(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> Vec<MediatorRegistrationControlEntry> {
        self.lock()
            .mediator_rces
            .entries_for_interface(uid, domain, interface_name)
    }

    pub fn get_mediator_rce(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> Option<MediatorRegistrationControlEntry> {
        self.lock()
            .mediator_rce(&EntryKey::registration(uid, domain, interface_name))
    }

    pub fn try_update_mediator_rce(&self, entry: MediatorRegistrationControlEntry) -> Result<()> {
        self.lock().commit_mediator_rce(entry)
    }

    pub fn update_mediator_rce(&self, entry: MediatorRegistrationControlEntry) -> bool {
        self.try_update_mediator_rce(entry).is_ok()
    }

    pub fn try_remove_mediator_rce(&self, uid: &str, domain: &str, interface_name: &str) -> Result<()> {
        self.lock()
            .mediator_rces
            .remove(&EntryKey::registration(uid, domain, interface_name))
    }

    pub fn remove_mediator_rce(&self, uid: &str, domain: &str, interface_name: &str) -> bool {
        self.try_remove_mediator_rce(uid, domain, interface_name).is_ok()
    }

    // --- owner RCL ---

    pub fn get_owner_rces(&self, uid: &str) -> Vec<OwnerRegistrationControlEntry> {
        self.lock().owner_rces.entries_by_uid(uid)
    }

    pub fn get_editable_owner_rces(&self, uid: &str) -> Vec<OwnerRegistrationControlEntry> {
        let s = self.lock();
        s.owner_rces.editable_entries(&s.domain_roles, uid, Role::Owner)
    }

    pub fn get_owner_rces_by_interface(
        &self,
        domain: &str,
        interface_name: &str,
    ) -> Vec<OwnerRegistrationControlEntry> {
        self.lock().owner_rces.entries_by_interface(domain, interface_name)
    }

    pub fn get_owner_rces_for_interface(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> Vec<OwnerRegistrationControlEntry> {
        self.lock()
            .owner_rces
            .entries_for_interface(uid, domain, interface_name)
    }

    pub fn get_owner_rce(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> Option<OwnerRegistrationControlEntry> {
        self.lock()
            .owner_rce(&EntryKey::registration(uid, domain, interface_name))
    }

    pub fn try_update_owner_rce(&self, entry: OwnerRegistrationControlEntry) -> Result<()> {
        self.lock().commit_owner_rce(entry)
    }

    pub fn update_owner_rce(&self, entry: OwnerRegistrationControlEntry) -> bool {
        self.try_update_owner_rce(entry).is_ok()
    }

    pub fn try_remove_owner_rce(&self, uid: &str, domain: &str, interface_name: &str) -> Result<()> {
        self.lock()
            .owner_rces
            .remove(&EntryKey::registration(uid, domain, interface_name))
    }

    pub fn remove_owner_rce(&self, uid: &str, domain: &str, interface_name: &str) -> bool {
        self.try_remove_owner_rce(uid, domain, interface_name).is_ok()
    }
}
