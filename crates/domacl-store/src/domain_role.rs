//! Domain role registry: which domains a uid administers under each role.

use std::collections::BTreeMap;

use domacl_core::entry::{DomainRoleEntry, Role};
use domacl_core::error::{DomAclError, Result};

/// `(uid, role) -> DomainRoleEntry`, at most one entry per key.
#[derive(Debug, Default)]
pub struct DomainRoleRegistry {
    entries: BTreeMap<(String, Role), DomainRoleEntry>,
}

impl DomainRoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every role held by `uid`. No wildcard support.
    pub fn get_domain_roles(&self, uid: &str) -> Vec<DomainRoleEntry> {
        let range = (uid.to_string(), Role::Master)..=(uid.to_string(), Role::Owner);
        self.entries.range(range).map(|(_, e)| e.clone()).collect()
    }

    pub fn get_domain_role(&self, uid: &str, role: Role) -> Option<DomainRoleEntry> {
        self.domain_role(uid, role).cloned()
    }

    pub(crate) fn domain_role(&self, uid: &str, role: Role) -> Option<&DomainRoleEntry> {
        self.entries.get(&(uid.to_string(), role))
    }

    /// Upsert by `(uid, role)`.
    pub fn update_domain_role(&mut self, entry: DomainRoleEntry) -> Result<()> {
        if entry.uid.is_empty() {
            let err = DomAclError::StorageFailure(format!(
                "malformed domain role key: empty uid (role={})",
                entry.role.as_str()
            ));
            tracing::error!(op = "update", role = entry.role.as_str(), error = %err, "domain role storage failure");
            return Err(err);
        }

        tracing::debug!(uid = %entry.uid, role = entry.role.as_str(), domains = entry.domains.len(), "domain role updated");
        self.entries.insert((entry.uid.clone(), entry.role), entry);
        Ok(())
    }

    pub fn remove_domain_role(&mut self, uid: &str, role: Role) -> Result<()> {
        match self.entries.remove(&(uid.to_string(), role)) {
            Some(_) => {
                tracing::debug!(uid, role = role.as_str(), "domain role removed");
                Ok(())
            }
            None => Err(DomAclError::NotFound(format!(
                "domain role {uid}/{}",
                role.as_str()
            ))),
        }
    }
}
