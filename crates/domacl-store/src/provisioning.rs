//! Startup provisioning sources.
//!
//! Every provisioned entry goes through the same `update*` path as an
//! administrative write, so provisioning is validated like any other write.

use std::fs;

use domacl_core::entry::{
    ControlEntry, DomainRoleEntry, MasterAccessControlEntry, MasterRegistrationControlEntry,
};
use domacl_core::error::{DomAclError, Result};
use domacl_core::validate::TierBounds;

use crate::config::schema::{check_master_entry, ProvisioningSection};

/// Source of default entries, queried once at construction.
pub trait Provisioning {
    fn domain_role_entries(&self) -> Vec<DomainRoleEntry>;
    fn master_access_control_entries(&self) -> Vec<MasterAccessControlEntry>;
    fn master_registration_control_entries(&self) -> Vec<MasterRegistrationControlEntry> {
        Vec::new()
    }
}

/// Provisions nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultProvisioning;

impl Provisioning for DefaultProvisioning {
    fn domain_role_entries(&self) -> Vec<DomainRoleEntry> {
        Vec::new()
    }

    fn master_access_control_entries(&self) -> Vec<MasterAccessControlEntry> {
        Vec::new()
    }
}

/// Fixed set of entries from config and/or JSON.
#[derive(Debug, Default, Clone)]
pub struct StaticProvisioning {
    domain_roles: Vec<DomainRoleEntry>,
    master_aces: Vec<MasterAccessControlEntry>,
    master_rces: Vec<MasterRegistrationControlEntry>,
}

impl StaticProvisioning {
    pub fn new(
        domain_roles: Vec<DomainRoleEntry>,
        master_aces: Vec<MasterAccessControlEntry>,
        master_rces: Vec<MasterRegistrationControlEntry>,
    ) -> Self {
        Self {
            domain_roles,
            master_aces,
            master_rces,
        }
    }

    /// Entries from the config section plus every listed JSON file.
    ///
    /// A malformed Master entry aborts with `strict`; otherwise it is logged
    /// and dropped. Unreadable or unparsable files always abort.
    pub fn from_config(section: &ProvisioningSection, strict: bool) -> Result<Self> {
        let mut out = Self::new(
            section.domain_roles.clone(),
            admit(
                "provisioning.master_access_control_entries",
                section.master_access_control_entries.clone(),
                strict,
            )?,
            admit(
                "provisioning.master_registration_control_entries",
                section.master_registration_control_entries.clone(),
                strict,
            )?,
        );

        for path in &section.json_files {
            let s = fs::read_to_string(path).map_err(|e| {
                DomAclError::Internal(format!(
                    "read provisioning file failed ({}): {e}",
                    path.display()
                ))
            })?;
            let loaded = Self::from_json_str(&s, strict)?;
            tracing::debug!(path = %path.display(), entries = loaded.master_aces.len(), "provisioning file loaded");
            out.master_aces.extend(loaded.master_aces);
        }
        Ok(out)
    }

    /// JSON array of Master ACEs (camelCase fields). Malformed entries are
    /// handled as in [`StaticProvisioning::from_config`].
    pub fn from_json_str(s: &str, strict: bool) -> Result<Self> {
        let master_aces: Vec<MasterAccessControlEntry> = serde_json::from_str(s)
            .map_err(|e| DomAclError::BadRequest(format!("invalid provisioning json: {e}")))?;
        let master_aces = admit("provisioning json", master_aces, strict)?;
        Ok(Self::new(Vec::new(), master_aces, Vec::new()))
    }
}

fn admit<E: ControlEntry + TierBounds>(source: &'static str, entries: Vec<E>, strict: bool) -> Result<Vec<E>> {
    let mut admitted = Vec::with_capacity(entries.len());
    for entry in entries {
        match check_master_entry(source, &entry) {
            Ok(()) => admitted.push(entry),
            Err(e) if strict => return Err(e),
            Err(e) => {
                tracing::warn!(source, code = e.code().as_str(), error = %e, "provisioned entry dropped");
            }
        }
    }
    Ok(admitted)
}

impl Provisioning for StaticProvisioning {
    fn domain_role_entries(&self) -> Vec<DomainRoleEntry> {
        self.domain_roles.clone()
    }

    fn master_access_control_entries(&self) -> Vec<MasterAccessControlEntry> {
        self.master_aces.clone()
    }

    fn master_registration_control_entries(&self) -> Vec<MasterRegistrationControlEntry> {
        self.master_rces.clone()
    }
}
