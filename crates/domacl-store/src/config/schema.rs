use std::path::{Path, PathBuf};

use serde::Deserialize;

use domacl_core::entry::{
    ControlEntry, DomainRoleEntry, MasterAccessControlEntry, MasterRegistrationControlEntry,
};
use domacl_core::error::{DomAclError, Result};
use domacl_core::validate::TierBounds;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    pub version: u32,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub provisioning: ProvisioningSection,
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(DomAclError::UnsupportedVersion);
        }

        self.provisioning.validate(self.store.strict_provisioning)?;

        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// Abort startup when a provisioned entry is rejected instead of skipping it.
    #[serde(default)]
    pub strict_provisioning: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvisioningSection {
    #[serde(default)]
    pub domain_roles: Vec<DomainRoleEntry>,

    #[serde(default)]
    pub master_access_control_entries: Vec<MasterAccessControlEntry>,

    #[serde(default)]
    pub master_registration_control_entries: Vec<MasterRegistrationControlEntry>,

    /// JSON files each holding an array of Master ACEs. Relative paths are
    /// resolved against the config file's directory.
    #[serde(default)]
    pub json_files: Vec<PathBuf>,
}

impl ProvisioningSection {
    /// Entry checks run only when `strict`; otherwise bad entries are dropped
    /// one by one during provisioning.
    pub fn validate(&self, strict: bool) -> Result<()> {
        if self.json_files.iter().any(|p| p.as_os_str().is_empty()) {
            return Err(DomAclError::BadRequest(
                "provisioning.json_files: path must not be empty".into(),
            ));
        }
        if !strict {
            return Ok(());
        }

        for dre in &self.domain_roles {
            if dre.uid.is_empty() {
                return Err(DomAclError::BadRequest(
                    "provisioning.domain_roles: uid must not be empty".into(),
                ));
            }
        }
        for ace in &self.master_access_control_entries {
            check_master_entry("provisioning.master_access_control_entries", ace)?;
        }
        for rce in &self.master_registration_control_entries {
            check_master_entry("provisioning.master_registration_control_entries", rce)?;
        }
        Ok(())
    }

    pub(crate) fn resolve_relative_to(&mut self, dir: &Path) {
        for path in &mut self.json_files {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
    }
}

/// Key must be well formed and defaults must lie in the entry's own possible sets.
pub(crate) fn check_master_entry<E: ControlEntry + TierBounds>(section: &str, entry: &E) -> Result<()> {
    let key = entry.key();
    if let Some(component) = key.malformed_component() {
        return Err(DomAclError::BadRequest(format!(
            "{section}: entry {key} has empty {component}"
        )));
    }
    if !entry.is_self_consistent() {
        return Err(DomAclError::BadRequest(format!(
            "{section}: entry {key} has defaults outside its possible sets"
        )));
    }
    Ok(())
}
