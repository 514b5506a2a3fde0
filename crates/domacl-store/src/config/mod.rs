//! Store config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use domacl_core::error::{DomAclError, Result};

pub use schema::{ProvisioningSection, StoreConfig, StoreSection};

/// Default config path used by the binary.
pub const DEFAULT_CONFIG_PATH: &str = "domacl.yaml";

/// Like [`load_from_str`], with relative `json_files` resolved against the
/// directory holding `path`.
pub fn load_from_file(path: &str) -> Result<StoreConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| DomAclError::Internal(format!("read config failed ({path}): {e}")))?;
    let mut cfg = load_from_str(&s)?;
    if let Some(dir) = Path::new(path).parent() {
        cfg.provisioning.resolve_relative_to(dir);
    }
    Ok(cfg)
}

pub fn load_from_str(s: &str) -> Result<StoreConfig> {
    let cfg: StoreConfig = serde_yaml::from_str(s)
        .map_err(|e| DomAclError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
