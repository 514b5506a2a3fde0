//! domacl store binary.
//!
//! Usage: `domacl-store [CONFIG] [UID DOMAIN INTERFACE OPERATION]`
//! - Loads the config (strict parsing + validate) and provisions the store
//! - With a query, prints the Master/Mediator/Owner ACE triplet as JSON

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use domacl_core::error::{DomAclError, Result};
use domacl_store::{config, AccessControlStore, StaticProvisioning};

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let query: Vec<String> = args.collect();

    match run(&path, &query) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "domacl-store failed");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str, query: &[String]) -> Result<()> {
    let cfg = config::load_from_file(path)?;
    let provisioning = StaticProvisioning::from_config(&cfg.provisioning, cfg.store.strict_provisioning)?;
    let store = AccessControlStore::provisioned(&provisioning, cfg.store.strict_provisioning)?;

    let stats = store.stats();
    tracing::info!(%path, ?stats, "domacl store ready");

    match query {
        [] => Ok(()),
        [uid, domain, interface_name, operation] => {
            let triplet = store.get_access_control_triplet(uid, domain, interface_name, operation);
            let out = serde_json::to_string_pretty(&triplet)
                .map_err(|e| DomAclError::Internal(format!("encode result failed: {e}")))?;
            println!("{out}");
            Ok(())
        }
        _ => Err(DomAclError::BadRequest(
            "usage: domacl-store [CONFIG] [UID DOMAIN INTERFACE OPERATION]".into(),
        )),
    }
}
