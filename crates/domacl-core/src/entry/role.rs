use serde::{Deserialize, Serialize};

/// Administrative role a uid can hold over a set of domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Master,
    Owner,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Master => "MASTER",
            Role::Owner => "OWNER",
        }
    }
}

/// Domains a uid administers under one role. Primary key is `(uid, role)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DomainRoleEntry {
    pub uid: String,
    pub role: Role,
    #[serde(default)]
    pub domains: Vec<String>,
}

impl DomainRoleEntry {
    pub fn new(uid: impl Into<String>, role: Role, domains: Vec<String>) -> Self {
        Self {
            uid: uid.into(),
            role,
            domains,
        }
    }

    /// Whether `domain` is one of the administered domains.
    pub fn administers(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }
}
