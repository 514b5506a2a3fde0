use std::fmt;

/// Primary key of a control entry.
///
/// Access entries are keyed by `(uid, domain, interface, operation)`;
/// registration entries have no operation and carry `None`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey {
    pub uid: String,
    pub domain: String,
    pub interface_name: String,
    pub operation: Option<String>,
}

impl EntryKey {
    pub fn access(uid: &str, domain: &str, interface_name: &str, operation: &str) -> Self {
        Self {
            uid: uid.to_string(),
            domain: domain.to_string(),
            interface_name: interface_name.to_string(),
            operation: Some(operation.to_string()),
        }
    }

    pub fn registration(uid: &str, domain: &str, interface_name: &str) -> Self {
        Self {
            uid: uid.to_string(),
            domain: domain.to_string(),
            interface_name: interface_name.to_string(),
            operation: None,
        }
    }

    /// Same key with a different uid.
    pub fn with_uid(&self, uid: &str) -> Self {
        Self {
            uid: uid.to_string(),
            ..self.clone()
        }
    }

    /// Same key with a different operation. Registration keys stay operation-less.
    pub fn with_operation(&self, operation: &str) -> Self {
        Self {
            operation: self.operation.as_ref().map(|_| operation.to_string()),
            ..self.clone()
        }
    }

    /// Name of the first empty component, if any.
    pub fn malformed_component(&self) -> Option<&'static str> {
        if self.uid.is_empty() {
            return Some("uid");
        }
        if self.domain.is_empty() {
            return Some("domain");
        }
        if self.interface_name.is_empty() {
            return Some("interfaceName");
        }
        match &self.operation {
            Some(op) if op.is_empty() => Some("operation"),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.uid, self.domain, self.interface_name)?;
        if let Some(op) = &self.operation {
            write!(f, "/{op}")?;
        }
        Ok(())
    }
}

/// Key extraction shared by every entry kind a store can hold.
pub trait ControlEntry: Clone + Send + 'static {
    fn uid(&self) -> &str;
    fn domain(&self) -> &str;
    fn interface_name(&self) -> &str;
    /// `None` for registration entries.
    fn operation(&self) -> Option<&str>;

    fn key(&self) -> EntryKey {
        EntryKey {
            uid: self.uid().to_string(),
            domain: self.domain().to_string(),
            interface_name: self.interface_name().to_string(),
            operation: self.operation().map(str::to_string),
        }
    }
}
