//! Generic control entry store.
//!
//! One type serves all six lists (Master/Mediator/Owner x access/registration).
//! Lookups resolve the reserved `"*"` uid, and for access entries the `"*"`
//! operation, always preferring the most specific match.

mod backend;

use domacl_core::entry::{ControlEntry, EntryKey, Role, WILDCARD};
use domacl_core::error::{DomAclError, Result};

use crate::domain_role::DomainRoleRegistry;

pub use backend::{EntryBackend, MemoryBackend};

/// Indexed store holding at most one entry per primary key.
pub struct ControlEntryStore<E, B = MemoryBackend<E>> {
    name: &'static str,
    backend: B,
    /// Update between its remove and its insert; set only while a backend
    /// call is running.
    in_flight: Option<InFlight<E>>,
}

struct InFlight<E> {
    key: EntryKey,
    previous: Option<E>,
}

impl<E: ControlEntry> ControlEntryStore<E> {
    /// In-memory store. `name` identifies the list in logs.
    pub fn new(name: &'static str) -> Self {
        Self::with_backend(name, MemoryBackend::new())
    }
}

impl<E: ControlEntry, B: EntryBackend<E>> ControlEntryStore<E, B> {
    pub fn with_backend(name: &'static str, backend: B) -> Self {
        Self {
            name,
            backend,
            in_flight: None,
        }
    }

    pub fn len(&self) -> usize {
        self.backend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// Entries owned by `uid`; if there are none, every wildcard-uid entry.
    /// Never a mix of the two.
    pub fn entries_by_uid(&self, uid: &str) -> Vec<E> {
        let own = self.backend.by_uid(uid);
        let found = if own.is_empty() {
            self.backend.by_uid(WILDCARD)
        } else {
            own
        };
        found.into_iter().cloned().collect()
    }

    /// Every entry for a domain/interface pair, any uid.
    pub fn entries_by_interface(&self, domain: &str, interface_name: &str) -> Vec<E> {
        self.backend
            .by_interface(domain, interface_name)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Entries for a domain/interface pair belonging to the most specific uid
    /// group: `uid`'s own entries if any exist, else the wildcard-uid entries.
    pub fn entries_for_interface(&self, uid: &str, domain: &str, interface_name: &str) -> Vec<E> {
        let mut candidates: Vec<&E> = self
            .backend
            .by_interface(domain, interface_name)
            .into_iter()
            .filter(|e| e.uid() == uid || e.uid() == WILDCARD)
            .collect();
        // uid-specific entries first; the stable sort keeps key order inside a group
        candidates.sort_by_key(|e| e.uid() == WILDCARD);

        let Some(first_uid) = candidates.first().map(|e| e.uid().to_string()) else {
            return Vec::new();
        };
        candidates
            .into_iter()
            .take_while(|e| e.uid() == first_uid)
            .cloned()
            .collect()
    }

    /// Single entry resolving uid (specific before wildcard) and, for access
    /// entries, operation (exact before wildcard).
    pub fn entry(&self, key: &EntryKey) -> Option<E> {
        self.lookup_uid(key).or_else(|| match key.operation.as_deref() {
            Some(op) if op != WILDCARD => self.lookup_uid(&key.with_operation(WILDCARD)),
            _ => None,
        })
    }

    fn lookup_uid(&self, key: &EntryKey) -> Option<E> {
        self.backend
            .get(key)
            .or_else(|| self.backend.get(&key.with_uid(WILDCARD)))
            .cloned()
    }

    /// Entries `uid` may edit: its own entries (no wildcard fallback) in the
    /// domains its `role` entry lists, in key order.
    pub fn editable_entries(&self, roles: &DomainRoleRegistry, uid: &str, role: Role) -> Vec<E> {
        let Some(dre) = roles.domain_role(uid, role) else {
            return Vec::new();
        };

        self.backend
            .by_uid(uid)
            .into_iter()
            .filter(|e| dre.administers(e.domain()))
            .cloned()
            .collect()
    }

    /// Replace whatever sits at the entry's primary key with `entry`.
    ///
    /// Remove-then-insert; if the insert fails the removed entry is put back.
    pub fn update(&mut self, entry: E) -> Result<()> {
        let key = entry.key();
        let previous = self
            .backend
            .remove(&key)
            .map_err(|e| self.storage_failure("update", &key, e))?;
        self.in_flight = Some(InFlight {
            key: key.clone(),
            previous,
        });

        let inserted = self.backend.put(entry);
        let pending = self.in_flight.take();
        if let Err(e) = inserted {
            if let Some(previous) = pending.and_then(|p| p.previous) {
                self.restore(&key, previous);
            }
            return Err(self.storage_failure("update", &key, e));
        }

        tracing::debug!(store = self.name, key = %key, "control entry updated");
        Ok(())
    }

    /// Remove the entry at exactly `key` (no wildcard resolution).
    pub fn remove(&mut self, key: &EntryKey) -> Result<()> {
        match self.backend.remove(key) {
            Ok(Some(_)) => {
                tracing::debug!(store = self.name, key = %key, "control entry removed");
                Ok(())
            }
            Ok(None) => Err(DomAclError::NotFound(format!("{} {key}", self.name))),
            Err(e) => Err(self.storage_failure("remove", key, e)),
        }
    }

    /// Finish an update the backend abandoned by unwinding: if its key is
    /// still vacant, put the replaced entry back. No-op otherwise.
    pub fn recover(&mut self) {
        let Some(pending) = self.in_flight.take() else {
            return;
        };
        tracing::warn!(store = self.name, key = %pending.key, "recovering interrupted update");
        if self.backend.get(&pending.key).is_some() {
            return;
        }
        if let Some(previous) = pending.previous {
            self.restore(&pending.key, previous);
        }
    }

    fn restore(&mut self, key: &EntryKey, previous: E) {
        if let Err(e) = self.backend.put(previous) {
            tracing::error!(store = self.name, key = %key, error = %e, "restore after failed update failed");
        }
    }

    fn storage_failure(&self, op: &'static str, key: &EntryKey, err: DomAclError) -> DomAclError {
        tracing::error!(store = self.name, op, key = %key, error = %err, "control entry storage failure");
        match err {
            DomAclError::StorageFailure(_) => err,
            other => DomAclError::StorageFailure(other.to_string()),
        }
    }
}
