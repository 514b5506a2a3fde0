//! Storage backends for control entries.
//!
//! The store only talks to the [`EntryBackend`] trait, so a persistent engine
//! can replace the in-memory collection without touching lookup semantics.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use domacl_core::entry::{ControlEntry, EntryKey};
use domacl_core::error::{DomAclError, Result};

/// Indexed collection the store reads and writes through.
pub trait EntryBackend<E>: Send {
    /// Insert an entry whose key is not present yet.
    ///
    /// If this unwinds during an update, the key stays vacant until the
    /// store's `recover` runs.
    fn put(&mut self, entry: E) -> Result<()>;
    /// Remove the entry at `key`, returning it if it existed.
    fn remove(&mut self, key: &EntryKey) -> Result<Option<E>>;
    fn get(&self, key: &EntryKey) -> Option<&E>;
    /// Entries with exactly this uid, in key order.
    fn by_uid(&self, uid: &str) -> Vec<&E>;
    /// Entries for this domain/interface pair regardless of uid, in key order.
    fn by_interface(&self, domain: &str, interface_name: &str) -> Vec<&E>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory collection: primary map plus hash indexes on uid and on
/// `(domain, interface)`.
#[derive(Debug)]
pub struct MemoryBackend<E> {
    entries: BTreeMap<EntryKey, E>,
    uid_index: HashMap<String, BTreeSet<EntryKey>>,
    interface_index: HashMap<(String, String), BTreeSet<EntryKey>>,
}

impl<E> Default for MemoryBackend<E> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            uid_index: HashMap::new(),
            interface_index: HashMap::new(),
        }
    }
}

impl<E> MemoryBackend<E> {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect<'a>(&'a self, keys: Option<&'a BTreeSet<EntryKey>>) -> Vec<&'a E> {
        keys.map(|set| set.iter().filter_map(|k| self.entries.get(k)).collect())
            .unwrap_or_default()
    }
}

fn check_key(key: &EntryKey) -> Result<()> {
    match key.malformed_component() {
        Some(component) => Err(DomAclError::StorageFailure(format!(
            "malformed key {key}: empty {component}"
        ))),
        None => Ok(()),
    }
}

impl<E: ControlEntry> EntryBackend<E> for MemoryBackend<E> {
    fn put(&mut self, entry: E) -> Result<()> {
        let key = entry.key();
        check_key(&key)?;
        if self.entries.contains_key(&key) {
            return Err(DomAclError::StorageFailure(format!("duplicate key {key}")));
        }

        self.uid_index
            .entry(key.uid.clone())
            .or_default()
            .insert(key.clone());
        self.interface_index
            .entry((key.domain.clone(), key.interface_name.clone()))
            .or_default()
            .insert(key.clone());
        self.entries.insert(key, entry);
        Ok(())
    }

    fn remove(&mut self, key: &EntryKey) -> Result<Option<E>> {
        check_key(key)?;
        let Some(entry) = self.entries.remove(key) else {
            return Ok(None);
        };

        if let Some(set) = self.uid_index.get_mut(&key.uid) {
            set.remove(key);
            if set.is_empty() {
                self.uid_index.remove(&key.uid);
            }
        }
        let pair = (key.domain.clone(), key.interface_name.clone());
        if let Some(set) = self.interface_index.get_mut(&pair) {
            set.remove(key);
            if set.is_empty() {
                self.interface_index.remove(&pair);
            }
        }
        Ok(Some(entry))
    }

    fn get(&self, key: &EntryKey) -> Option<&E> {
        self.entries.get(key)
    }

    fn by_uid(&self, uid: &str) -> Vec<&E> {
        self.collect(self.uid_index.get(uid))
    }

    fn by_interface(&self, domain: &str, interface_name: &str) -> Vec<&E> {
        let pair = (domain.to_string(), interface_name.to_string());
        self.collect(self.interface_index.get(&pair))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
