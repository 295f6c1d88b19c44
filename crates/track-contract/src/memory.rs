//! # In-Memory World State
//!
//! [`MemoryStore`] is a thread-safe, cloneable, versioned key-value store.
//! Each committed write stamps its key with the next value of a global
//! sequence; an absent key has version 0.
//!
//! [`Transaction`] is the per-invocation view handed to the contract:
//!
//! - reads see the transaction's own pending writes first, then committed
//!   state, and record the committed version they observed;
//! - writes and deletes are buffered in a write set;
//! - [`Transaction::commit`] validates the read set and applies the whole
//!   write set under one write lock, or applies nothing;
//! - dropping a transaction without committing discards it.
//!
//! A transaction whose read keys changed between read and commit is rejected
//! with [`StoreError::Conflict`]. Range scans do not register phantom reads.
//!
//! All locking is `parking_lot` and never held across an `.await`.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use track_core::StoreError;

use crate::store::{range_bounds, KeyValue, StateIter, StateStore};

#[derive(Debug, Clone)]
struct Versioned {
    value: Vec<u8>,
    version: u64,
}

#[derive(Debug, Default)]
struct WorldState {
    entries: BTreeMap<String, Versioned>,
    sequence: u64,
}

impl WorldState {
    fn version(&self, key: &str) -> u64 {
        self.entries.get(key).map_or(0, |entry| entry.version)
    }

    fn apply(&mut self, key: String, value: Option<Vec<u8>>) {
        match value {
            Some(value) => {
                self.sequence += 1;
                let version = self.sequence;
                self.entries.insert(key, Versioned { value, version });
            }
            None => {
                self.entries.remove(&key);
            }
        }
    }

    fn snapshot_range(&self, start: &str, end: &str) -> Result<Vec<KeyValue>, StoreError> {
        let bounds = range_bounds(start, end)?;
        Ok(self
            .entries
            .range(bounds)
            .map(|(key, entry)| KeyValue {
                key: key.clone(),
                value: entry.value.clone(),
            })
            .collect())
    }
}

/// Shared, versioned world state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<WorldState>>,
    open_iterators: Arc<AtomicUsize>,
}

impl MemoryStore {
    /// Create an empty world state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world state pre-populated with `entries`.
    pub fn from_entries(entries: impl IntoIterator<Item = KeyValue>) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.write();
            for KeyValue { key, value } in entries {
                state.apply(key, Some(value));
            }
        }
        store
    }

    /// Start a transaction against the current committed state.
    pub fn begin(&self) -> Transaction {
        Transaction {
            world: self.clone(),
            reads: Mutex::new(BTreeMap::new()),
            writes: BTreeMap::new(),
        }
    }

    /// Every committed entry in key order.
    pub fn entries(&self) -> Vec<KeyValue> {
        self.state
            .read()
            .entries
            .iter()
            .map(|(key, entry)| KeyValue {
                key: key.clone(),
                value: entry.value.clone(),
            })
            .collect()
    }

    /// Committed version of `key`, 0 when absent.
    pub fn version(&self, key: &str) -> u64 {
        self.state.read().version(key)
    }

    /// Number of committed keys.
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Whether no keys are committed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of range iterators currently open against this store.
    pub fn open_iterators(&self) -> usize {
        self.open_iterators.load(Ordering::Acquire)
    }

    fn tracked(&self, items: Vec<KeyValue>) -> StateIter<'static> {
        self.open_iterators.fetch_add(1, Ordering::AcqRel);
        Box::new(TrackedIter {
            items: items.into_iter(),
            _guard: IteratorGuard(Arc::clone(&self.open_iterators)),
        })
    }
}

/// Direct access applies every write immediately.
impl StateStore for MemoryStore {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .state
            .read()
            .entries
            .get(key)
            .map(|entry| entry.value.clone()))
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        check_key(key, |reason| StoreError::Write {
            key: key.to_string(),
            reason,
        })?;
        self.state.write().apply(key.to_string(), Some(value));
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), StoreError> {
        check_key(key, |reason| StoreError::Delete {
            key: key.to_string(),
            reason,
        })?;
        self.state.write().apply(key.to_string(), None);
        Ok(())
    }

    fn state_by_range(&self, start: &str, end: &str) -> Result<StateIter<'_>, StoreError> {
        let items = self.state.read().snapshot_range(start, end)?;
        Ok(self.tracked(items))
    }
}

fn check_key(key: &str, err: impl FnOnce(String) -> StoreError) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(err("key must not be empty".to_string()));
    }
    Ok(())
}

struct IteratorGuard(Arc<AtomicUsize>);

impl Drop for IteratorGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

struct TrackedIter {
    items: std::vec::IntoIter<KeyValue>,
    _guard: IteratorGuard,
}

impl Iterator for TrackedIter {
    type Item = Result<KeyValue, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(Ok)
    }
}

/// Outcome of a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitSummary {
    /// Keys written or deleted.
    pub writes: usize,
    /// Keys whose versions were validated.
    pub reads: usize,
}

/// One invocation's view of the world state.
#[derive(Debug)]
pub struct Transaction {
    world: MemoryStore,
    reads: Mutex<BTreeMap<String, u64>>,
    writes: BTreeMap<String, Option<Vec<u8>>>,
}

impl Transaction {
    /// Validate the read set and apply the write set atomically.
    pub fn commit(self) -> Result<CommitSummary, StoreError> {
        let reads = self.reads.into_inner();
        let mut state = self.world.state.write();
        for (key, read) in &reads {
            let current = state.version(key);
            if current != *read {
                return Err(StoreError::Conflict {
                    key: key.clone(),
                    read: *read,
                    current,
                });
            }
        }
        let writes = self.writes.len();
        for (key, value) in self.writes {
            state.apply(key, value);
        }
        Ok(CommitSummary {
            writes,
            reads: reads.len(),
        })
    }

    /// Discard the write set.
    pub fn rollback(self) {}
}

impl StateStore for Transaction {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(pending) = self.writes.get(key) {
            return Ok(pending.clone());
        }
        let state = self.world.state.read();
        let entry = state.entries.get(key);
        self.reads
            .lock()
            .entry(key.to_string())
            .or_insert_with(|| entry.map_or(0, |e| e.version));
        Ok(entry.map(|e| e.value.clone()))
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        check_key(key, |reason| StoreError::Write {
            key: key.to_string(),
            reason,
        })?;
        self.writes.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), StoreError> {
        check_key(key, |reason| StoreError::Delete {
            key: key.to_string(),
            reason,
        })?;
        self.writes.insert(key.to_string(), None);
        Ok(())
    }

    fn state_by_range(&self, start: &str, end: &str) -> Result<StateIter<'_>, StoreError> {
        let committed = self.world.state.read().snapshot_range(start, end)?;
        let mut merged: BTreeMap<String, Vec<u8>> = committed
            .into_iter()
            .map(|KeyValue { key, value }| (key, value))
            .collect();
        for (key, pending) in self.writes.range(range_bounds(start, end)?) {
            match pending {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        let items = merged
            .into_iter()
            .map(|(key, value)| KeyValue { key, value })
            .collect();
        Ok(self.world.tracked(items))
    }
}
