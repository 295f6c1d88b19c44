//! # Keyed State Store
//!
//! The narrow world-state interface the contract consumes. Keys are UTF-8
//! strings, values opaque bytes. A range scan with an empty start and an
//! empty end covers the whole namespace; otherwise `start` is inclusive and
//! `end` exclusive, iterated in lexicographic key order.
//!
//! Iterators own whatever resource backs the scan and release it on drop,
//! so every exit path of a consumer (exhaustion, early return, `?`) closes
//! the scan.

use track_core::StoreError;

/// One entry produced by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// Lazy range-scan iterator. Dropping it closes the scan.
pub type StateIter<'a> = Box<dyn Iterator<Item = Result<KeyValue, StoreError>> + Send + 'a>;

/// Transactional key-value world state.
pub trait StateStore {
    /// Read the value at `key`, `None` when absent.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` at `key`, replacing any previous value.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error at this layer.
    fn del_state(&mut self, key: &str) -> Result<(), StoreError>;

    /// Scan `[start, end)` in key order. Empty bounds are open.
    fn state_by_range(&self, start: &str, end: &str) -> Result<StateIter<'_>, StoreError>;
}

impl<S: StateStore + ?Sized> StateStore for &mut S {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get_state(key)
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put_state(key, value)
    }

    fn del_state(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).del_state(key)
    }

    fn state_by_range(&self, start: &str, end: &str) -> Result<StateIter<'_>, StoreError> {
        (**self).state_by_range(start, end)
    }
}

/// Convert a `(start, end)` pair into BTreeMap range bounds.
///
/// Returns an error when both bounds are set and `start > end`.
pub(crate) fn range_bounds(
    start: &str,
    end: &str,
) -> Result<(std::ops::Bound<String>, std::ops::Bound<String>), StoreError> {
    use std::ops::Bound;

    if !start.is_empty() && !end.is_empty() && start > end {
        return Err(StoreError::Scan {
            start: start.to_string(),
            end: end.to_string(),
            reason: "start key sorts after end key".to_string(),
        });
    }
    let lower = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start.to_string())
    };
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end.to_string())
    };
    Ok((lower, upper))
}
