//! # Ledger Enumeration
//!
//! [`AssetIter`] decodes a range scan lazily. It holds the scan for as long
//! as it is alive and drops it as soon as the scan is exhausted or fails, so
//! the underlying resource is released on every exit path. After the first
//! error the iterator is fused: a listing never yields partial results past
//! a bad record.

use serde::{Deserialize, Serialize};
use track_core::{Asset, ContractError};

use crate::store::StateIter;

/// One decoded ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: Asset,
}

/// Lazy, single-pass iterator over decoded assets in key order.
pub struct AssetIter<'a> {
    scan: Option<StateIter<'a>>,
}

impl<'a> AssetIter<'a> {
    pub(crate) fn new(scan: StateIter<'a>) -> Self {
        Self { scan: Some(scan) }
    }

    /// Release the scan without consuming the rest of it.
    pub fn close(&mut self) {
        self.scan = None;
    }

    /// Whether the scan has been released.
    pub fn is_closed(&self) -> bool {
        self.scan.is_none()
    }
}

impl Iterator for AssetIter<'_> {
    type Item = Result<QueryResult, ContractError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.scan.as_mut()?.next();
        let result = match item {
            None => {
                self.close();
                return None;
            }
            Some(Err(err)) => Err(ContractError::Store(err)),
            Some(Ok(entry)) => Asset::from_bytes(&entry.value)
                .map(|record| QueryResult {
                    key: entry.key.clone(),
                    record,
                })
                .map_err(|source| ContractError::Decode {
                    key: entry.key,
                    source,
                }),
        };
        if result.is_err() {
            self.close();
        }
        Some(result)
    }
}

impl std::iter::FusedIterator for AssetIter<'_> {}

impl std::fmt::Debug for AssetIter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetIter")
            .field("closed", &self.is_closed())
            .finish()
    }
}
