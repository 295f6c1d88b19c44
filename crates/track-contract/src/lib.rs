//! # track-contract — Asset Ledger Contract
//!
//! Validates and applies asset operations against a pluggable keyed state
//! store, enforcing owner-based authorization and data invariants.
//!
//! ## Control Flow
//!
//! ```text
//! host ──▶ run_transaction ──▶ Transaction (write set)
//!                │                  │
//!                ▼                  ▼
//!        resolve caller ──▶ AssetContract op: read ─▶ validate ─▶ write
//!                                   │
//!                                   ▼
//!                      commit (submit) / discard (evaluate, error)
//! ```
//!
//! ## Collaborators
//!
//! - [`StateStore`] — `get` / `put` / `delete` / range scan. The contract
//!   never locks, caches or retries; atomicity of one invocation's writes is
//!   the host's job.
//! - [`ClientIdentity`] — transport-encoded id of the submitter, decoded once
//!   per invocation into a [`track_core::CallerId`] and passed explicitly to
//!   the operations that authorize.
//!
//! [`MemoryStore`] is the in-process world state used by the HTTP host, the
//! CLI and the tests.

pub mod contract;
pub mod dispatch;
pub mod identity;
pub mod memory;
pub mod query;
pub mod request;
pub mod store;

pub use contract::{AssetContract, SEED_ASSET_IDS};
pub use dispatch::{
    function_catalog, invoke, run_transaction, DispatchError, Function, FunctionInfo,
    FunctionKind, Invocation,
};
pub use identity::{resolve_caller_identity, ClientIdentity, StaticIdentity};
pub use memory::{CommitSummary, MemoryStore, Transaction};
pub use query::{AssetIter, QueryResult};
pub use request::{AssetIdRequest, ManufactureAssetRequest, TransferAssetRequest, UpdateAssetRequest};
pub use store::{KeyValue, StateIter, StateStore};
