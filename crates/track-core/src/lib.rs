//! # track-core — Foundational Types for Asset Tracking
//!
//! This crate is the leaf of the workspace. It defines the asset record that
//! lives in world state and the primitives every other crate builds on.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One persisted entity.** [`Asset`] is the only record the contract
//!    writes. Its JSON serialization is both the stored value and the
//!    response body.
//!
//! 2. **Closed lifecycle enums.** [`AssetStatus`] and [`AssetCondition`] are
//!    tagged enums with an exhaustive mapping to their wire strings. There is
//!    no "unknown" variant; an unrecognised string fails to decode.
//!
//! 3. **Validated payloads.** [`AssetData`] can only hold empty or
//!    syntactically valid JSON text, both when built from a request and when
//!    decoded from state.
//!
//! 4. **Explicit caller identity.** [`CallerId`] is produced once per
//!    invocation by decoding the host's transport encoding. Authorization is
//!    equality against it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `track-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod asset;
pub mod data;
pub mod error;
pub mod identity;
pub mod status;

// Re-export primary types for ergonomic imports.
pub use asset::{Asset, DOC_TYPE_ASSET};
pub use data::AssetData;
pub use error::{ContractError, ErrorKind, IdentityError, StoreError};
pub use identity::CallerId;
pub use status::{AssetCondition, AssetStatus, UnknownVariant};
