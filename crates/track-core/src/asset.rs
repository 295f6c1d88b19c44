//! # Asset Record
//!
//! The only entity persisted by the contract. Stored under its `id` as the
//! JSON serialization below, which is also the shape returned to callers:
//!
//! ```json
//! {
//!   "docType": "org.asset",
//!   "id": "asset1",
//!   "assetType": "pallet",
//!   "owner": "x509::CN=alice",
//!   "currentState": "available",
//!   "location": "27.1,78.5",
//!   "manufacturer": "user 2",
//!   "publicDescription": "",
//!   "data": "{\"temp\":4}"
//! }
//! ```
//!
//! `data` is omitted when empty.

use serde::{Deserialize, Serialize};

use crate::data::AssetData;
use crate::identity::CallerId;
use crate::status::AssetStatus;

/// Discriminator carried by every asset record.
pub const DOC_TYPE_ASSET: &str = "org.asset";

/// A tracked physical asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Entity discriminator, always [`DOC_TYPE_ASSET`] for records we write.
    pub doc_type: String,
    /// Caller-supplied unique identifier; also the world-state key.
    pub id: String,
    pub asset_type: String,
    /// Identity label of the current owner.
    pub owner: String,
    pub current_state: AssetStatus,
    /// Current location, typically `"lat,long"`.
    pub location: String,
    pub manufacturer: String,
    pub public_description: String,
    /// Attached payload; empty or valid JSON.
    #[serde(default, skip_serializing_if = "AssetData::is_empty")]
    pub data: AssetData,
}

impl Asset {
    /// Build a freshly manufactured asset owned by `owner`.
    ///
    /// The record starts `Available` with no attached data.
    pub fn manufactured(
        id: impl Into<String>,
        asset_type: impl Into<String>,
        location: impl Into<String>,
        manufacturer: impl Into<String>,
        public_description: impl Into<String>,
        owner: &CallerId,
    ) -> Self {
        Self {
            doc_type: DOC_TYPE_ASSET.to_string(),
            id: id.into(),
            asset_type: asset_type.into(),
            owner: owner.as_str().to_string(),
            current_state: AssetStatus::Available,
            location: location.into(),
            manufacturer: manufacturer.into(),
            public_description: public_description.into(),
            data: AssetData::empty(),
        }
    }

    /// Encode to the stored JSON representation.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode from the stored JSON representation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
