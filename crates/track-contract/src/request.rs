//! # Request Payloads
//!
//! Argument shapes for the contract operations, deserialized from the JSON
//! arguments of a transaction. Field names are camelCase on the wire.
//! Optional string fields default to empty, and empty means "not supplied".

use serde::{Deserialize, Serialize};

/// Arguments naming a single asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIdRequest {
    pub id: String,
}

/// Arguments of `ManufactureAsset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufactureAssetRequest {
    pub id: String,
    pub asset_type: String,
    pub location: String,
    pub manufacturer: String,
    #[serde(default)]
    pub public_description: String,
}

/// Arguments of `TransferAsset`.
///
/// `asset_type`, `location` and `manufacturer` are accepted for
/// compatibility with existing clients but never applied: a transfer changes
/// the owner and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferAssetRequest {
    pub id: String,
    #[serde(default)]
    pub asset_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub manufacturer: String,
    pub new_owner: String,
}

impl TransferAssetRequest {
    /// A transfer carrying only the fields that take effect.
    pub fn new(id: impl Into<String>, new_owner: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            asset_type: String::new(),
            location: String::new(),
            manufacturer: String::new(),
            new_owner: new_owner.into(),
        }
    }
}

/// Arguments of `UpdateAsset`. At least one of the optional fields must be
/// non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetRequest {
    pub id: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub public_description: String,
    /// Raw JSON text to attach.
    #[serde(default)]
    pub data: String,
}

impl UpdateAssetRequest {
    /// Whether every optional field was left empty.
    pub fn is_empty(&self) -> bool {
        self.location.is_empty() && self.public_description.is_empty() && self.data.is_empty()
    }
}
