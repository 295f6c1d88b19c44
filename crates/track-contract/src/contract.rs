//! # Asset Ledger Contract
//!
//! The asset state-transition logic. Every operation is a single synchronous
//! pass: read if needed, validate, then write or return a projection. All
//! validation happens before the first write, so a failed operation never
//! leaves a partial update in the write set.
//!
//! ## Operations
//!
//! | Operation            | Reads | Writes | Authorization            |
//! |----------------------|-------|--------|--------------------------|
//! | `init_ledger`        | yes   | seeds  | caller becomes owner     |
//! | `manufacture_asset`  | yes   | 1 put  | caller becomes owner     |
//! | `read_asset`         | yes   | —      | —                        |
//! | `transfer_asset`     | yes   | 1 put  | caller must be owner     |
//! | `update_asset`       | yes   | 1 put  | —                        |
//! | `delete_asset`       | yes   | 1 del  | —                        |
//! | `asset_exists`       | yes   | —      | —                        |
//! | `list_all_assets`    | scan  | —      | —                        |
//!
//! Manufacture and transfer check existence before resolving the caller, so
//! `AlreadyExists`/`NotFound` win over `IdentityUnavailable`. Transfer then
//! checks ownership, so an unauthorized caller can tell a missing asset
//! (`NotFound`) from someone else's (`Unauthorized`).

use track_core::{Asset, AssetData, CallerId, ContractError};

use crate::identity::{resolve_caller_identity, ClientIdentity};
use crate::query::{AssetIter, QueryResult};
use crate::request::{ManufactureAssetRequest, TransferAssetRequest, UpdateAssetRequest};
use crate::store::StateStore;

/// Ids of the assets created by [`AssetContract::init_ledger`].
pub const SEED_ASSET_IDS: [&str; 2] = ["asset1", "asset2"];

/// The asset ledger contract bound to one invocation's state view.
#[derive(Debug)]
pub struct AssetContract<S> {
    store: S,
}

impl<S: StateStore> AssetContract<S> {
    /// Bind the contract to a state store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Release the underlying store, e.g. to commit it.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Seed the ledger with a fixed set of assets owned by the caller.
    pub fn init_ledger<I>(&mut self, identity: &I) -> Result<(), ContractError>
    where
        I: ClientIdentity + ?Sized,
    {
        let owner = resolve_caller_identity(identity)?;
        let seeds = [
            ManufactureAssetRequest {
                id: SEED_ASSET_IDS[0].to_string(),
                asset_type: String::new(),
                location: "27.1,78.5".to_string(),
                manufacturer: "user 2".to_string(),
                public_description: String::new(),
            },
            ManufactureAssetRequest {
                id: SEED_ASSET_IDS[1].to_string(),
                asset_type: String::new(),
                location: "27.1,78.5".to_string(),
                manufacturer: "user 1".to_string(),
                public_description: String::new(),
            },
        ];
        for seed in seeds {
            self.check_new_id(&seed.id)?;
            self.write_manufactured(&owner, seed)?;
        }
        tracing::info!(owner = %owner, count = SEED_ASSET_IDS.len(), "ledger initialized");
        Ok(())
    }

    /// Create a new asset owned by the submitting client.
    pub fn manufacture_asset<I>(
        &mut self,
        identity: &I,
        request: ManufactureAssetRequest,
    ) -> Result<(), ContractError>
    where
        I: ClientIdentity + ?Sized,
    {
        self.check_new_id(&request.id)?;
        let owner = resolve_caller_identity(identity)?;
        self.write_manufactured(&owner, request)
    }

    fn check_new_id(&self, id: &str) -> Result<(), ContractError> {
        if id.is_empty() {
            return Err(ContractError::InvalidRequest {
                id: id.to_string(),
                reason: "asset id must not be empty".to_string(),
            });
        }
        if self.asset_exists(id)? {
            return Err(ContractError::AlreadyExists { id: id.to_string() });
        }
        Ok(())
    }

    fn write_manufactured(
        &mut self,
        caller: &CallerId,
        request: ManufactureAssetRequest,
    ) -> Result<(), ContractError> {
        let asset = Asset::manufactured(
            request.id,
            request.asset_type,
            request.location,
            request.manufacturer,
            request.public_description,
            caller,
        );
        self.put_asset(&asset)?;
        tracing::info!(asset_id = %asset.id, owner = %caller, "asset manufactured");
        Ok(())
    }

    /// Read the asset stored at `id`.
    pub fn read_asset(&self, id: &str) -> Result<Asset, ContractError> {
        let bytes = self
            .store
            .get_state(id)?
            .ok_or_else(|| ContractError::NotFound { id: id.to_string() })?;
        let asset = Asset::from_bytes(&bytes).map_err(|source| ContractError::Decode {
            key: id.to_string(),
            source,
        })?;
        tracing::debug!(asset_id = %id, "asset read");
        Ok(asset)
    }

    /// Hand the asset over to `request.new_owner`, returning the previous owner.
    ///
    /// Only the owner changes; the other descriptive fields of the request
    /// are ignored.
    pub fn transfer_asset<I>(
        &mut self,
        identity: &I,
        request: TransferAssetRequest,
    ) -> Result<String, ContractError>
    where
        I: ClientIdentity + ?Sized,
    {
        let mut asset = self.read_asset(&request.id)?;
        let caller = resolve_caller_identity(identity)?;
        if !caller.is(&asset.owner) {
            tracing::warn!(
                asset_id = %request.id,
                caller = %caller,
                "transfer rejected: caller is not the owner"
            );
            return Err(ContractError::Unauthorized {
                id: request.id,
                caller: caller.to_string(),
            });
        }

        let previous_owner = std::mem::replace(&mut asset.owner, request.new_owner);
        self.put_asset(&asset)?;
        tracing::info!(
            asset_id = %asset.id,
            from = %previous_owner,
            to = %asset.owner,
            "asset transferred"
        );
        Ok(previous_owner)
    }

    /// Overwrite the supplied (non-empty) fields of an existing asset.
    ///
    /// Checks run in order: existence, at least one field supplied, JSON
    /// validity of `data`. The record is replaced in a single write only
    /// after all of them pass.
    pub fn update_asset(&mut self, request: UpdateAssetRequest) -> Result<(), ContractError> {
        let mut asset = self.read_asset(&request.id)?;
        if request.is_empty() {
            return Err(ContractError::InvalidRequest {
                id: request.id,
                reason: "at least one of location, publicDescription or data is required"
                    .to_string(),
            });
        }
        let data = if request.data.is_empty() {
            None
        } else {
            let parsed = AssetData::parse(&request.data).map_err(|source| {
                ContractError::InvalidData {
                    id: request.id.clone(),
                    source,
                }
            })?;
            Some(parsed)
        };

        if !request.location.is_empty() {
            asset.location = request.location;
        }
        if !request.public_description.is_empty() {
            asset.public_description = request.public_description;
        }
        if let Some(data) = data {
            asset.data = data;
        }
        self.put_asset(&asset)?;
        tracing::info!(asset_id = %asset.id, "asset updated");
        Ok(())
    }

    /// Remove the asset at `id`.
    pub fn delete_asset(&mut self, id: &str) -> Result<(), ContractError> {
        if !self.asset_exists(id)? {
            return Err(ContractError::NotFound { id: id.to_string() });
        }
        self.store.del_state(id)?;
        tracing::info!(asset_id = %id, "asset deleted");
        Ok(())
    }

    /// Whether a record exists at `id`.
    pub fn asset_exists(&self, id: &str) -> Result<bool, ContractError> {
        Ok(self.store.get_state(id)?.is_some())
    }

    /// Lazily enumerate every record in the namespace, in key order.
    ///
    /// Each call starts a fresh scan.
    pub fn list_all_assets(&self) -> Result<AssetIter<'_>, ContractError> {
        let scan = self.store.state_by_range("", "")?;
        Ok(AssetIter::new(scan))
    }

    /// Collect the full listing. Any undecodable record fails the whole call.
    pub fn get_all_assets(&self) -> Result<Vec<QueryResult>, ContractError> {
        let results = self.list_all_assets()?.collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = results.len(), "assets listed");
        Ok(results)
    }

    fn put_asset(&mut self, asset: &Asset) -> Result<(), ContractError> {
        let bytes = asset.to_bytes().map_err(|source| ContractError::Encode {
            id: asset.id.clone(),
            source,
        })?;
        self.store.put_state(&asset.id, bytes)?;
        Ok(())
    }
}
