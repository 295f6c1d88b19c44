//! # Transaction Dispatch
//!
//! The generic entry point hosts use to invoke the contract by function
//! name with JSON arguments. Functions are either *submit* transactions,
//! whose write set is committed on success, or *evaluate* transactions,
//! which are read-only and never committed.
//!
//! The caller identity is resolved once per invocation, and only for the
//! functions that authorize or assign ownership.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use track_core::ContractError;

use crate::contract::AssetContract;
use crate::identity::ClientIdentity;
use crate::memory::{CommitSummary, MemoryStore};
use crate::request::{
    AssetIdRequest, ManufactureAssetRequest, TransferAssetRequest, UpdateAssetRequest,
};
use crate::store::StateStore;

/// Whether a function may write to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    /// Writes are committed on success.
    Submit,
    /// Read-only; never committed.
    Evaluate,
}

/// A contract function addressable through dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    InitLedger,
    ManufactureAsset,
    ReadAsset,
    TransferAsset,
    UpdateAsset,
    DeleteAsset,
    AssetExists,
    GetAllAssets,
}

impl Function {
    /// Every dispatchable function.
    pub const ALL: [Function; 8] = [
        Self::InitLedger,
        Self::ManufactureAsset,
        Self::ReadAsset,
        Self::TransferAsset,
        Self::UpdateAsset,
        Self::DeleteAsset,
        Self::AssetExists,
        Self::GetAllAssets,
    ];

    /// Canonical function name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitLedger => "InitLedger",
            Self::ManufactureAsset => "ManufactureAsset",
            Self::ReadAsset => "ReadAsset",
            Self::TransferAsset => "TransferAsset",
            Self::UpdateAsset => "UpdateAsset",
            Self::DeleteAsset => "DeleteAsset",
            Self::AssetExists => "AssetExists",
            Self::GetAllAssets => "GetAllAssets",
        }
    }

    pub fn kind(&self) -> FunctionKind {
        match self {
            Self::ReadAsset | Self::AssetExists | Self::GetAllAssets => FunctionKind::Evaluate,
            Self::InitLedger
            | Self::ManufactureAsset
            | Self::TransferAsset
            | Self::UpdateAsset
            | Self::DeleteAsset => FunctionKind::Submit,
        }
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Function {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manufacture" => return Ok(Self::ManufactureAsset),
            "ListAllAssets" => return Ok(Self::GetAllAssets),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|function| function.name() == s)
            .ok_or_else(|| DispatchError::UnknownFunction(s.to_string()))
    }
}

/// Catalog entry describing one function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionInfo {
    pub name: &'static str,
    pub kind: FunctionKind,
}

/// Every dispatchable function with its kind.
pub fn function_catalog() -> Vec<FunctionInfo> {
    Function::ALL
        .into_iter()
        .map(|function| FunctionInfo {
            name: function.name(),
            kind: function.kind(),
        })
        .collect()
}

/// Error raised while dispatching a transaction.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("unknown contract function {0:?}")]
    UnknownFunction(String),

    #[error("invalid arguments for {function}: {source}")]
    InvalidArguments {
        function: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("failed to encode result of {function}: {source}")]
    Response {
        function: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of [`run_transaction`].
#[derive(Debug, Clone)]
pub struct Invocation {
    pub function: Function,
    pub result: Value,
    /// Present for committed submit transactions.
    pub committed: Option<CommitSummary>,
}

/// Invoke `function` on `contract` with JSON `args`.
///
/// Does not commit; the caller owns the store and decides.
pub fn invoke<S, I>(
    contract: &mut AssetContract<S>,
    function: Function,
    args: Value,
    identity: &I,
) -> Result<Value, DispatchError>
where
    S: StateStore,
    I: ClientIdentity + ?Sized,
{
    let name = function.name();
    match function {
        Function::InitLedger => {
            contract.init_ledger(identity)?;
            Ok(Value::Null)
        }
        Function::ManufactureAsset => {
            let request: ManufactureAssetRequest = parse_args(name, args)?;
            contract.manufacture_asset(identity, request)?;
            Ok(Value::Null)
        }
        Function::ReadAsset => {
            let AssetIdRequest { id } = parse_args(name, args)?;
            encode(name, &contract.read_asset(&id)?)
        }
        Function::TransferAsset => {
            let request: TransferAssetRequest = parse_args(name, args)?;
            Ok(Value::String(contract.transfer_asset(identity, request)?))
        }
        Function::UpdateAsset => {
            let request: UpdateAssetRequest = parse_args(name, args)?;
            contract.update_asset(request)?;
            Ok(Value::Null)
        }
        Function::DeleteAsset => {
            let AssetIdRequest { id } = parse_args(name, args)?;
            contract.delete_asset(&id)?;
            Ok(Value::Null)
        }
        Function::AssetExists => {
            let AssetIdRequest { id } = parse_args(name, args)?;
            Ok(Value::Bool(contract.asset_exists(&id)?))
        }
        Function::GetAllAssets => encode(name, &contract.get_all_assets()?),
    }
}

/// Run one invocation as a transaction against `world`.
///
/// Submit functions commit their write set only when the function succeeds;
/// evaluate functions and failures discard it.
pub fn run_transaction<I>(
    world: &MemoryStore,
    function: Function,
    args: Value,
    identity: &I,
) -> Result<Invocation, DispatchError>
where
    I: ClientIdentity + ?Sized,
{
    let span = tracing::info_span!("transaction", function = function.name());
    let _enter = span.enter();

    let mut contract = AssetContract::new(world.begin());
    let result = match invoke(&mut contract, function, args, identity) {
        Ok(result) => result,
        Err(err) => {
            tracing::debug!(error = %err, "transaction failed; write set discarded");
            return Err(err);
        }
    };

    let tx = contract.into_store();
    let committed = match function.kind() {
        FunctionKind::Evaluate => {
            tx.rollback();
            None
        }
        FunctionKind::Submit => {
            let summary = tx.commit().map_err(ContractError::from)?;
            tracing::debug!(writes = summary.writes, "transaction committed");
            Some(summary)
        }
    };

    Ok(Invocation {
        function,
        result,
        committed,
    })
}

fn parse_args<T: DeserializeOwned>(function: &'static str, args: Value) -> Result<T, DispatchError> {
    serde_json::from_value(args).map_err(|source| DispatchError::InvalidArguments { function, source })
}

fn encode<T: Serialize>(function: &'static str, value: &T) -> Result<Value, DispatchError> {
    serde_json::to_value(value).map_err(|source| DispatchError::Response { function, source })
}
