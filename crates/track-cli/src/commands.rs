//! # Ledger Subcommands
//!
//! Each subcommand becomes one contract invocation run as a transaction
//! against the snapshot loaded from `--ledger`. Submit functions rewrite the
//! snapshot when they commit; evaluate functions leave the file untouched.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::{json, Value};
use track_contract::{run_transaction, Function, FunctionKind, StaticIdentity};

use crate::snapshot;

/// Ledger subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum LedgerCommand {
    /// Seed the ledger with the sample assets, owned by the client.
    Init,

    /// Manufacture a new asset owned by the client.
    Manufacture {
        /// Asset identifier.
        id: String,
        #[arg(long, default_value = "")]
        asset_type: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        manufacturer: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Show one asset.
    Read { id: String },

    /// Hand an asset the client owns to a new owner.
    Transfer {
        id: String,
        /// Identity label of the new owner.
        new_owner: String,
    },

    /// Update location, description or attached JSON data.
    Update {
        id: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        description: String,
        /// JSON text to attach, e.g. '{"temp":4}'.
        #[arg(long, default_value = "")]
        data: String,
    },

    /// Delete an asset.
    Delete { id: String },

    /// Print whether an asset exists.
    Exists { id: String },

    /// List every asset in key order.
    List,

    /// Invoke a contract function by name with raw JSON arguments.
    Invoke {
        /// Function name, e.g. "ManufactureAsset".
        function: String,
        /// JSON arguments.
        #[arg(default_value = "null")]
        args: String,
    },
}

impl LedgerCommand {
    /// The contract function and arguments this command invokes.
    pub fn invocation(&self) -> Result<(Function, Value)> {
        let call = match self {
            Self::Init => (Function::InitLedger, Value::Null),
            Self::Manufacture {
                id,
                asset_type,
                location,
                manufacturer,
                description,
            } => (
                Function::ManufactureAsset,
                json!({
                    "id": id,
                    "assetType": asset_type,
                    "location": location,
                    "manufacturer": manufacturer,
                    "publicDescription": description,
                }),
            ),
            Self::Read { id } => (Function::ReadAsset, json!({ "id": id })),
            Self::Transfer { id, new_owner } => (
                Function::TransferAsset,
                json!({ "id": id, "newOwner": new_owner }),
            ),
            Self::Update {
                id,
                location,
                description,
                data,
            } => (
                Function::UpdateAsset,
                json!({
                    "id": id,
                    "location": location,
                    "publicDescription": description,
                    "data": data,
                }),
            ),
            Self::Delete { id } => (Function::DeleteAsset, json!({ "id": id })),
            Self::Exists { id } => (Function::AssetExists, json!({ "id": id })),
            Self::List => (Function::GetAllAssets, Value::Null),
            Self::Invoke { function, args } => {
                let function: Function = function.parse()?;
                let args = serde_json::from_str(args)
                    .with_context(|| format!("arguments for {function} are not valid JSON"))?;
                (function, args)
            }
        };
        Ok(call)
    }
}

/// Run `command` against the ledger at `ledger` as `client_id`.
///
/// Returns the function result; prints nothing.
pub fn execute(command: &LedgerCommand, ledger: &Path, client_id: Option<&str>) -> Result<Value> {
    let (function, args) = command.invocation()?;
    let identity = match client_id {
        Some(label) => StaticIdentity::from_label(label).context("invalid --client-id")?,
        None => StaticIdentity::anonymous(),
    };

    let world = snapshot::load(ledger)?;
    let invocation = run_transaction(&world, function, args, &identity)
        .with_context(|| format!("{function} failed"))?;

    if function.kind() == FunctionKind::Submit && invocation.committed.is_some() {
        snapshot::save(ledger, &world)?;
        tracing::info!(%function, ledger = %ledger.display(), "ledger updated");
    }
    Ok(invocation.result)
}

/// Run `command` and print its result. Returns the process exit code.
pub fn run_ledger(command: &LedgerCommand, ledger: &Path, client_id: Option<&str>) -> Result<u8> {
    let result = execute(command, ledger, client_id)?;
    match (command, &result) {
        (LedgerCommand::Exists { .. }, Value::Bool(exists)) => println!("{exists}"),
        (LedgerCommand::Transfer { .. }, Value::String(previous)) => {
            println!("OK: transferred from {previous}")
        }
        (_, Value::Null) => println!("OK"),
        (_, value) => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(0)
}
