//! # Ledger Snapshot File
//!
//! The CLI keeps the world state between runs as a JSON document mapping
//! each key to its stored record:
//!
//! ```json
//! { "entries": { "asset1": { "docType": "org.asset", "id": "asset1", ... } } }
//! ```
//!
//! A missing file is an empty ledger. Saving writes a sibling temp file and
//! renames it over the original so a crash never leaves a truncated ledger.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use track_contract::{KeyValue, MemoryStore};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    entries: BTreeMap<String, serde_json::Value>,
}

/// Load the world state stored at `path`.
pub fn load(path: &Path) -> Result<MemoryStore> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no ledger file; starting empty");
        return Ok(MemoryStore::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read ledger {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&content)
        .with_context(|| format!("ledger {} is not a valid snapshot", path.display()))?;

    let entries = snapshot
        .entries
        .into_iter()
        .map(|(key, value)| -> Result<KeyValue> {
            let value = serde_json::to_vec(&value)
                .with_context(|| format!("failed to encode entry {key}"))?;
            Ok(KeyValue { key, value })
        })
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "ledger loaded");
    Ok(MemoryStore::from_entries(entries))
}

/// Persist the world state to `path`.
pub fn save(path: &Path, world: &MemoryStore) -> Result<()> {
    let mut snapshot = Snapshot::default();
    for KeyValue { key, value } in world.entries() {
        let record = serde_json::from_slice(&value)
            .with_context(|| format!("entry {key} does not hold a JSON record"))?;
        snapshot.entries.insert(key, record);
    }

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(&snapshot)?;
    let staging = path.with_extension("json.tmp");
    std::fs::write(&staging, json)
        .with_context(|| format!("failed to write {}", staging.display()))?;
    std::fs::rename(&staging, path)
        .with_context(|| format!("failed to replace ledger {}", path.display()))?;
    tracing::debug!(path = %path.display(), entries = snapshot.entries.len(), "ledger saved");
    Ok(())
}
