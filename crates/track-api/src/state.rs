//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Holds the world state every transaction runs
//! against, plus the runtime configuration.

use track_contract::{run_transaction, DispatchError, Function, MemoryStore, StaticIdentity};
use track_core::IdentityError;

/// Identity label used to seed the ledger when none is configured.
pub const DEFAULT_SEED_IDENTITY: &str = "admin";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Owner label for the seed assets; `None` starts with an empty ledger.
    pub seed_ledger: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            seed_ledger: None,
        }
    }
}

impl AppConfig {
    /// Build configuration from `PORT`, `TRACK_SEED_LEDGER` and
    /// `TRACK_SEED_IDENTITY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let seed = lookup("TRACK_SEED_LEDGER")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let seed_ledger = seed.then(|| {
            lookup("TRACK_SEED_IDENTITY")
                .filter(|label| !label.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SEED_IDENTITY.to_string())
        });
        Self { port, seed_ledger }
    }
}

/// Error raised while preparing the initial world state.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid seed identity: {0}")]
    Identity(#[from] IdentityError),
    #[error("seeding the ledger failed: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Shared application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub world: MemoryStore,
    pub config: AppConfig,
}

impl AppState {
    /// Empty ledger with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build state for `config`, running `InitLedger` when seeding is enabled.
    pub fn with_config(config: AppConfig) -> Result<Self, SeedError> {
        let state = Self {
            world: MemoryStore::new(),
            config,
        };
        if let Some(label) = &state.config.seed_ledger {
            let identity = StaticIdentity::from_label(label)?;
            run_transaction(
                &state.world,
                Function::InitLedger,
                serde_json::Value::Null,
                &identity,
            )?;
            tracing::info!(owner = %label, "ledger seeded");
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(config_from(&[]), AppConfig::default());
    }

    #[test]
    fn seeding_uses_configured_identity() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("TRACK_SEED_LEDGER", "true"),
            ("TRACK_SEED_IDENTITY", "org1-admin"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.seed_ledger.as_deref(), Some("org1-admin"));
    }

    #[test]
    fn seeding_falls_back_to_default_identity() {
        let config = config_from(&[("TRACK_SEED_LEDGER", "1"), ("PORT", "not-a-port")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.seed_ledger.as_deref(), Some(DEFAULT_SEED_IDENTITY));
    }

    #[test]
    fn seeded_state_holds_seed_assets() {
        let state = AppState::with_config(AppConfig {
            port: 8080,
            seed_ledger: Some("admin".to_string()),
        })
        .unwrap();
        assert_eq!(state.world.len(), 2);
        assert!(AppState::new().world.is_empty());
    }
}
