//! # track-cli — Command-Line Host for the Asset Ledger
//!
//! Provides the `track` command. The world state lives in a JSON snapshot
//! file (`--ledger`, default `ledger.json`); the caller identity is a plain
//! label (`--client-id`) that the CLI transport-encodes the way a network
//! host would.
//!
//! ```bash
//! track --client-id alice init
//! track --client-id alice manufacture pallet-7 --location 27.1,78.5
//! track --client-id alice transfer pallet-7 bob
//! track update pallet-7 --data '{"temp":4}'
//! track list
//! track invoke ReadAsset '{"id":"pallet-7"}'
//! ```

pub mod commands;
pub mod snapshot;

/// Default ledger snapshot path.
pub const DEFAULT_LEDGER: &str = "ledger.json";
