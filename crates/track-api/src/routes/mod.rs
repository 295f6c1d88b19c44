//! # API Route Modules
//!
//! - `transactions` — submit or evaluate contract functions by name, and
//!   list the functions the contract exposes.

pub mod transactions;
