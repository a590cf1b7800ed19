//! Core types for the Gild job-escrow engine
//!
//! This crate provides the foundation shared by every other Gild crate:
//! identifier newtypes, fund-custody primitives, the unified error taxonomy,
//! and engine configuration.
//!
//! # Architecture
//!
//! - **Identifiers**: party addresses and aggregate ids as typed wrappers
//! - **Funds**: move-only custody values, wallets, and single-settle payouts
//! - **Errors**: one `EscrowError` enum covering every operation failure
//! - **Configuration**: rating bounds and TOML loading

pub mod config;
pub mod errors;
pub mod types;

pub use config::{ConfigError, EngineConfig};
pub use errors::{EscrowError, Result};
pub use types::blob::BlobPtr;
pub use types::funds::{Amount, Funds, Payout, Wallet};
pub use types::identifiers::{Address, CapabilityId, JobId, MilestoneSeq};
pub use types::time::Timestamp;
