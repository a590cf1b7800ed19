//! Shared value types used across the Gild engine

pub mod blob;
pub mod funds;
pub mod identifiers;
pub mod time;
