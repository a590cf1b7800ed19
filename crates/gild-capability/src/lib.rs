//! Capability authority for the Gild engine
//!
//! Privileged operations are gated by possession of a capability token
//! rather than by a permissions table. A token carries the identity of the
//! one target it was minted for; verification is a pure equality check
//! between the token's stored link and the target aggregate.
//!
//! Tokens are deliberately neither `Clone` nor `Serialize`: within the
//! process they can change hands but cannot be duplicated, and a consumed
//! token is gone. Minting is the trusted surface: only engine operations
//! create tokens.

mod authority;
mod token;

pub use authority::{mint_job_cap, mint_profile_update_cap, verify_job_cap};
pub use token::{JobCap, ProfileUpdateCap};
