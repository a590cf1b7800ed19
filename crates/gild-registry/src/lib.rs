//! Identity registry for the Gild engine
//!
//! Each party holds exactly one [`Profile`], exclusively owned by its
//! address. The engine never mutates a profile it cannot prove, by address
//! match, is owned by the invoking party or sanctioned by a consumed bridge
//! capability. The [`IdentityRegistry`] is the explicit cross-identity
//! lookup table, passed by reference rather than held as global state.

mod profile;
mod registry;
mod reputation;

pub use profile::{Profile, Role};
pub use registry::{create_profile, IdentityRegistry, RegisteredIdentity};
pub use reputation::{NoAutoRating, RatingSubmission, ReputationHook};
