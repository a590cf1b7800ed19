//! Pluggable reputation policy
//!
//! What triggers a rating and who submits it is platform policy, not engine
//! mechanics. The engine's contract: at job completion it asks the
//! configured hook for an optional client-side rating of the freelancer,
//! validates it against the configured range, and folds it into the
//! freelancer profile it already holds address-verified. The hook never
//! receives mutable access to either record.

use gild_core::{Address, JobId};

/// A rating produced by a reputation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingSubmission {
    /// The submitted rating value
    pub rating: u64,
}

/// Completion-time reputation policy
pub trait ReputationHook {
    /// Rating the client submits for the freelancer on completion, if any
    fn rating_for_completion(
        &self,
        job: JobId,
        client: Address,
        freelancer: Address,
    ) -> Option<RatingSubmission>;
}

/// Default policy: completion itself submits no rating
///
/// Ratings then only enter through explicit `add_rating` calls made by the
/// platform with the ratee's record in hand.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAutoRating;

impl ReputationHook for NoAutoRating {
    fn rating_for_completion(
        &self,
        _job: JobId,
        _client: Address,
        _freelancer: Address,
    ) -> Option<RatingSubmission> {
        None
    }
}
