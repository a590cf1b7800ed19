//! The contract-call surface of the engine
//!
//! Each operation validates capability, ownership, lifecycle state, and
//! fund invariants before its first mutation, so a failure is always an
//! atomic abort. Exactly one event is emitted per state transition; an
//! operation that transitions more than one aggregate (final approval,
//! bridge consumption) emits one event per transition.
//!
//! Profile arguments are always the caller's own record, proven by address
//! match. The one deliberate exception: operations that settle funds or
//! close an engagement accept the freelancer's record verified against the
//! job's stored freelancer address. The client-side assignment never
//! touches the freelancer's profile at all; the two-phase
//! `ProfileUpdateCap` bridge covers that gap.

use crate::board::JobBoard;
use crate::job::{Application, Job, JobState};
use gild_capability::{mint_job_cap, mint_profile_update_cap, verify_job_cap, JobCap};
use gild_core::{
    Address, Amount, BlobPtr, EngineConfig, EscrowError, JobId, MilestoneSeq, Payout, Result,
    Timestamp, Wallet,
};
use gild_events::{EventKind, EventLog};
use gild_registry::{IdentityRegistry, Profile, ReputationHook};

/// What a milestone approval produced
#[derive(Debug)]
pub struct ApprovalOutcome {
    /// Released tranche, bound to the freelancer
    pub payout: Payout,
    /// Unplanned escrow remainder refunded to the client when the job
    /// completed with `planned total < budget`
    pub refund: Option<Payout>,
    /// True when this approval completed the job
    pub completed: bool,
}

/// Create a job, escrowing its budget atomically
///
/// The budget is withdrawn from the caller's own wallet; the minted
/// [`JobCap`] is the durable proof of client authority over the new job.
#[allow(clippy::too_many_arguments)]
pub fn create_job(
    board: &mut JobBoard,
    caller: Address,
    client_profile: &mut Profile,
    wallet: &mut Wallet,
    title: impl Into<String>,
    description: BlobPtr,
    budget: Amount,
    deadline: Timestamp,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<(JobId, JobCap)> {
    client_profile.ensure_owned_by(caller)?;
    if wallet.owner() != caller {
        return Err(EscrowError::unauthorized(format!(
            "wallet owned by {} presented by {caller}",
            wallet.owner()
        )));
    }
    if !deadline.is_after(now) {
        return Err(EscrowError::InvalidDeadline {
            deadline: deadline.millis(),
            now: now.millis(),
        });
    }

    let deposit = wallet.withdraw(budget)?;
    let job = Job::new(
        caller,
        title.into(),
        description,
        gild_ledger::Escrow::fund(deposit),
        now,
        deadline,
    );
    let id = job.id();
    let cap = mint_job_cap(id);

    client_profile.increment_total_jobs();
    client_profile.add_active_job(id);
    board.insert(job);

    tracing::info!(job = %id, client = %caller, budget = %budget, "job created");
    events.emit(
        EventKind::JobCreated {
            job: id,
            client: caller,
            budget,
            deadline,
        },
        now,
    );
    Ok((id, cap))
}

/// Apply to an open job
///
/// Mints the single-use profile-update bridge and stores it in the
/// applicant entry; the applicant's own profile is read-only here.
pub fn apply_for_job(
    job: &mut Job,
    caller: Address,
    applicant_profile: &Profile,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<()> {
    applicant_profile.ensure_owned_by(caller)?;
    job.ensure_state(&[JobState::Open])?;
    if caller == job.client {
        return Err(EscrowError::SelfApplication);
    }
    if job.has_applicant(caller) {
        return Err(EscrowError::DuplicateApplication {
            applicant: caller.to_string(),
        });
    }

    let update_cap = mint_profile_update_cap(job.id, caller);
    job.applicants.insert(
        caller,
        Application {
            applicant: caller,
            applied_at: now,
            update_cap: Some(update_cap),
        },
    );

    events.emit(
        EventKind::JobApplied {
            job: job.id,
            applicant: caller,
        },
        now,
    );
    Ok(())
}

/// Select a freelancer from the applicant set
///
/// Deliberately takes no reference to the freelancer's profile; the
/// client does not own it. The registry proves the address belongs to a
/// registered identity; the applicant set proves it applied.
pub fn assign_freelancer(
    job: &mut Job,
    caller: Address,
    job_cap: &JobCap,
    registry: &IdentityRegistry,
    freelancer: Address,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<()> {
    verify_job_cap(job_cap, job.id)?;
    job.ensure_client(caller)?;
    job.ensure_state(&[JobState::Open])?;
    if !registry.is_registered(freelancer) || !job.has_applicant(freelancer) {
        return Err(EscrowError::NotAnApplicant {
            address: freelancer.to_string(),
        });
    }

    job.freelancer = Some(freelancer);
    job.state = JobState::Assigned;

    tracing::info!(job = %job.id, freelancer = %freelancer, "freelancer assigned");
    events.emit(
        EventKind::FreelancerAssigned {
            job: job.id,
            client: caller,
            freelancer,
        },
        now,
    );
    Ok(())
}

/// Confirm the assignment and begin work
///
/// The freelancer presents their own profile; the stored bridge capability
/// minted at application time is consumed here, sanctioning the profile
/// mutation without the client ever having touched the record.
pub fn start_job(
    job: &mut Job,
    caller: Address,
    freelancer_profile: &mut Profile,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<()> {
    job.ensure_state(&[JobState::Assigned])?;
    job.ensure_freelancer(caller)?;
    freelancer_profile.ensure_owned_by(caller)?;

    let entry = job.applicants.get_mut(&caller).ok_or_else(|| {
        EscrowError::missing_capability(format!("no application entry for {caller}"))
    })?;
    if entry.update_cap.is_none() {
        return Err(EscrowError::missing_capability(
            "profile update capability already consumed",
        ));
    }

    // consume the bridge; the mint bound it to exactly this (job, applicant)
    let cap = entry.update_cap.take();
    debug_assert!(cap.as_ref().is_some_and(|c| c.authorizes(job.id, caller)));
    drop(cap);

    freelancer_profile.increment_total_jobs();
    freelancer_profile.add_active_job(job.id);
    job.state = JobState::InProgress;

    tracing::info!(job = %job.id, freelancer = %caller, "job started");
    events.emit(
        EventKind::JobStarted {
            job: job.id,
            freelancer: caller,
        },
        now,
    );
    events.emit(EventKind::ProfileUpdated { owner: caller }, now);
    Ok(())
}

/// Add a payment tranche before work starts
pub fn add_milestone(
    job: &mut Job,
    caller: Address,
    job_cap: &JobCap,
    description: BlobPtr,
    amount: Amount,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<MilestoneSeq> {
    verify_job_cap(job_cap, job.id)?;
    job.ensure_client(caller)?;
    job.ensure_state(&[JobState::Open, JobState::Assigned])?;

    let planned = job.milestones.planned_total();
    let budget = job.escrow.budget();
    let within_budget = planned
        .checked_add(amount)
        .map(|total| total <= budget)
        .unwrap_or(false);
    if !within_budget {
        return Err(EscrowError::BudgetExceeded {
            planned: planned.value(),
            requested: amount.value(),
            budget: budget.value(),
        });
    }

    let seq = job.milestones.add(description, amount, now);
    events.emit(
        EventKind::MilestoneAdded {
            job: job.id,
            seq,
            amount,
        },
        now,
    );
    Ok(seq)
}

/// Freelancer marks a milestone as being worked on
pub fn begin_milestone(
    job: &mut Job,
    caller: Address,
    seq: MilestoneSeq,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<()> {
    job.ensure_state(&[JobState::InProgress])?;
    job.ensure_freelancer(caller)?;

    job.milestones.get_mut(seq)?.begin()?;

    events.emit(
        EventKind::MilestoneStarted {
            job: job.id,
            seq,
            freelancer: caller,
        },
        now,
    );
    Ok(())
}

/// Submit milestone work for review
///
/// When this was the last outstanding milestone the job itself moves to
/// `Submitted`, which the emitted event marks as the final submission.
pub fn submit_milestone(
    job: &mut Job,
    caller: Address,
    seq: MilestoneSeq,
    proof: BlobPtr,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<()> {
    job.ensure_state(&[JobState::InProgress])?;
    job.ensure_freelancer(caller)?;

    job.milestones.get_mut(seq)?.submit(proof.clone(), now)?;
    job.deliverables.push(proof);

    let final_submission = job.milestones.all_submitted_or_approved();
    if final_submission {
        job.state = JobState::Submitted;
    }

    events.emit(
        EventKind::MilestoneSubmitted {
            job: job.id,
            seq,
            freelancer: caller,
            final_submission,
        },
        now,
    );
    Ok(())
}

/// Client opens a review holding state on a submission
pub fn begin_review(
    job: &mut Job,
    caller: Address,
    job_cap: &JobCap,
    seq: MilestoneSeq,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<()> {
    verify_job_cap(job_cap, job.id)?;
    job.ensure_client(caller)?;
    job.ensure_state(&[JobState::InProgress, JobState::Submitted])?;

    job.milestones.get_mut(seq)?.begin_review()?;

    events.emit(
        EventKind::MilestoneReviewed {
            job: job.id,
            seq,
            client: caller,
        },
        now,
    );
    Ok(())
}

/// Client sends a submission back for rework
///
/// A job-level `Submitted` marker reverts to `InProgress` so the
/// resubmission path is reachable again.
pub fn request_revision(
    job: &mut Job,
    caller: Address,
    job_cap: &JobCap,
    seq: MilestoneSeq,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<()> {
    verify_job_cap(job_cap, job.id)?;
    job.ensure_client(caller)?;
    job.ensure_state(&[JobState::InProgress, JobState::Submitted])?;

    job.milestones.get_mut(seq)?.request_revision()?;
    if job.state == JobState::Submitted {
        job.state = JobState::InProgress;
    }

    events.emit(
        EventKind::RevisionRequested {
            job: job.id,
            seq,
            client: caller,
        },
        now,
    );
    Ok(())
}

/// Either party contests a milestone, freezing its fund release
pub fn dispute_milestone(
    job: &mut Job,
    caller: Address,
    seq: MilestoneSeq,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<()> {
    if caller != job.client && job.freelancer != Some(caller) {
        return Err(EscrowError::unauthorized(format!(
            "{caller} is not a party to this job"
        )));
    }
    job.ensure_state(&[JobState::InProgress, JobState::Submitted])?;

    job.milestones.get_mut(seq)?.dispute()?;
    if job.state == JobState::Submitted {
        job.state = JobState::InProgress;
    }

    tracing::info!(job = %job.id, %seq, raised_by = %caller, "milestone disputed");
    events.emit(
        EventKind::MilestoneDisputed {
            job: job.id,
            seq,
            raised_by: caller,
        },
        now,
    );
    Ok(())
}

/// Re-open review after external arbitration of a dispute
pub fn resolve_dispute(
    job: &mut Job,
    caller: Address,
    job_cap: &JobCap,
    seq: MilestoneSeq,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<()> {
    verify_job_cap(job_cap, job.id)?;
    job.ensure_client(caller)?;
    job.ensure_state(&[JobState::InProgress, JobState::Submitted])?;

    job.milestones.get_mut(seq)?.resolve_dispute()?;
    if job.milestones.all_submitted_or_approved() {
        job.state = JobState::Submitted;
    }

    events.emit(
        EventKind::MilestoneReviewed {
            job: job.id,
            seq,
            client: caller,
        },
        now,
    );
    Ok(())
}

/// Approve a milestone, releasing its tranche atomically
///
/// The client presents its own profile for bookkeeping and the
/// freelancer's profile verified by address match against the job's stored
/// freelancer. Approving the last unapproved milestone completes the job,
/// closes both parties' engagements, refunds any unplanned escrow
/// remainder to the client, and runs the reputation hook.
#[allow(clippy::too_many_arguments)]
pub fn approve_milestone(
    job: &mut Job,
    caller: Address,
    job_cap: &JobCap,
    seq: MilestoneSeq,
    client_profile: &mut Profile,
    freelancer_profile: &mut Profile,
    hook: &dyn ReputationHook,
    config: &EngineConfig,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<ApprovalOutcome> {
    verify_job_cap(job_cap, job.id)?;
    job.ensure_client(caller)?;
    client_profile.ensure_owned_by(caller)?;
    job.ensure_state(&[JobState::InProgress, JobState::Submitted])?;

    // freelancer is set in both admitted states
    let freelancer = job
        .freelancer
        .ok_or_else(|| EscrowError::invalid_state(job.state))?;
    if freelancer_profile.owner != freelancer {
        return Err(EscrowError::unauthorized(format!(
            "profile owned by {} is not the assigned freelancer {freelancer}",
            freelancer_profile.owner
        )));
    }

    // validate the milestone before mutating anything
    let (amount, completes_job) = {
        let milestone = job.milestones.get(seq)?;
        if milestone.is_released() {
            return Err(EscrowError::AlreadyReleased { seq: seq.value() });
        }
        if !milestone.state.is_reviewable() {
            return Err(EscrowError::invalid_milestone_state(milestone.state));
        }
        let others_approved = job
            .milestones
            .iter()
            .all(|m| m.seq == seq || m.is_released());
        (milestone.amount, others_approved)
    };

    // reputation policy runs its validation pre-mutation so an invalid
    // rating aborts the whole operation
    let rating = if completes_job {
        let submission = hook.rating_for_completion(job.id, caller, freelancer);
        if let Some(sub) = &submission {
            if !config.rating_in_range(sub.rating) {
                return Err(EscrowError::InvalidRating {
                    submitted: sub.rating,
                    min: config.rating_min,
                    max: config.rating_max,
                });
            }
        }
        submission
    } else {
        None
    };

    // commit: release is a single atomic step with the Approved transition
    job.milestones.get_mut(seq)?.approve(now)?;
    let funds = job.escrow.release(amount)?;
    let payout = Payout::new(freelancer, funds);

    client_profile.record_amount(amount);
    events.emit(
        EventKind::MilestoneApproved {
            job: job.id,
            seq,
            freelancer,
            amount,
        },
        now,
    );

    if !completes_job {
        freelancer_profile.record_amount(amount);
        return Ok(ApprovalOutcome {
            payout,
            refund: None,
            completed: false,
        });
    }

    freelancer_profile.record_job_completion(job.id, amount);
    client_profile.remove_active_job(job.id);

    let refund = if job.escrow.remaining().is_zero() {
        None
    } else {
        Some(Payout::new(job.client, job.escrow.refund_remainder()))
    };
    job.state = JobState::Completed;

    tracing::info!(
        job = %job.id,
        total_released = %job.escrow.released(),
        "job completed"
    );
    events.emit(
        EventKind::JobCompleted {
            job: job.id,
            client: caller,
            freelancer,
            total_released: job.escrow.released(),
        },
        now,
    );

    if let Some(sub) = rating {
        let (new_rating, rating_count) = freelancer_profile.add_rating(sub.rating, config)?;
        events.emit(
            EventKind::ReputationUpdated {
                owner: freelancer,
                rating: new_rating,
                rating_count,
            },
            now,
        );
    }

    debug_assert!(job.invariants_hold());
    Ok(ApprovalOutcome {
        payout,
        refund,
        completed: true,
    })
}

/// Cancel an open job, refunding the full escrow
pub fn cancel_job(
    job: &mut Job,
    caller: Address,
    job_cap: &JobCap,
    client_profile: &mut Profile,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<Payout> {
    verify_job_cap(job_cap, job.id)?;
    job.ensure_client(caller)?;
    client_profile.ensure_owned_by(caller)?;
    job.ensure_state(&[JobState::Open])?;

    let funds = job.escrow.refund_remainder();
    let refunded = funds.amount();
    client_profile.remove_active_job(job.id);
    job.state = JobState::Cancelled;

    tracing::info!(job = %job.id, %refunded, "job cancelled");
    events.emit(
        EventKind::JobCancelled {
            job: job.id,
            client: caller,
            refunded,
        },
        now,
    );
    Ok(Payout::new(caller, funds))
}

/// Cancel after assignment, releasing the freelancer and refunding the
/// unreleased escrow
pub fn cancel_job_with_freelancer(
    job: &mut Job,
    caller: Address,
    job_cap: &JobCap,
    client_profile: &mut Profile,
    freelancer_profile: &mut Profile,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<Payout> {
    verify_job_cap(job_cap, job.id)?;
    job.ensure_client(caller)?;
    client_profile.ensure_owned_by(caller)?;
    job.ensure_state(&[JobState::Assigned, JobState::InProgress])?;

    let freelancer = job
        .freelancer
        .ok_or_else(|| EscrowError::invalid_state(job.state))?;
    if freelancer_profile.owner != freelancer {
        return Err(EscrowError::unauthorized(format!(
            "profile owned by {} is not the assigned freelancer {freelancer}",
            freelancer_profile.owner
        )));
    }

    let funds = job.escrow.refund_remainder();
    let refunded = funds.amount();
    client_profile.remove_active_job(job.id);
    freelancer_profile.remove_active_job(job.id);
    job.state = JobState::CancelledWithFreelancer;

    tracing::info!(job = %job.id, %refunded, freelancer = %freelancer, "job cancelled with freelancer");
    events.emit(
        EventKind::JobCancelledWithFreelancer {
            job: job.id,
            client: caller,
            freelancer,
            refunded,
        },
        now,
    );
    Ok(Payout::new(caller, funds))
}
