//! Full-lifecycle integration tests for the job escrow state machine
//!
//! Drives the public operation surface end to end: creation, application,
//! two-phase assignment, milestone flow, approval with fund release,
//! cancellation paths, and the event trail the indexer consumes.

#![allow(clippy::unwrap_used)]

use assert_matches::assert_matches;
use gild_core::{Amount, BlobPtr, EscrowError, MilestoneSeq};
use gild_escrow::{ops, JobState};
use gild_events::EventKind;
use gild_ledger::MilestoneState;
use gild_registry::{RatingSubmission, ReputationHook};
use gild_testkit::{EscrowFixture, Party};

#[test]
fn created_job_is_open_with_escrowed_budget() {
    let mut fx = EscrowFixture::new();
    let (id, _cap) = fx.open_job(100);

    let job = fx.job(id);
    assert_eq!(job.state(), JobState::Open);
    assert_eq!(job.escrow().budget(), Amount::new(100));
    assert_eq!(job.escrow().remaining(), Amount::new(100));
    assert!(job.milestones().planned_total() <= job.escrow().budget());
    assert!(job.invariants_hold());

    assert_eq!(fx.client.wallet.balance(), Amount::new(900));
    assert_eq!(fx.client.profile.total_jobs, 1);
    assert!(fx.client.profile.has_active_job(id));
    assert_matches!(
        fx.events.records()[0].event,
        EventKind::JobCreated { job, budget, .. } if job == id && budget == Amount::new(100)
    );
}

#[test]
fn create_job_rejects_past_deadline_and_poor_wallet() {
    let mut fx = EscrowFixture::with_client_balance(50);
    let now = fx.tick();

    let err = ops::create_job(
        &mut fx.board,
        fx.client.address,
        &mut fx.client.profile,
        &mut fx.client.wallet,
        "late job",
        BlobPtr::from("desc"),
        Amount::new(10),
        now,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::InvalidDeadline { .. });

    let deadline = fx.far_deadline();
    let err = ops::create_job(
        &mut fx.board,
        fx.client.address,
        &mut fx.client.profile,
        &mut fx.client.wallet,
        "expensive job",
        BlobPtr::from("desc"),
        Amount::new(51),
        deadline,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(
        err,
        EscrowError::InsufficientFunds {
            requested: 51,
            available: 50
        }
    );

    // atomic abort: nothing was created or escrowed
    assert!(fx.board.is_empty());
    assert!(fx.events.is_empty());
    assert_eq!(fx.client.wallet.balance(), Amount::new(50));
}

#[test]
fn application_mints_stored_bridge_capability() {
    let mut fx = EscrowFixture::new();
    let (id, _cap) = fx.applied_job(100);

    let job = fx.job(id);
    let entry = job
        .applicants()
        .find(|a| a.applicant == fx.freelancer.address)
        .unwrap();
    assert!(entry.update_cap.is_some());
    assert_matches!(
        fx.events.records().last().unwrap().event,
        EventKind::JobApplied { applicant, .. } if applicant == fx.freelancer.address
    );
}

#[test]
fn self_and_duplicate_applications_are_rejected() {
    let mut fx = EscrowFixture::new();
    let (id, _cap) = fx.applied_job(100);

    let now = fx.tick();
    let client_address = fx.client.address;
    let client_profile = fx.client.profile.clone();
    let err = ops::apply_for_job(
        fx.board.get_mut(id).unwrap(),
        client_address,
        &client_profile,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::SelfApplication);

    let freelancer_address = fx.freelancer.address;
    let freelancer_profile = fx.freelancer.profile.clone();
    let err = ops::apply_for_job(
        fx.board.get_mut(id).unwrap(),
        freelancer_address,
        &freelancer_profile,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::DuplicateApplication { .. });
}

#[test]
fn assignment_requires_applicant_and_open_state() {
    let mut fx = EscrowFixture::new();
    let (id, cap) = fx.applied_job(100);

    // an identity that never applied to this job
    let outsider = Party::new(gild_registry::Role::Freelancer, "outsider", 0, fx.now());
    let now = fx.tick();
    let client = fx.client.address;
    let err = ops::assign_freelancer(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        &fx.registry,
        outsider.address,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::NotAnApplicant { .. });

    let freelancer = fx.freelancer.address;
    ops::assign_freelancer(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        &fx.registry,
        freelancer,
        now,
        &mut fx.events,
    )
    .unwrap();
    assert_eq!(fx.job(id).state(), JobState::Assigned);
    assert_eq!(fx.job(id).freelancer(), Some(freelancer));

    // assigning again is no longer valid
    let err = ops::assign_freelancer(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        &fx.registry,
        freelancer,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::InvalidState { .. });
}

#[test]
fn foreign_job_cap_never_authorizes() {
    let mut fx = EscrowFixture::new();
    let (id, _cap) = fx.applied_job(100);
    let (_other, other_cap) = fx.open_job(100);

    let now = fx.tick();
    let client = fx.client.address;
    let freelancer = fx.freelancer.address;
    let err = ops::assign_freelancer(
        fx.board.get_mut(id).unwrap(),
        client,
        &other_cap,
        &fx.registry,
        freelancer,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::Unauthorized { .. });
}

#[test]
fn start_job_enforces_identity_and_consumes_bridge() {
    let mut fx = EscrowFixture::new();
    let (id, _cap) = fx.assigned_job(100);

    // a stranger cannot start, even presenting their own profile
    let mut stranger = Party::new(gild_registry::Role::Freelancer, "stranger", 0, fx.now());
    let now = fx.tick();
    let err = ops::start_job(
        fx.board.get_mut(id).unwrap(),
        stranger.address,
        &mut stranger.profile,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::Unauthorized { .. });

    // the freelancer cannot start with someone else's profile
    let freelancer = fx.freelancer.address;
    let err = ops::start_job(
        fx.board.get_mut(id).unwrap(),
        freelancer,
        &mut stranger.profile,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::Unauthorized { .. });
    assert_eq!(fx.job(id).state(), JobState::Assigned);

    ops::start_job(
        fx.board.get_mut(id).unwrap(),
        freelancer,
        &mut fx.freelancer.profile,
        now,
        &mut fx.events,
    )
    .unwrap();
    assert_eq!(fx.job(id).state(), JobState::InProgress);
    assert_eq!(fx.freelancer.profile.total_jobs, 1);
    assert!(fx.freelancer.profile.has_active_job(id));

    // the bridge is gone: the entry survives but holds no capability
    let entry = fx
        .job(id)
        .applicants()
        .find(|a| a.applicant == freelancer)
        .unwrap();
    assert!(entry.update_cap.is_none());
}

#[test]
fn milestones_cannot_exceed_budget() {
    let mut fx = EscrowFixture::new();
    let (id, cap) = fx.assigned_job(100);

    fx.add_milestone(id, &cap, 40);

    let now = fx.tick();
    let client = fx.client.address;
    let events_before = fx.events.len();
    let err = ops::add_milestone(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        BlobPtr::from("too big"),
        Amount::new(70),
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(
        err,
        EscrowError::BudgetExceeded {
            planned: 40,
            requested: 70,
            budget: 100
        }
    );

    // atomic abort: the schedule and the log are untouched
    assert_eq!(fx.job(id).milestones().count(), 1);
    assert_eq!(fx.events.len(), events_before);
}

#[test]
fn milestones_are_frozen_once_work_starts() {
    let mut fx = EscrowFixture::new();
    let (id, cap) = fx.started_job(100);

    let now = fx.tick();
    let client = fx.client.address;
    let err = ops::add_milestone(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        BlobPtr::from("late tranche"),
        Amount::new(10),
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::InvalidState { .. });
}

#[test]
fn sole_full_budget_milestone_completes_job_on_approval() {
    let mut fx = EscrowFixture::new();
    let (id, cap) = fx.assigned_job(100);
    let seq = fx.add_milestone(id, &cap, 100);

    let now = fx.tick();
    let freelancer = fx.freelancer.address;
    ops::start_job(
        fx.board.get_mut(id).unwrap(),
        freelancer,
        &mut fx.freelancer.profile,
        now,
        &mut fx.events,
    )
    .unwrap();
    fx.submit_milestone(id, seq);
    assert_eq!(fx.job(id).state(), JobState::Submitted);

    let now = fx.tick();
    let client = fx.client.address;
    let outcome = ops::approve_milestone(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        seq,
        &mut fx.client.profile,
        &mut fx.freelancer.profile,
        &fx.hook,
        &fx.config,
        now,
        &mut fx.events,
    )
    .unwrap();

    assert!(outcome.completed);
    assert!(outcome.refund.is_none());
    assert_eq!(outcome.payout.amount(), Amount::new(100));

    let job = fx.job(id);
    assert_eq!(job.state(), JobState::Completed);
    assert_eq!(job.escrow().remaining(), Amount::ZERO);
    assert!(job.invariants_hold());

    assert_eq!(fx.freelancer.profile.completed_jobs, 1);
    assert_eq!(fx.freelancer.profile.total_amount, 100);
    assert!(!fx.freelancer.profile.has_active_job(id));
    assert_eq!(fx.client.profile.total_amount, 100);
    assert!(!fx.client.profile.has_active_job(id));

    outcome.payout.settle(&mut fx.freelancer.wallet).unwrap();
    assert_eq!(fx.freelancer.wallet.balance(), Amount::new(100));

    let kinds: Vec<&'static str> = fx
        .events
        .records()
        .iter()
        .map(|r| r.event.name())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "JobCreated",
            "JobApplied",
            "FreelancerAssigned",
            "MilestoneAdded",
            "JobStarted",
            "ProfileUpdated",
            "MilestoneSubmitted",
            "MilestoneApproved",
            "JobCompleted",
        ]
    );
}

#[test]
fn partial_approvals_release_tranche_by_tranche() {
    let mut fx = EscrowFixture::new();
    let (id, cap) = fx.assigned_job(100);
    let first = fx.add_milestone(id, &cap, 40);
    let second = fx.add_milestone(id, &cap, 60);

    let now = fx.tick();
    let freelancer = fx.freelancer.address;
    ops::start_job(
        fx.board.get_mut(id).unwrap(),
        freelancer,
        &mut fx.freelancer.profile,
        now,
        &mut fx.events,
    )
    .unwrap();

    fx.submit_milestone(id, first);
    // one milestone still outstanding: job-level marker not yet set
    assert_eq!(fx.job(id).state(), JobState::InProgress);

    let now = fx.tick();
    let client = fx.client.address;
    let outcome = ops::approve_milestone(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        first,
        &mut fx.client.profile,
        &mut fx.freelancer.profile,
        &fx.hook,
        &fx.config,
        now,
        &mut fx.events,
    )
    .unwrap();
    assert!(!outcome.completed);
    assert_eq!(outcome.payout.amount(), Amount::new(40));
    assert_eq!(fx.job(id).escrow().remaining(), Amount::new(60));
    assert_eq!(fx.job(id).state(), JobState::InProgress);
    assert_eq!(fx.freelancer.profile.completed_jobs, 0);
    assert_eq!(fx.freelancer.profile.total_amount, 40);

    // double release of the same milestone is latched out
    let now = fx.tick();
    let err = ops::approve_milestone(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        first,
        &mut fx.client.profile,
        &mut fx.freelancer.profile,
        &fx.hook,
        &fx.config,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::AlreadyReleased { seq } if seq == first.value());

    fx.submit_milestone(id, second);
    let now = fx.tick();
    let outcome = ops::approve_milestone(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        second,
        &mut fx.client.profile,
        &mut fx.freelancer.profile,
        &fx.hook,
        &fx.config,
        now,
        &mut fx.events,
    )
    .unwrap();
    assert!(outcome.completed);
    assert_eq!(fx.job(id).state(), JobState::Completed);
    assert_eq!(fx.freelancer.profile.total_amount, 100);
    assert_eq!(fx.client.profile.total_amount, 100);
}

#[test]
fn completion_refunds_unplanned_remainder() {
    let mut fx = EscrowFixture::new();
    let (id, cap) = fx.assigned_job(100);
    let seq = fx.add_milestone(id, &cap, 80);

    let now = fx.tick();
    let freelancer = fx.freelancer.address;
    ops::start_job(
        fx.board.get_mut(id).unwrap(),
        freelancer,
        &mut fx.freelancer.profile,
        now,
        &mut fx.events,
    )
    .unwrap();
    fx.submit_milestone(id, seq);

    let now = fx.tick();
    let client = fx.client.address;
    let outcome = ops::approve_milestone(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        seq,
        &mut fx.client.profile,
        &mut fx.freelancer.profile,
        &fx.hook,
        &fx.config,
        now,
        &mut fx.events,
    )
    .unwrap();

    let refund = outcome.refund.unwrap();
    assert_eq!(refund.amount(), Amount::new(20));
    refund.settle(&mut fx.client.wallet).unwrap();
    outcome.payout.settle(&mut fx.freelancer.wallet).unwrap();

    // conservation across the whole engagement
    assert_eq!(fx.client.wallet.balance(), Amount::new(920));
    assert_eq!(fx.freelancer.wallet.balance(), Amount::new(80));
    let escrow = fx.job(id).escrow();
    assert_eq!(escrow.released(), Amount::new(80));
    assert_eq!(escrow.refunded(), Amount::new(20));
    assert!(escrow.is_conserved());
}

#[test]
fn revision_reopens_submission_path() {
    let mut fx = EscrowFixture::new();
    let (id, cap) = fx.assigned_job(100);
    let seq = fx.add_milestone(id, &cap, 100);

    let now = fx.tick();
    let freelancer = fx.freelancer.address;
    ops::start_job(
        fx.board.get_mut(id).unwrap(),
        freelancer,
        &mut fx.freelancer.profile,
        now,
        &mut fx.events,
    )
    .unwrap();
    fx.submit_milestone(id, seq);
    assert_eq!(fx.job(id).state(), JobState::Submitted);

    let now = fx.tick();
    let client = fx.client.address;
    ops::request_revision(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        seq,
        now,
        &mut fx.events,
    )
    .unwrap();

    let job = fx.job(id);
    assert_eq!(job.state(), JobState::InProgress);
    let milestone = job.milestones().get(seq).unwrap();
    assert_eq!(milestone.state, MilestoneState::RevisionRequested);
    assert_eq!(milestone.revision_count, 1);

    // the freelancer can resubmit and the job-level marker returns
    fx.submit_milestone(id, seq);
    assert_eq!(fx.job(id).state(), JobState::Submitted);
}

#[test]
fn dispute_freezes_release_until_resolution() {
    let mut fx = EscrowFixture::new();
    let (id, cap) = fx.assigned_job(100);
    let seq = fx.add_milestone(id, &cap, 100);

    let now = fx.tick();
    let freelancer = fx.freelancer.address;
    ops::start_job(
        fx.board.get_mut(id).unwrap(),
        freelancer,
        &mut fx.freelancer.profile,
        now,
        &mut fx.events,
    )
    .unwrap();
    fx.submit_milestone(id, seq);

    let now = fx.tick();
    ops::dispute_milestone(
        fx.board.get_mut(id).unwrap(),
        freelancer,
        seq,
        now,
        &mut fx.events,
    )
    .unwrap();

    let client = fx.client.address;
    let err = ops::approve_milestone(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        seq,
        &mut fx.client.profile,
        &mut fx.freelancer.profile,
        &fx.hook,
        &fx.config,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::InvalidMilestoneState { .. });

    // outsiders are not parties to the dispute
    let outsider = Party::new(gild_registry::Role::Client, "outsider", 0, fx.now());
    let err = ops::dispute_milestone(
        fx.board.get_mut(id).unwrap(),
        outsider.address,
        seq,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::Unauthorized { .. });

    let now = fx.tick();
    ops::resolve_dispute(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        seq,
        now,
        &mut fx.events,
    )
    .unwrap();
    assert_eq!(fx.job(id).state(), JobState::Submitted);

    let now = fx.tick();
    let outcome = ops::approve_milestone(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        seq,
        &mut fx.client.profile,
        &mut fx.freelancer.profile,
        &fx.hook,
        &fx.config,
        now,
        &mut fx.events,
    )
    .unwrap();
    assert!(outcome.completed);
}

#[test]
fn open_cancellation_refunds_everything() {
    let mut fx = EscrowFixture::new();
    let (id, cap) = fx.open_job(100);

    let now = fx.tick();
    let client = fx.client.address;
    let payout = ops::cancel_job(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        &mut fx.client.profile,
        now,
        &mut fx.events,
    )
    .unwrap();
    payout.settle(&mut fx.client.wallet).unwrap();

    assert_eq!(fx.job(id).state(), JobState::Cancelled);
    assert_eq!(fx.client.wallet.balance(), Amount::new(1_000));
    assert!(!fx.client.profile.has_active_job(id));
    assert!(fx.job(id).invariants_hold());
}

#[test]
fn assigned_job_cancellation_requires_the_freelancer_aware_path() {
    let mut fx = EscrowFixture::new();
    let (id, cap) = fx.assigned_job(100);

    let now = fx.tick();
    let client = fx.client.address;
    let err = ops::cancel_job(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        &mut fx.client.profile,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::InvalidState { .. });
    assert_eq!(fx.job(id).state(), JobState::Assigned);

    let payout = ops::cancel_job_with_freelancer(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        &mut fx.client.profile,
        &mut fx.freelancer.profile,
        now,
        &mut fx.events,
    )
    .unwrap();
    assert_eq!(payout.amount(), Amount::new(100));
    assert_eq!(fx.job(id).state(), JobState::CancelledWithFreelancer);
    assert!(fx.job(id).invariants_hold());
    payout.settle(&mut fx.client.wallet).unwrap();
}

#[test]
fn started_jobs_need_the_freelancer_aware_cancellation() {
    let mut fx = EscrowFixture::new();
    let (id, cap) = fx.started_job(100);

    let now = fx.tick();
    let client = fx.client.address;
    let err = ops::cancel_job(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        &mut fx.client.profile,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::InvalidState { .. });

    let payout = ops::cancel_job_with_freelancer(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        &mut fx.client.profile,
        &mut fx.freelancer.profile,
        now,
        &mut fx.events,
    )
    .unwrap();
    assert_eq!(payout.amount(), Amount::new(100));
    payout.settle(&mut fx.client.wallet).unwrap();

    let job = fx.job(id);
    assert_eq!(job.state(), JobState::CancelledWithFreelancer);
    assert!(!fx.freelancer.profile.has_active_job(id));
    assert!(!fx.client.profile.has_active_job(id));
    assert!(job.invariants_hold());

    // terminal: nothing moves the job again
    let now = fx.tick();
    let err = ops::cancel_job_with_freelancer(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        &mut fx.client.profile,
        &mut fx.freelancer.profile,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::InvalidState { .. });
}

struct AlwaysFive;

impl ReputationHook for AlwaysFive {
    fn rating_for_completion(
        &self,
        _job: gild_core::JobId,
        _client: gild_core::Address,
        _freelancer: gild_core::Address,
    ) -> Option<RatingSubmission> {
        Some(RatingSubmission { rating: 5 })
    }
}

struct OutOfRange;

impl ReputationHook for OutOfRange {
    fn rating_for_completion(
        &self,
        _job: gild_core::JobId,
        _client: gild_core::Address,
        _freelancer: gild_core::Address,
    ) -> Option<RatingSubmission> {
        Some(RatingSubmission { rating: 9 })
    }
}

#[test]
fn completion_hook_applies_validated_rating() {
    let mut fx = EscrowFixture::new();
    let (id, cap) = fx.assigned_job(100);
    let seq = fx.add_milestone(id, &cap, 100);

    let now = fx.tick();
    let freelancer = fx.freelancer.address;
    ops::start_job(
        fx.board.get_mut(id).unwrap(),
        freelancer,
        &mut fx.freelancer.profile,
        now,
        &mut fx.events,
    )
    .unwrap();
    fx.submit_milestone(id, seq);

    // an out-of-range policy rating aborts before any mutation
    let now = fx.tick();
    let client = fx.client.address;
    let err = ops::approve_milestone(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        seq,
        &mut fx.client.profile,
        &mut fx.freelancer.profile,
        &OutOfRange,
        &fx.config,
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::InvalidRating { submitted: 9, .. });
    assert_eq!(fx.job(id).state(), JobState::Submitted);
    assert_eq!(fx.job(id).escrow().remaining(), Amount::new(100));
    assert!(!fx.job(id).milestones().get(seq).unwrap().is_released());

    let outcome = ops::approve_milestone(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        seq,
        &mut fx.client.profile,
        &mut fx.freelancer.profile,
        &AlwaysFive,
        &fx.config,
        now,
        &mut fx.events,
    )
    .unwrap();
    assert!(outcome.completed);
    assert_eq!(fx.freelancer.profile.rating, 5);
    assert_eq!(fx.freelancer.profile.rating_count, 1);
    assert_matches!(
        fx.events.records().last().unwrap().event,
        EventKind::ReputationUpdated {
            rating: 5,
            rating_count: 1,
            ..
        }
    );
}

#[test]
fn submit_requires_started_job_and_assigned_freelancer() {
    let mut fx = EscrowFixture::new();
    let (id, cap) = fx.assigned_job(100);
    let seq = fx.add_milestone(id, &cap, 100);

    // job not started yet
    let now = fx.tick();
    let freelancer = fx.freelancer.address;
    let err = ops::submit_milestone(
        fx.board.get_mut(id).unwrap(),
        freelancer,
        seq,
        BlobPtr::from("early"),
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::InvalidState { .. });

    ops::start_job(
        fx.board.get_mut(id).unwrap(),
        freelancer,
        &mut fx.freelancer.profile,
        now,
        &mut fx.events,
    )
    .unwrap();

    // the client is not the freelancer
    let client = fx.client.address;
    let err = ops::submit_milestone(
        fx.board.get_mut(id).unwrap(),
        client,
        seq,
        BlobPtr::from("not mine"),
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::Unauthorized { .. });

    // unknown milestone sequence
    let err = ops::submit_milestone(
        fx.board.get_mut(id).unwrap(),
        freelancer,
        MilestoneSeq::new(9),
        BlobPtr::from("ghost"),
        now,
        &mut fx.events,
    )
    .unwrap_err();
    assert_matches!(err, EscrowError::InvalidMilestoneState { .. });
}

#[test]
fn begin_milestone_and_review_follow_the_graph() {
    let mut fx = EscrowFixture::new();
    let (id, cap) = fx.assigned_job(100);
    let seq = fx.add_milestone(id, &cap, 100);

    let now = fx.tick();
    let freelancer = fx.freelancer.address;
    ops::start_job(
        fx.board.get_mut(id).unwrap(),
        freelancer,
        &mut fx.freelancer.profile,
        now,
        &mut fx.events,
    )
    .unwrap();

    let now = fx.tick();
    ops::begin_milestone(fx.board.get_mut(id).unwrap(), freelancer, seq, now, &mut fx.events)
        .unwrap();
    assert_eq!(
        fx.job(id).milestones().get(seq).unwrap().state,
        MilestoneState::InProgress
    );

    fx.submit_milestone(id, seq);

    let now = fx.tick();
    let client = fx.client.address;
    ops::begin_review(fx.board.get_mut(id).unwrap(), client, &cap, seq, now, &mut fx.events)
        .unwrap();
    assert_eq!(
        fx.job(id).milestones().get(seq).unwrap().state,
        MilestoneState::UnderReview
    );

    // approval is still valid from the holding state
    let now = fx.tick();
    let outcome = ops::approve_milestone(
        fx.board.get_mut(id).unwrap(),
        client,
        &cap,
        seq,
        &mut fx.client.profile,
        &mut fx.freelancer.profile,
        &fx.hook,
        &fx.config,
        now,
        &mut fx.events,
    )
    .unwrap();
    assert!(outcome.completed);
}
