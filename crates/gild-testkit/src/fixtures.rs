//! Staged engine fixtures
//!
//! [`EscrowFixture`] wires up a registered client and freelancer with
//! funded wallets and can fast-forward a job to any lifecycle stage, so a
//! test starts exactly where its assertions begin.

use crate::builders::Party;
use gild_capability::JobCap;
use gild_core::{Amount, BlobPtr, EngineConfig, JobId, Timestamp, Wallet};
use gild_escrow::{ops, Job, JobBoard};
use gild_events::EventLog;
use gild_registry::{create_profile, IdentityRegistry, NoAutoRating, Role};

const TICK_MS: u64 = 10;

/// A complete engine world with one client and one freelancer
#[derive(Debug)]
pub struct EscrowFixture {
    /// Job store
    pub board: JobBoard,
    /// Identity registry with both parties registered
    pub registry: IdentityRegistry,
    /// Event log; setup events are drained so tests observe only their own
    pub events: EventLog,
    /// Default engine configuration
    pub config: EngineConfig,
    /// Default reputation policy
    pub hook: NoAutoRating,
    /// The registered client party
    pub client: Party,
    /// The registered freelancer party
    pub freelancer: Party,
    clock: u64,
}

impl EscrowFixture {
    /// Fixture with a client wallet holding 1000 units
    pub fn new() -> Self {
        Self::with_client_balance(1_000)
    }

    /// Fixture with a chosen client wallet balance
    pub fn with_client_balance(balance: u64) -> Self {
        crate::init_test_tracing();
        let mut registry = IdentityRegistry::new();
        let mut events = EventLog::new();
        let at = Timestamp::from_millis(0);

        let client_address = gild_core::Address::new();
        let client_profile = create_profile(
            &mut registry,
            client_address,
            Role::Client,
            "fixture client",
            at,
            &mut events,
        )
        .unwrap();

        let freelancer_address = gild_core::Address::new();
        let freelancer_profile = create_profile(
            &mut registry,
            freelancer_address,
            Role::Freelancer,
            "fixture freelancer",
            at,
            &mut events,
        )
        .unwrap();

        events.drain();

        Self {
            board: JobBoard::new(),
            registry,
            events,
            config: EngineConfig::default(),
            hook: NoAutoRating,
            client: Party {
                address: client_address,
                profile: client_profile,
                wallet: Wallet::new(client_address, Amount::new(balance)),
            },
            freelancer: Party {
                address: freelancer_address,
                profile: freelancer_profile,
                wallet: Wallet::new(freelancer_address, Amount::ZERO),
            },
            clock: at.millis(),
        }
    }

    /// Advance the platform clock and return the new now
    pub fn tick(&mut self) -> Timestamp {
        self.clock += TICK_MS;
        Timestamp::from_millis(self.clock)
    }

    /// The current platform time
    pub fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.clock)
    }

    /// A deadline comfortably in the future
    pub fn far_deadline(&self) -> Timestamp {
        Timestamp::from_millis(self.clock + 1_000_000)
    }

    /// Borrow a job by id
    pub fn job(&self, id: JobId) -> &Job {
        self.board.get(id).unwrap()
    }

    /// Mutably borrow a job by id
    pub fn job_mut(&mut self, id: JobId) -> &mut Job {
        self.board.get_mut(id).unwrap()
    }

    /// Create an open job with the given budget
    pub fn open_job(&mut self, budget: u64) -> (JobId, JobCap) {
        let now = self.tick();
        let deadline = self.far_deadline();
        ops::create_job(
            &mut self.board,
            self.client.address,
            &mut self.client.profile,
            &mut self.client.wallet,
            "fixture job",
            BlobPtr::from("job description"),
            Amount::new(budget),
            deadline,
            now,
            &mut self.events,
        )
        .unwrap()
    }

    /// Open job with the freelancer already applied
    pub fn applied_job(&mut self, budget: u64) -> (JobId, JobCap) {
        let (id, cap) = self.open_job(budget);
        let now = self.tick();
        ops::apply_for_job(
            self.board.get_mut(id).unwrap(),
            self.freelancer.address,
            &self.freelancer.profile,
            now,
            &mut self.events,
        )
        .unwrap();
        (id, cap)
    }

    /// Job with the freelancer applied and assigned
    pub fn assigned_job(&mut self, budget: u64) -> (JobId, JobCap) {
        let (id, cap) = self.applied_job(budget);
        let now = self.tick();
        ops::assign_freelancer(
            self.board.get_mut(id).unwrap(),
            self.client.address,
            &cap,
            &self.registry,
            self.freelancer.address,
            now,
            &mut self.events,
        )
        .unwrap();
        (id, cap)
    }

    /// Job in progress: assigned and started by the freelancer
    pub fn started_job(&mut self, budget: u64) -> (JobId, JobCap) {
        let (id, cap) = self.assigned_job(budget);
        let now = self.tick();
        ops::start_job(
            self.board.get_mut(id).unwrap(),
            self.freelancer.address,
            &mut self.freelancer.profile,
            now,
            &mut self.events,
        )
        .unwrap();
        (id, cap)
    }

    /// Add a milestone through the client
    pub fn add_milestone(&mut self, id: JobId, cap: &JobCap, amount: u64) -> gild_core::MilestoneSeq {
        let now = self.tick();
        ops::add_milestone(
            self.board.get_mut(id).unwrap(),
            self.client.address,
            cap,
            BlobPtr::from("milestone description"),
            Amount::new(amount),
            now,
            &mut self.events,
        )
        .unwrap()
    }

    /// Submit a milestone through the freelancer
    pub fn submit_milestone(&mut self, id: JobId, seq: gild_core::MilestoneSeq) {
        let now = self.tick();
        ops::submit_milestone(
            self.board.get_mut(id).unwrap(),
            self.freelancer.address,
            seq,
            BlobPtr::from("proof"),
            now,
            &mut self.events,
        )
        .unwrap();
    }
}

impl Default for EscrowFixture {
    fn default() -> Self {
        Self::new()
    }
}
