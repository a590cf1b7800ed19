//! Escrow custody accounting
//!
//! The escrow holds the job's budget as an owned [`Funds`] value and tracks
//! where every unit went. The conservation law
//! `released + refunded + remaining == budget` holds after every operation;
//! breaking it is a programming defect, asserted in debug builds.

use gild_core::{Amount, EscrowError, Funds, Result};

/// Funds custodied by one job
#[derive(Debug)]
pub struct Escrow {
    pool: Funds,
    budget: Amount,
    released: Amount,
    refunded: Amount,
}

impl Escrow {
    /// Take custody of a deposit; the deposit amount becomes the budget
    pub fn fund(deposit: Funds) -> Self {
        let budget = deposit.amount();
        Self {
            pool: deposit,
            budget,
            released: Amount::ZERO,
            refunded: Amount::ZERO,
        }
    }

    /// The original escrowed budget
    pub fn budget(&self) -> Amount {
        self.budget
    }

    /// Funds still held
    pub fn remaining(&self) -> Amount {
        self.pool.amount()
    }

    /// Total released to the freelancer so far
    pub fn released(&self) -> Amount {
        self.released
    }

    /// Total refunded to the client so far
    pub fn refunded(&self) -> Amount {
        self.refunded
    }

    /// Check the conservation law
    pub fn is_conserved(&self) -> bool {
        self.released
            .checked_add(self.refunded)
            .and_then(|spent| spent.checked_add(self.remaining()))
            == Some(self.budget)
    }

    /// Release `amount` from custody
    ///
    /// Fails with `InsufficientFunds` if the pool does not cover it. The
    /// caller pairs the returned funds with the milestone's `Approved`
    /// transition in the same operation.
    pub fn release(&mut self, amount: Amount) -> Result<Funds> {
        let funds = self.pool.split(amount)?;
        self.released = self
            .released
            .checked_add(amount)
            .ok_or(EscrowError::InsufficientFunds {
                requested: amount.value(),
                available: self.pool.amount().value(),
            })?;
        debug_assert!(self.is_conserved());
        tracing::debug!(%amount, remaining = %self.remaining(), "escrow release");
        Ok(funds)
    }

    /// Refund everything still held
    pub fn refund_remainder(&mut self) -> Funds {
        let remaining = self.pool.amount();
        // splitting the exact held amount cannot fail
        let funds = self
            .pool
            .split(remaining)
            .unwrap_or_else(|_| unreachable!("splitting the held amount always succeeds"));
        self.refunded = Amount::new(self.refunded.value().saturating_add(remaining.value()));
        debug_assert!(self.is_conserved());
        tracing::debug!(refunded = %remaining, "escrow refund");
        funds
    }
}
