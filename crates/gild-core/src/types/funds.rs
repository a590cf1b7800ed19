//! Fund custody primitives
//!
//! Funds move through the engine as owned values: a [`Funds`] value is
//! deliberately neither `Clone` nor `Serialize`, so custody can change hands
//! but never be duplicated. A [`Payout`] binds released funds to their
//! recipient and can be settled exactly once. All arithmetic is checked;
//! breaking the conservation of value is a programming defect, not a
//! runtime condition.

use crate::errors::{EscrowError, Result};
use crate::types::identifiers::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A quantity of funds in the platform's base denomination
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Create a new amount
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Return the raw value
    pub fn value(self) -> u64 {
        self.0
    }

    /// True if this amount is zero
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked addition
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Owned custody of a quantity of funds
///
/// A `Funds` value represents the funds themselves, not a claim on them.
/// It can only be obtained by withdrawing from a [`Wallet`] or splitting an
/// existing `Funds` value, so the total in circulation is conserved.
#[derive(Debug, PartialEq, Eq)]
pub struct Funds {
    amount: u64,
}

impl Funds {
    fn from_amount(amount: Amount) -> Self {
        Self {
            amount: amount.value(),
        }
    }

    /// The quantity held
    pub fn amount(&self) -> Amount {
        Amount::new(self.amount)
    }

    /// True if nothing is held
    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }

    /// Split `amount` out of this value, leaving the remainder behind
    ///
    /// Fails with `InsufficientFunds` if more is requested than is held.
    pub fn split(&mut self, amount: Amount) -> Result<Funds> {
        let remaining = self.amount.checked_sub(amount.value()).ok_or(
            EscrowError::InsufficientFunds {
                requested: amount.value(),
                available: self.amount,
            },
        )?;
        self.amount = remaining;
        Ok(Funds {
            amount: amount.value(),
        })
    }

    /// Absorb another funds value into this one
    pub fn merge(&mut self, other: Funds) {
        // Conservation: the sum of two custody values always fits, since
        // both were withdrawn from u64-bounded wallets.
        debug_assert!(self.amount.checked_add(other.amount).is_some());
        self.amount = self.amount.saturating_add(other.amount);
    }

    /// Consume an empty funds value
    ///
    /// Dropping a non-empty `Funds` would strand value, so explicit
    /// destruction is only offered for empty ones.
    pub fn destroy_empty(self) -> Result<()> {
        if self.amount != 0 {
            return Err(EscrowError::InsufficientFunds {
                requested: 0,
                available: self.amount,
            });
        }
        Ok(())
    }
}

/// A party's fund source
///
/// The platform credits wallets outside the engine; within the engine a
/// wallet is only ever presented by its owner (enforced by address match).
#[derive(Debug)]
pub struct Wallet {
    owner: Address,
    balance: u64,
}

impl Wallet {
    /// Create a wallet with an opening balance
    pub fn new(owner: Address, opening_balance: Amount) -> Self {
        Self {
            owner,
            balance: opening_balance.value(),
        }
    }

    /// The owning address
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Current balance
    pub fn balance(&self) -> Amount {
        Amount::new(self.balance)
    }

    /// Withdraw funds into an owned custody value
    ///
    /// Fails with `InsufficientFunds` when the balance does not cover the
    /// request.
    pub fn withdraw(&mut self, amount: Amount) -> Result<Funds> {
        let remaining = self.balance.checked_sub(amount.value()).ok_or(
            EscrowError::InsufficientFunds {
                requested: amount.value(),
                available: self.balance,
            },
        )?;
        self.balance = remaining;
        Ok(Funds::from_amount(amount))
    }

    /// Deposit a custody value back into the wallet
    pub fn deposit(&mut self, funds: Funds) -> Amount {
        debug_assert!(self.balance.checked_add(funds.amount).is_some());
        self.balance = self.balance.saturating_add(funds.amount);
        Amount::new(self.balance)
    }
}

/// Released funds bound to their recipient
///
/// Fund release hands a `Payout` back to the platform rather than reaching
/// into the counterparty's wallet. Settling consumes the payout, so a
/// release can be delivered at most once.
#[derive(Debug)]
pub struct Payout {
    to: Address,
    funds: Funds,
}

impl Payout {
    /// Bind released funds to a recipient
    pub fn new(to: Address, funds: Funds) -> Self {
        Self { to, funds }
    }

    /// The recipient address
    pub fn to(&self) -> Address {
        self.to
    }

    /// The amount carried
    pub fn amount(&self) -> Amount {
        self.funds.amount()
    }

    /// Deposit into the recipient's wallet
    ///
    /// Fails with `Unauthorized` if the wallet is not owned by the payout's
    /// recipient. Presenting the wrong wallet is a platform defect; check
    /// [`Payout::to`] before settling.
    pub fn settle(self, wallet: &mut Wallet) -> Result<Amount> {
        if wallet.owner() != self.to {
            return Err(EscrowError::unauthorized(format!(
                "payout for {} cannot settle into wallet owned by {}",
                self.to,
                wallet.owner()
            )));
        }
        let amount = self.funds.amount();
        wallet.deposit(self.funds);
        Ok(amount)
    }
}
