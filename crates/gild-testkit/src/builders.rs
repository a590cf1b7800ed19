//! Entity builders

use gild_core::{Address, Amount, Timestamp, Wallet};
use gild_registry::{Profile, Role};
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Deterministic address derived from a single byte tag
///
/// Useful when a test needs stable, readable identities.
pub fn test_address(tag: u8) -> Address {
    Address::from_uuid(Uuid::from_bytes([tag; 16]))
}

/// Deterministic batch of distinct addresses from a seed
pub fn seeded_addresses(count: usize, seed: u64) -> Vec<Address> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let bytes: [u8; 16] = rng.gen();
            Address::from_uuid(Uuid::from_bytes(bytes))
        })
        .collect()
}

/// One party: an address with its owned profile and wallet
#[derive(Debug)]
pub struct Party {
    /// The party's address
    pub address: Address,
    /// The party's exclusively-owned profile
    pub profile: Profile,
    /// The party's fund source
    pub wallet: Wallet,
}

impl Party {
    /// Build a party with a fresh profile and a funded wallet
    pub fn new(role: Role, name: &str, balance: u64, at: Timestamp) -> Self {
        let address = Address::new();
        Self {
            address,
            profile: Profile::new(address, role, name, at),
            wallet: Wallet::new(address, Amount::new(balance)),
        }
    }
}
