//! Cross-identity lookup registry
//!
//! Operations that need to know whether an address belongs to a registered
//! party consult this table by reference. Profiles themselves stay in their
//! owners' hands; the registry records only existence, role, and
//! registration time.

use crate::profile::{Profile, Role};
use gild_core::{Address, EscrowError, Result, Timestamp};
use gild_events::{EventKind, EventLog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Public facts about one registered identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredIdentity {
    /// The registered address
    pub address: Address,
    /// Role declared at registration
    pub role: Role,
    /// When the identity registered
    pub registered_at: Timestamp,
}

/// Registry of every identity known to the engine, keyed by address
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRegistry {
    records: BTreeMap<Address, RegisteredIdentity>,
}

impl IdentityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `address` belongs to a registered identity
    pub fn is_registered(&self, address: Address) -> bool {
        self.records.contains_key(&address)
    }

    /// The role `address` registered with, if any
    pub fn role_of(&self, address: Address) -> Option<Role> {
        self.records.get(&address).map(|r| r.role)
    }

    /// Lookup the registration record for `address`
    pub fn get(&self, address: Address) -> Option<&RegisteredIdentity> {
        self.records.get(&address)
    }

    /// Number of registered identities
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn insert(&mut self, record: RegisteredIdentity) -> Result<()> {
        if self.records.contains_key(&record.address) {
            // an address's identity lifecycle does not admit re-creation
            return Err(EscrowError::invalid_state(format!(
                "address {} already registered",
                record.address
            )));
        }
        self.records.insert(record.address, record);
        Ok(())
    }
}

/// Register an identity and mint its owned profile record
///
/// The returned [`Profile`] belongs to the caller; the engine keeps only
/// the registration facts. Re-registration fails with `InvalidState`.
pub fn create_profile(
    registry: &mut IdentityRegistry,
    caller: Address,
    role: Role,
    display_name: impl Into<String>,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<Profile> {
    registry.insert(RegisteredIdentity {
        address: caller,
        role,
        registered_at: now,
    })?;
    let profile = Profile::new(caller, role, display_name, now);
    tracing::info!(owner = %caller, role = %role, "profile created");
    events.emit(
        EventKind::ProfileCreated {
            owner: caller,
            role: role.to_string(),
        },
        now,
    );
    Ok(profile)
}
