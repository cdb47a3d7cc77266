//! Access control held by each vault
//!
//! Governance owns every configuration change. Strategists may run the
//! investment loop but never pass a governance check.
use odra::prelude::*;
use crate::errors::VaultError;
use crate::events::{GovernanceUpdated, StrategistUpdated};

/// Governance address plus the strategist role set
#[odra::module]
pub struct AccessControl {
    /// Governance address
    governance: Var<Address>,
    /// Strategist flags
    strategists: Mapping<Address, bool>,
}

#[odra::module]
impl AccessControl {
    /// Initialize with the governance address
    pub fn init(&mut self, governance: Address) {
        self.governance.set(governance);
    }

    /// Get the governance address
    pub fn governance(&self) -> Address {
        self.governance.get_or_revert_with(VaultError::NotGovernance)
    }

    /// Check whether an address holds the strategist role
    pub fn is_strategist(&self, account: Address) -> bool {
        self.strategists.get(&account).unwrap_or(false)
    }

    /// Hand governance over to a new address (governance only)
    pub fn set_governance(&mut self, governance: Address) {
        self.only_governance();
        let previous = self.governance();
        self.governance.set(governance);
        self.env().emit_event(GovernanceUpdated {
            previous,
            governance,
        });
    }

    /// Grant or revoke the strategist role (governance only)
    pub fn set_strategist(&mut self, strategist: Address, allowed: bool) {
        self.only_governance();
        self.strategists.set(&strategist, allowed);
        self.env().emit_event(StrategistUpdated {
            strategist,
            allowed,
        });
    }

    /// Revert unless the caller is governance
    pub fn only_governance(&self) {
        let caller = self.env().caller();
        if caller != self.governance() {
            self.env().revert(VaultError::NotGovernance);
        }
    }

    /// Revert unless the caller is a strategist or governance
    pub fn only_strategist(&self) {
        let caller = self.env().caller();
        if caller != self.governance() && !self.is_strategist(caller) {
            self.env().revert(VaultError::NotStrategist);
        }
    }
}
