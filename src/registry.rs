//! Ordered address registry with swap-and-pop removal
//!
//! Entries live in numbered slots with a reverse position map, giving O(1)
//! membership checks and O(1) removal. Removing an entry moves the last
//! entry into the freed slot, so positions are NOT stable across removals.
use odra::prelude::*;
use crate::errors::VaultError;

/// Registry of supported addresses (composite constituents, strategies)
#[odra::module]
pub struct ConstituentRegistry {
    /// Slot mapping: position -> address
    slots: Mapping<u32, Address>,
    /// Position mapping: address -> position
    positions: Mapping<Address, u32>,
    /// Membership flags
    supported: Mapping<Address, bool>,
    /// Number of occupied slots
    len: Var<u32>,
}

#[odra::module]
impl ConstituentRegistry {
    /// Check whether an address is registered
    pub fn contains(&self, entry: Address) -> bool {
        self.supported.get(&entry).unwrap_or(false)
    }

    /// Number of registered addresses
    pub fn len(&self) -> u32 {
        self.len.get_or_default()
    }

    /// Address stored at a position
    pub fn get(&self, position: u32) -> Option<Address> {
        if position >= self.len() {
            return None;
        }
        self.slots.get(&position)
    }

    /// All registered addresses in slot order
    pub fn all(&self) -> Vec<Address> {
        (0..self.len())
            .filter_map(|position| self.slots.get(&position))
            .collect()
    }

    /// Append an address
    pub fn add(&mut self, entry: Address) {
        if self.contains(entry) {
            self.env().revert(VaultError::AlreadyRegistered);
        }
        let position = self.len();
        self.slots.set(&position, entry);
        self.positions.set(&entry, position);
        self.supported.set(&entry, true);
        self.len.set(position + 1);
    }

    /// Remove an address, moving the last entry into its slot
    pub fn remove(&mut self, entry: Address) {
        if !self.contains(entry) {
            self.env().revert(VaultError::NotRegistered);
        }
        let position = self
            .positions
            .get(&entry)
            .unwrap_or_revert_with(&self.env(), VaultError::NotRegistered);
        let last_position = self.len() - 1;

        if position != last_position {
            let last = self
                .slots
                .get(&last_position)
                .unwrap_or_revert_with(&self.env(), VaultError::NotRegistered);
            self.slots.set(&position, last);
            self.positions.set(&last, position);
        }

        self.supported.set(&entry, false);
        self.len.set(last_position);
    }
}
