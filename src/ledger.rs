//! Share/index rebasing ledger
//!
//! Holders own shares; the value behind every share is
//! `total_value / total_shares`. Minting and redeeming move value and shares
//! together at the current index, transfers move shares only, and a rebase
//! overwrites `total_value` alone so every balance scales uniformly.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::VaultError;
use crate::math::{RebaseMath, SafeMath};

/// Rebasing ledger used by every plus token
#[odra::module]
pub struct RebaseLedger {
    /// Value attributed to all shares
    total_value: Var<U256>,
    /// Sum of all holder shares
    total_shares: Var<U256>,
    /// Shares mapping: holder -> shares
    shares: Mapping<Address, U256>,
}

#[odra::module]
impl RebaseLedger {
    /// Get the total recorded value
    pub fn total_value(&self) -> U256 {
        self.total_value.get_or_default()
    }

    /// Get the total number of shares
    pub fn total_shares(&self) -> U256 {
        self.total_shares.get_or_default()
    }

    /// Get the shares owned by a holder
    pub fn shares_of(&self, holder: Address) -> U256 {
        self.shares.get(&holder).unwrap_or_default()
    }

    /// Current value per share, scaled by 1e18
    pub fn index(&self) -> U256 {
        RebaseMath::index(self.total_value(), self.total_shares())
            .unwrap_or_revert(&self.env())
    }

    /// Value currently owned by a holder
    pub fn balance_of(&self, holder: Address) -> U256 {
        self.shares_to_value(self.shares_of(holder))
    }

    /// Shares worth `value` at the current index (floored)
    pub fn value_to_shares(&self, value: U256) -> U256 {
        RebaseMath::shares_for_value(value, self.total_value(), self.total_shares())
            .unwrap_or_revert(&self.env())
    }

    /// Value backing `shares` at the current index (floored)
    pub fn shares_to_value(&self, shares: U256) -> U256 {
        RebaseMath::value_for_shares(shares, self.total_value(), self.total_shares())
            .unwrap_or_revert(&self.env())
    }

    /// Credits `value` to a holder at the pre-mint index.
    /// Returns the shares credited.
    pub fn mint(&mut self, holder: Address, value: U256) -> U256 {
        if value.is_zero() {
            self.env().revert(VaultError::InvalidAmount);
        }
        let total_value = self.total_value();
        let total_shares = self.total_shares();
        let credited = RebaseMath::shares_for_value(value, total_value, total_shares)
            .unwrap_or_revert(&self.env());

        let holder_shares = SafeMath::add(self.shares_of(holder), credited)
            .unwrap_or_revert(&self.env());
        let new_total_shares = SafeMath::add(total_shares, credited)
            .unwrap_or_revert(&self.env());
        let new_total_value = SafeMath::add(total_value, value)
            .unwrap_or_revert(&self.env());

        self.shares.set(&holder, holder_shares);
        self.total_shares.set(new_total_shares);
        self.total_value.set(new_total_value);
        credited
    }

    /// Burns `share_amount` of a holder's shares and removes the value they
    /// back from the ledger. Returns that value.
    pub fn redeem_shares(&mut self, holder: Address, share_amount: U256) -> U256 {
        let holder_shares = self.shares_of(holder);
        if share_amount > holder_shares {
            self.env().revert(VaultError::InsufficientShares);
        }
        let total_value = self.total_value();
        let total_shares = self.total_shares();
        let value = RebaseMath::value_for_shares(share_amount, total_value, total_shares)
            .unwrap_or_revert(&self.env());

        self.shares.set(&holder, holder_shares - share_amount);
        self.total_shares.set(
            SafeMath::sub(total_shares, share_amount).unwrap_or_revert(&self.env()),
        );
        self.total_value.set(
            SafeMath::sub(total_value, value).unwrap_or_revert(&self.env()),
        );
        value
    }

    /// Moves shares between holders; totals are unchanged
    pub fn transfer_shares(&mut self, from: Address, to: Address, share_amount: U256) {
        let from_shares = self.shares_of(from);
        if share_amount > from_shares {
            self.env().revert(VaultError::InsufficientShares);
        }
        self.shares.set(&from, from_shares - share_amount);
        let to_shares = SafeMath::add(self.shares_of(to), share_amount)
            .unwrap_or_revert(&self.env());
        self.shares.set(&to, to_shares);
    }

    /// Overwrites the total value; shares never move.
    /// Returns the previous total value.
    pub fn rebase(&mut self, new_total_value: U256) -> U256 {
        let old_total_value = self.total_value();
        self.total_value.set(new_total_value);
        old_total_value
    }
}
