//! CEP-18 compatible surface shared by every plus token
//!
//! Balances are not stored: they are derived from ledger shares at the
//! current index, so a rebase moves every balance at once.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::VaultError;
use crate::events::{Approval, MinLiquidityRatioUpdated, Rebased, RedeemFeeUpdated, Transfer};
use crate::ledger::RebaseLedger;
use crate::math::{RebaseMath, MAX_PERCENT, PLUS_DECIMALS};

/// Plus token base module: rebasing balances, vault config and reentrancy lock
#[odra::module]
pub struct PlusToken {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Share/index ledger
    ledger: SubModule<RebaseLedger>,
    /// Allowance mapping: owner -> spender -> value
    allowances: Mapping<(Address, Address), U256>,
    /// Share of value kept liquid, in basis points
    min_liquidity_ratio: Var<u32>,
    /// Redeem fee in basis points
    redeem_fee: Var<u32>,
    /// Reentrancy lock
    locked: Var<bool>,
}

#[odra::module]
impl PlusToken {
    /// Initialize the token with name and symbol
    pub fn init(&mut self, name: String, symbol: String) {
        self.name.set(name);
        self.symbol.set(symbol);
        self.min_liquidity_ratio.set(0);
        self.redeem_fee.set(0);
        self.locked.set(false);
    }

    /// Get the token name
    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    /// Get the token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    /// Get the token decimals
    pub fn decimals(&self) -> u8 {
        PLUS_DECIMALS
    }

    /// Total supply equals the value recorded in the ledger
    pub fn total_supply(&self) -> U256 {
        self.ledger.total_value()
    }

    /// Get the total number of shares
    pub fn total_shares(&self) -> U256 {
        self.ledger.total_shares()
    }

    /// Get the value per share (scaled by 1e18)
    pub fn index(&self) -> U256 {
        self.ledger.index()
    }

    /// Get the balance of an address
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.ledger.balance_of(owner)
    }

    /// Get the shares of an address
    pub fn user_share(&self, owner: Address) -> U256 {
        self.ledger.shares_of(owner)
    }

    /// Get the allowance for a spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    /// Get the minimum liquidity ratio in basis points
    pub fn min_liquidity_ratio(&self) -> u32 {
        self.min_liquidity_ratio.get_or_default()
    }

    /// Get the redeem fee in basis points
    pub fn redeem_fee(&self) -> u32 {
        self.redeem_fee.get_or_default()
    }

    /// Transfer value to another address
    pub fn transfer(&mut self, to: Address, value: U256) -> bool {
        let caller = self.env().caller();
        self.transfer_internal(caller, to, value);
        true
    }

    /// Approve a spender to spend value
    pub fn approve(&mut self, spender: Address, value: U256) -> bool {
        let caller = self.env().caller();
        self.approve_internal(caller, spender, value);
        true
    }

    /// Transfer value from one address to another (requires approval)
    pub fn transfer_from(&mut self, from: Address, to: Address, value: U256) -> bool {
        let caller = self.env().caller();
        let current_allowance = self.allowance(from, caller);

        if current_allowance < value {
            self.env().revert(VaultError::InsufficientAllowance);
        }

        self.approve_internal(from, caller, current_allowance - value);
        self.transfer_internal(from, to, value);
        true
    }

    /// Credit freshly deposited value to a holder. Returns the shares minted.
    pub fn mint(&mut self, to: Address, value: U256) -> U256 {
        let shares = self.ledger.mint(to, value);
        self.env().emit_event(Transfer {
            from: self.env().self_address(),
            to,
            value,
        });
        shares
    }

    /// Burn shares of a holder. Returns the value removed from the ledger.
    pub fn burn(&mut self, from: Address, shares: U256) -> U256 {
        let value = self.ledger.redeem_shares(from, shares);
        self.env().emit_event(Transfer {
            from,
            to: self.env().self_address(),
            value,
        });
        value
    }

    /// Resolve a redeem request into `(shares, value)`.
    ///
    /// `U256::MAX` or anything above the balance means the whole balance,
    /// which burns every share the holder owns.
    pub fn redeemable(&self, owner: Address, requested: U256) -> (U256, U256) {
        let balance = self.balance_of(owner);
        if requested >= balance {
            let shares = self.user_share(owner);
            return (shares, self.ledger.shares_to_value(shares));
        }
        let shares = self.ledger.value_to_shares(requested);
        (shares, self.ledger.shares_to_value(shares))
    }

    /// Re-price the ledger to `new_total_value`. Returns the new index.
    pub fn rebase(&mut self, new_total_value: U256) -> U256 {
        let old_index = self.ledger.index();
        self.ledger.rebase(new_total_value);
        let new_index = self.ledger.index();

        self.env().emit_event(Rebased {
            old_index,
            new_index,
            total_value: new_total_value,
            total_shares: self.ledger.total_shares(),
        });
        new_index
    }

    /// Update the minimum liquidity ratio (caller checks governance)
    pub fn set_min_liquidity_ratio(&mut self, ratio: u32) {
        if ratio > MAX_PERCENT {
            self.env().revert(VaultError::InvalidRatio);
        }
        let old_ratio = self.min_liquidity_ratio();
        self.min_liquidity_ratio.set(ratio);
        self.env().emit_event(MinLiquidityRatioUpdated {
            old_ratio,
            new_ratio: ratio,
        });
    }

    /// Update the redeem fee (caller checks governance)
    pub fn set_redeem_fee(&mut self, fee: u32) {
        if fee >= MAX_PERCENT {
            self.env().revert(VaultError::InvalidFee);
        }
        let old_fee = self.redeem_fee();
        self.redeem_fee.set(fee);
        self.env().emit_event(RedeemFeeUpdated {
            old_fee,
            new_fee: fee,
        });
    }

    /// Fee charged on a redeemed value
    pub fn redeem_fee_on(&self, value: U256) -> U256 {
        RebaseMath::fee(value, self.redeem_fee()).unwrap_or_revert(&self.env())
    }

    /// Reentrancy lock
    pub fn lock(&mut self) {
        if self.locked.get_or_default() {
            self.env().revert(VaultError::Reentrant);
        }
        self.locked.set(true);
    }

    /// Reentrancy unlock
    pub fn unlock(&mut self) {
        self.locked.set(false);
    }

    /// Internal transfer: value converts to shares at the current index
    fn transfer_internal(&mut self, from: Address, to: Address, value: U256) {
        let shares = if value == self.balance_of(from) {
            self.user_share(from)
        } else {
            self.ledger.value_to_shares(value)
        };
        self.ledger.transfer_shares(from, to, shares);

        self.env().emit_event(Transfer {
            from,
            to,
            value,
        });
    }

    /// Internal approve function
    fn approve_internal(&mut self, owner: Address, spender: Address, value: U256) {
        self.allowances.set(&(owner, spender), value);
        self.env().emit_event(Approval {
            owner,
            spender,
            value,
        });
    }
}

/// External token interface for interacting with CEP-18 tokens
#[odra::external_contract]
pub trait Cep18Token {
    /// Get the balance of an address
    fn balance_of(&self, owner: Address) -> U256;

    /// Transfer tokens
    fn transfer(&mut self, to: Address, amount: U256) -> bool;

    /// Transfer tokens from another address
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;

    /// Approve a spender
    fn approve(&mut self, spender: Address, amount: U256) -> bool;

    /// Get allowance
    fn allowance(&self, owner: Address, spender: Address) -> U256;

    /// Get token name
    fn name(&self) -> String;

    /// Get token symbol
    fn symbol(&self) -> String;

    /// Get token decimals
    fn decimals(&self) -> u8;
}
