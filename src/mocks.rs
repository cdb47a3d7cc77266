//! Mock collaborators for exercising the plus vaults
//! Each mock is a separate module so Odra can deploy them independently
use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::errors::{TokenError, VaultError};
use crate::events::{Approval, Transfer};
use crate::composite::composite_plus::CompositePlusContractRef;
use crate::math::SafeMath;

/// Mock CEP-18 token with configurable decimals and open minting
#[odra::module]
pub struct MockToken {
    name: Var<String>,
    symbol: Var<String>,
    decimals: Var<u8>,
    total_supply: Var<U256>,
    balances: Mapping<Address, U256>,
    allowances: Mapping<(Address, Address), U256>,
}

#[odra::module]
impl MockToken {
    pub fn init(&mut self, name: String, symbol: String, decimals: u8) {
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(decimals);
        self.total_supply.set(U256::zero());
    }

    pub fn name(&self) -> String { self.name.get_or_default() }
    pub fn symbol(&self) -> String { self.symbol.get_or_default() }
    pub fn decimals(&self) -> u8 { self.decimals.get_or_default() }
    pub fn total_supply(&self) -> U256 { self.total_supply.get_or_default() }
    pub fn balance_of(&self, owner: Address) -> U256 { self.balances.get(&owner).unwrap_or_default() }
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 { self.allowances.get(&(owner, spender)).unwrap_or_default() }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.transfer_internal(caller, to, amount);
        true
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.approve_internal(caller, spender, amount);
        true
    }

    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        let current_allowance = self.allowance(from, caller);
        if current_allowance < amount { self.env().revert(TokenError::InsufficientAllowance); }
        self.approve_internal(from, caller, current_allowance - amount);
        self.transfer_internal(from, to, amount);
        true
    }

    pub fn mint(&mut self, to: Address, amount: U256) {
        let current_supply = self.total_supply();
        self.total_supply.set(current_supply + amount);
        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);
        self.env().emit_event(Transfer { from: self.env().self_address(), to, value: amount });
    }

    /// Destroy tokens held by any address, standing in for a loss
    pub fn burn(&mut self, from: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount { self.env().revert(TokenError::InsufficientBalance); }
        self.balances.set(&from, from_balance - amount);
        let current_supply = self.total_supply();
        self.total_supply.set(current_supply - amount);
        self.env().emit_event(Transfer { from, to: self.env().self_address(), value: amount });
    }

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount { self.env().revert(TokenError::InsufficientBalance); }
        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);
        self.env().emit_event(Transfer { from, to, value: amount });
    }

    fn approve_internal(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);
        self.env().emit_event(Approval { owner, spender, value: amount });
    }
}

/// Mock strategy holding underlying for one vault.
/// Every harvest mints 20% of its holdings as yield.
#[odra::module]
pub struct MockStrategy {
    vault: Var<Address>,
    token: Var<Address>,
    invested: Var<U256>,
}

#[odra::module]
impl MockStrategy {
    pub fn init(&mut self, vault: Address, token: Address) {
        self.vault.set(vault);
        self.token.set(token);
        self.invested.set(U256::zero());
    }

    /// Total underlying handed over by the vault
    pub fn invested(&self) -> U256 {
        self.invested.get_or_default()
    }

    pub fn invest(&mut self, amount: U256) {
        self.only_vault();
        let invested = self.invested();
        self.invested.set(invested + amount);
    }

    pub fn harvest(&mut self) {
        let self_address = self.env().self_address();
        let yield_amount = self.harvestable_value() / U256::from(5);
        if !yield_amount.is_zero() {
            MockTokenContractRef::new(self.env(), self.token()).mint(self_address, yield_amount);
        }
    }

    pub fn withdraw(&mut self, amount: U256) {
        self.only_vault();
        let vault = self.vault.get_or_revert_with(VaultError::Unauthorized);
        let amount = SafeMath::min(amount, self.harvestable_value());
        if !MockTokenContractRef::new(self.env(), self.token()).transfer(vault, amount) {
            self.env().revert(VaultError::TransferFailed);
        }
    }

    pub fn harvestable_value(&self) -> U256 {
        let self_address = self.env().self_address();
        MockTokenContractRef::new(self.env(), self.token()).balance_of(self_address)
    }

    fn token(&self) -> Address {
        self.token.get_or_revert_with(VaultError::Unauthorized)
    }

    fn only_vault(&self) {
        let vault = self.vault.get_or_revert_with(VaultError::Unauthorized);
        if self.env().caller() != vault {
            self.env().revert(VaultError::Unauthorized);
        }
    }
}

/// Constituent token that calls `rebase` on a composite vault while the
/// vault is pulling it in through `transfer_from`
#[odra::module]
pub struct ReentrantToken {
    token: SubModule<MockToken>,
    target: Var<Option<Address>>,
}

#[odra::module]
impl ReentrantToken {
    pub fn init(&mut self, name: String, symbol: String) {
        self.token.init(name, symbol, 18);
        self.target.set(None);
    }

    /// Composite vault to call back into
    pub fn set_target(&mut self, target: Address) {
        self.target.set(Some(target));
    }

    pub fn decimals(&self) -> u8 { self.token.decimals() }
    pub fn balance_of(&self, owner: Address) -> U256 { self.token.balance_of(owner) }
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 { self.token.allowance(owner, spender) }
    pub fn mint(&mut self, to: Address, amount: U256) { self.token.mint(to, amount) }
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool { self.token.transfer(to, amount) }
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool { self.token.approve(spender, amount) }

    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        if let Some(target) = self.target.get_or_default() {
            CompositePlusContractRef::new(self.env(), target).rebase();
        }
        self.token.transfer_from(from, to, amount)
    }
}
