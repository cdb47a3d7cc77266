//! Composite Plus - rebasing index token over a basket of plus tokens
//!
//! Every constituent is itself an 18-digit plus token assumed to be near
//! pegged to the others, so deposited amounts add up directly into value.
//!
//! Redemption debits the full gross value from the ledger but pays out only
//! the value net of the redeem fee. The fee stays behind as constituent
//! balance that the ledger does not record yet; the next `rebase` picks it
//! up and spreads it over the remaining holders as index growth.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::CompositeError;
use super::events::*;
use crate::access::AccessControl;
use crate::errors::VaultError;
use crate::math::{RebaseMath, SafeMath};
use crate::registry::ConstituentRegistry;
use crate::token::{Cep18TokenContractRef, PlusToken};

/// Outcome of a redeem request
#[odra::odra_type]
pub struct RedeemQuote {
    /// Constituents paid out, in registry order
    pub tokens: Vec<Address>,
    /// Amount of each constituent paid out
    pub amounts: Vec<U256>,
    /// Shares burned
    pub shares: U256,
    /// Gross value removed from the ledger
    pub value: U256,
    /// Fee left in the vault
    pub fee: U256,
}

/// Composite Plus contract
#[odra::module]
pub struct CompositePlus {
    /// Rebasing token surface
    plus: SubModule<PlusToken>,
    /// Governance and strategist roles
    access: SubModule<AccessControl>,
    /// Supported constituents
    constituents: SubModule<ConstituentRegistry>,
    /// Addresses allowed to rebalance the basket
    rebalancers: Mapping<Address, bool>,
}

#[odra::module]
impl CompositePlus {
    /// Initialize the composite token
    pub fn init(&mut self, name: String, symbol: String) {
        let caller = self.env().caller();
        self.plus.init(name, symbol);
        self.access.init(caller);
    }

    // ========================================
    // Token Functions
    // ========================================

    pub fn name(&self) -> String {
        self.plus.name()
    }

    pub fn symbol(&self) -> String {
        self.plus.symbol()
    }

    pub fn decimals(&self) -> u8 {
        self.plus.decimals()
    }

    pub fn total_supply(&self) -> U256 {
        self.plus.total_supply()
    }

    pub fn total_shares(&self) -> U256 {
        self.plus.total_shares()
    }

    pub fn index(&self) -> U256 {
        self.plus.index()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.plus.balance_of(owner)
    }

    pub fn user_share(&self, owner: Address) -> U256 {
        self.plus.user_share(owner)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.plus.allowance(owner, spender)
    }

    pub fn transfer(&mut self, to: Address, value: U256) -> bool {
        self.plus.transfer(to, value)
    }

    pub fn approve(&mut self, spender: Address, value: U256) -> bool {
        self.plus.approve(spender, value)
    }

    pub fn transfer_from(&mut self, from: Address, to: Address, value: U256) -> bool {
        self.plus.transfer_from(from, to, value)
    }

    // ========================================
    // Basket Views
    // ========================================

    /// Constituent at a registry position.
    /// Positions are not stable across `remove_token`.
    pub fn tokens(&self, index: u32) -> Address {
        self.constituents
            .get(index)
            .unwrap_or_revert_with(&self.env(), CompositeError::TokenNotExists)
    }

    /// All constituents in registry order
    pub fn token_list(&self) -> Vec<Address> {
        self.constituents.all()
    }

    /// Check whether a constituent is supported
    pub fn token_supported(&self, token: Address) -> bool {
        self.constituents.contains(token)
    }

    /// Check whether an address may rebalance
    pub fn rebalancers(&self, account: Address) -> bool {
        self.rebalancers.get(&account).unwrap_or(false)
    }

    pub fn min_liquidity_ratio(&self) -> u32 {
        self.plus.min_liquidity_ratio()
    }

    pub fn redeem_fee(&self) -> u32 {
        self.plus.redeem_fee()
    }

    // ========================================
    // Mint / Redeem / Rebase
    // ========================================

    /// Value a mint of these constituents would credit.
    /// The sum is independent of the order of the pairs.
    pub fn get_mint_amount(&self, tokens: Vec<Address>, amounts: Vec<U256>) -> U256 {
        self.mint_value(&tokens, &amounts)
    }

    /// Deposit constituents and receive composite tokens.
    /// Value is credited 1:1 at the current index. Returns the value credited.
    pub fn mint(&mut self, tokens: Vec<Address>, amounts: Vec<U256>) -> U256 {
        self.plus.lock();

        let value = self.mint_value(&tokens, &amounts);
        let caller = self.env().caller();
        let self_address = self.env().self_address();

        for (token, amount) in tokens.iter().zip(amounts.iter()) {
            if amount.is_zero() {
                continue;
            }
            let mut token_ref = Cep18TokenContractRef::new(self.env(), *token);
            if !token_ref.transfer_from(caller, self_address, *amount) {
                self.env().revert(VaultError::TransferFailed);
            }
        }

        let shares = self.plus.mint(caller, value);

        self.env().emit_event(Minted {
            account: caller,
            tokens,
            amounts,
            value,
            shares,
        });

        self.plus.unlock();
        value
    }

    /// Constituents, amounts, shares and fee a redeem of `amount` would
    /// produce for the caller
    pub fn get_redeem_amount(&self, amount: U256) -> RedeemQuote {
        let caller = self.env().caller();
        self.quote_redeem(caller, amount)
    }

    /// Redeem `amount` of value for a pro-rata slice of every constituent;
    /// `U256::MAX` redeems the whole balance. Returns the value paid out.
    pub fn redeem(&mut self, amount: U256) -> U256 {
        self.plus.lock();

        let caller = self.env().caller();
        let quote = self.quote_redeem(caller, amount);

        self.plus.burn(caller, quote.shares);

        for (token, amount) in quote.tokens.iter().zip(quote.amounts.iter()) {
            if amount.is_zero() {
                continue;
            }
            let mut token_ref = Cep18TokenContractRef::new(self.env(), *token);
            if !token_ref.transfer(caller, *amount) {
                self.env().revert(VaultError::TransferFailed);
            }
        }

        let paid = quote.value - quote.fee;
        self.env().emit_event(Redeemed {
            account: caller,
            tokens: quote.tokens,
            amounts: quote.amounts,
            value: quote.value,
            shares: quote.shares,
            fee: quote.fee,
        });

        self.plus.unlock();
        paid
    }

    /// Re-derive total value from the live constituent balances
    pub fn rebase(&mut self) {
        self.plus.lock();
        let total_value = self.holdings_value();
        self.plus.rebase(total_value);
        self.plus.unlock();
    }

    // ========================================
    // Admin Functions
    // ========================================

    /// Add a supported constituent
    pub fn add_token(&mut self, token: Address) {
        self.access.only_governance();
        if self.constituents.contains(token) {
            self.env().revert(CompositeError::TokenExists);
        }
        self.constituents.add(token);
        self.env().emit_event(TokenAdded { token });
    }

    /// Remove a constituent the vault no longer holds.
    /// The last constituent moves into the freed position.
    pub fn remove_token(&mut self, token: Address) {
        self.access.only_governance();
        if !self.constituents.contains(token) {
            self.env().revert(CompositeError::TokenNotExists);
        }
        if !self.holding(token).is_zero() {
            self.env().revert(CompositeError::NonzeroBalance);
        }
        self.constituents.remove(token);
        self.env().emit_event(TokenRemoved { token });
    }

    pub fn add_rebalancer(&mut self, rebalancer: Address) {
        self.access.only_governance();
        self.rebalancers.set(&rebalancer, true);
        self.env().emit_event(RebalancerUpdated {
            rebalancer,
            allowed: true,
        });
    }

    pub fn remove_rebalancer(&mut self, rebalancer: Address) {
        self.access.only_governance();
        self.rebalancers.set(&rebalancer, false);
        self.env().emit_event(RebalancerUpdated {
            rebalancer,
            allowed: false,
        });
    }

    pub fn set_min_liquidity_ratio(&mut self, ratio: u32) {
        self.access.only_governance();
        self.plus.set_min_liquidity_ratio(ratio);
    }

    pub fn set_redeem_fee(&mut self, fee: u32) {
        self.access.only_governance();
        self.plus.set_redeem_fee(fee);
    }

    pub fn governance(&self) -> Address {
        self.access.governance()
    }

    pub fn is_strategist(&self, account: Address) -> bool {
        self.access.is_strategist(account)
    }

    pub fn set_governance(&mut self, governance: Address) {
        self.access.set_governance(governance);
    }

    pub fn set_strategist(&mut self, strategist: Address, allowed: bool) {
        self.access.set_strategist(strategist, allowed);
    }

    // ========================================
    // Internal Functions
    // ========================================

    fn mint_value(&self, tokens: &[Address], amounts: &[U256]) -> U256 {
        if tokens.len() != amounts.len() {
            self.env().revert(VaultError::LengthMismatch);
        }
        for token in tokens {
            if !self.constituents.contains(*token) {
                self.env().revert(CompositeError::TokenNotExists);
            }
        }
        let value = SafeMath::sum(amounts).unwrap_or_revert(&self.env());
        if value.is_zero() {
            self.env().revert(VaultError::InvalidAmount);
        }
        value
    }

    fn quote_redeem(&self, owner: Address, requested: U256) -> RedeemQuote {
        let (shares, value) = self.plus.redeemable(owner, requested);
        if value.is_zero() {
            self.env().revert(VaultError::InvalidAmount);
        }
        let fee = self.plus.redeem_fee_on(value);

        let tokens = self.constituents.all();
        let holdings: Vec<U256> = tokens.iter().map(|token| self.holding(*token)).collect();
        let amounts = RebaseMath::pro_rata(value - fee, &holdings)
            .unwrap_or_revert(&self.env());

        RedeemQuote {
            tokens,
            amounts,
            shares,
            value,
            fee,
        }
    }

    /// Balance of a constituent held by this contract
    fn holding(&self, token: Address) -> U256 {
        let token_ref = Cep18TokenContractRef::new(self.env(), token);
        token_ref.balance_of(self.env().self_address())
    }

    /// Sum of all constituent balances held by this contract
    fn holdings_value(&self) -> U256 {
        let holdings: Vec<U256> = self
            .constituents
            .all()
            .iter()
            .map(|token| self.holding(*token))
            .collect();
        SafeMath::sum(&holdings).unwrap_or_revert(&self.env())
    }
}
