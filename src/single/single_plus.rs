//! Single Plus - rebasing wrapper around one underlying asset
//!
//! Deposits are normalized to 18 digits and credited through the rebasing
//! ledger. Idle funds above the liquidity floor are moved into the active
//! strategy; `rebase` re-prices the ledger to idle funds plus whatever the
//! approved strategies report.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::SingleError;
use super::events::*;
use crate::access::AccessControl;
use crate::errors::VaultError;
use crate::math::{RebaseMath, SafeMath, MAX_PERCENT};
use crate::registry::ConstituentRegistry;
use crate::strategy::StrategyContractRef;
use crate::token::{Cep18TokenContractRef, PlusToken};

/// Single Plus contract
#[odra::module]
pub struct SinglePlus {
    /// Rebasing token surface
    plus: SubModule<PlusToken>,
    /// Governance and strategist roles
    access: SubModule<AccessControl>,
    /// Underlying CEP-18 token
    token: Var<Address>,
    /// Multiplier from underlying precision to 18 digits
    normalization_factor: Var<U256>,
    /// Approved strategies
    strategies: SubModule<ConstituentRegistry>,
    /// Strategy receiving invested funds
    active_strategy: Var<Option<Address>>,
    /// Value reported by the strategies at the last rebase (18 digits)
    strategy_value: Var<U256>,
}

#[odra::module]
impl SinglePlus {
    /// Initialize the vault around an underlying token.
    /// Empty name/symbol default to "<underlying> Plus" / "<underlying>+".
    pub fn init(&mut self, token: Address, name: String, symbol: String) {
        let caller = self.env().caller();
        let underlying = Cep18TokenContractRef::new(self.env(), token);

        let factor = RebaseMath::normalization_factor(underlying.decimals())
            .unwrap_or_revert_with(&self.env(), SingleError::UnsupportedDecimals);

        let name = if name.is_empty() {
            let mut name = underlying.name();
            name.push_str(" Plus");
            name
        } else {
            name
        };
        let symbol = if symbol.is_empty() {
            let mut symbol = underlying.symbol();
            symbol.push('+');
            symbol
        } else {
            symbol
        };

        self.token.set(token);
        self.normalization_factor.set(factor);
        self.strategy_value.set(U256::zero());
        self.active_strategy.set(None);
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
    // Vault Views
    // ========================================

    /// Underlying token address
    pub fn token(&self) -> Address {
        self.underlying_token()
    }

    /// Multiplier from underlying precision to 18 digits
    pub fn normalization_factor(&self) -> U256 {
        self.factor()
    }

    /// Idle underlying held by the vault, normalized to 18 digits
    pub fn idle_balance(&self) -> U256 {
        SafeMath::mul(self.underlying_balance(), self.factor()).unwrap_or_revert(&self.env())
    }

    /// Strategy value recorded at the last rebase (18 digits)
    pub fn strategy_value(&self) -> U256 {
        self.strategy_value.get_or_default()
    }

    /// Approved strategies
    pub fn strategies(&self) -> Vec<Address> {
        self.strategies.all()
    }

    /// Check whether a strategy is approved
    pub fn is_strategy_approved(&self, strategy: Address) -> bool {
        self.strategies.contains(strategy)
    }

    /// Strategy currently receiving invested funds
    pub fn active_strategy(&self) -> Option<Address> {
        self.active_strategy.get_or_default()
    }

    pub fn min_liquidity_ratio(&self) -> u32 {
        self.plus.min_liquidity_ratio()
    }

    pub fn redeem_fee(&self) -> u32 {
        self.plus.redeem_fee()
    }

    /// Underlying amount a redeem of `amount` would pay the caller
    pub fn get_redeem_amount(&self, amount: U256) -> U256 {
        let caller = self.env().caller();
        let (_, value) = self.plus.redeemable(caller, amount);
        let fee = self.plus.redeem_fee_on(value);
        SafeMath::div(value - fee, self.factor()).unwrap_or_revert(&self.env())
    }

    // ========================================
    // Deposit / Redeem
    // ========================================

    /// Deposit `amount` of underlying. Returns the value credited.
    pub fn mint(&mut self, amount: U256) -> U256 {
        self.plus.lock();

        if amount.is_zero() {
            self.env().revert(VaultError::InvalidAmount);
        }
        let caller = self.env().caller();
        let self_address = self.env().self_address();

        let mut underlying = Cep18TokenContractRef::new(self.env(), self.underlying_token());
        if !underlying.transfer_from(caller, self_address, amount) {
            self.env().revert(VaultError::TransferFailed);
        }

        let value = SafeMath::mul(amount, self.factor()).unwrap_or_revert(&self.env());
        let shares = self.plus.mint(caller, value);

        self.env().emit_event(Deposited {
            account: caller,
            amount,
            value,
            shares,
        });

        self.plus.unlock();
        value
    }

    /// Redeem `amount` of value for underlying; `U256::MAX` redeems the
    /// whole balance. The fee stays in the vault and reaches the remaining
    /// holders at the next rebase. Returns the underlying paid out.
    pub fn redeem(&mut self, amount: U256) -> U256 {
        self.plus.lock();

        let caller = self.env().caller();
        let (shares, value) = self.plus.redeemable(caller, amount);
        if value.is_zero() {
            self.env().revert(VaultError::InvalidAmount);
        }

        let fee = self.plus.redeem_fee_on(value);
        let underlying_amount = SafeMath::div(value - fee, self.factor())
            .unwrap_or_revert(&self.env());
        if underlying_amount.is_zero() {
            self.env().revert(VaultError::InvalidAmount);
        }

        self.plus.burn(caller, shares);
        self.ensure_liquidity(underlying_amount);
        self.safe_transfer(caller, underlying_amount);

        self.env().emit_event(Withdrawn {
            account: caller,
            amount: underlying_amount,
            value,
            shares,
            fee,
        });

        self.plus.unlock();
        underlying_amount
    }

    // ========================================
    // Strategy Loop
    // ========================================

    /// Move idle funds above the liquidity floor into the active strategy.
    /// Returns the underlying amount invested.
    pub fn invest(&mut self) -> U256 {
        self.access.only_strategist();
        self.plus.lock();

        let strategy = self
            .active_strategy()
            .unwrap_or_revert_with(&self.env(), SingleError::NoActiveStrategy);
        let factor = self.factor();
        let idle_value = self.idle_balance();
        let total_value = SafeMath::add(idle_value, self.strategies_value())
            .unwrap_or_revert(&self.env());
        let keep = SafeMath::mul_div(
            total_value,
            U256::from(self.plus.min_liquidity_ratio()),
            U256::from(MAX_PERCENT),
        )
        .unwrap_or_revert(&self.env());

        let amount = if idle_value > keep {
            (idle_value - keep) / factor
        } else {
            U256::zero()
        };

        if !amount.is_zero() {
            self.safe_transfer(strategy, amount);
            StrategyContractRef::new(self.env(), strategy).invest(amount);
            self.env().emit_event(Invested { strategy, amount });
        }

        self.plus.unlock();
        amount
    }

    /// Harvest every approved strategy and rebase. Returns the value gained.
    pub fn harvest(&mut self) -> U256 {
        self.access.only_strategist();
        self.plus.lock();

        for strategy in self.strategies.all() {
            StrategyContractRef::new(self.env(), strategy).harvest();
        }

        let old_total_value = self.plus.total_supply();
        let total_value = self.rebase_internal();
        let yield_value = total_value.saturating_sub(old_total_value);

        self.env().emit_event(Harvested {
            yield_value,
            total_value,
        });

        self.plus.unlock();
        yield_value
    }

    /// Re-price the ledger to idle funds plus strategy value
    pub fn rebase(&mut self) {
        self.plus.lock();
        self.rebase_internal();
        self.plus.unlock();
    }

    // ========================================
    // Admin Functions
    // ========================================

    /// Approve a strategy and optionally make it the active one
    pub fn approve_strategy(&mut self, strategy: Address, activate: bool) {
        self.access.only_governance();

        if !self.strategies.contains(strategy) {
            self.strategies.add(strategy);
        }
        if activate {
            self.active_strategy.set(Some(strategy));
        }

        self.env().emit_event(StrategyApproved {
            strategy,
            active: activate,
        });
    }

    /// Revoke a strategy that no longer holds funds
    pub fn revoke_strategy(&mut self, strategy: Address) {
        self.access.only_governance();

        if !self.strategies.contains(strategy) {
            self.env().revert(SingleError::StrategyNotApproved);
        }
        if !StrategyContractRef::new(self.env(), strategy).harvestable_value().is_zero() {
            self.env().revert(SingleError::StrategyNotEmpty);
        }

        self.strategies.remove(strategy);
        if self.active_strategy() == Some(strategy) {
            self.active_strategy.set(None);
        }

        self.env().emit_event(StrategyRevoked { strategy });
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

    fn rebase_internal(&mut self) -> U256 {
        let strategy_value = self.strategies_value();
        let total_value = SafeMath::add(self.idle_balance(), strategy_value)
            .unwrap_or_revert(&self.env());
        self.strategy_value.set(strategy_value);
        self.plus.rebase(total_value);
        total_value
    }

    /// Value reported by all approved strategies, normalized
    fn strategies_value(&self) -> U256 {
        let factor = self.factor();
        let mut total = U256::zero();
        for strategy in self.strategies.all() {
            let reported = StrategyContractRef::new(self.env(), strategy).harvestable_value();
            let value = SafeMath::mul(reported, factor).unwrap_or_revert(&self.env());
            total = SafeMath::add(total, value).unwrap_or_revert(&self.env());
        }
        total
    }

    /// Pull the shortfall from the strategies when idle funds cannot cover
    /// `amount`. The active strategy is drained first, then the others in
    /// registry order.
    fn ensure_liquidity(&mut self, amount: U256) {
        let mut idle = self.underlying_balance();
        if idle >= amount {
            return;
        }

        let mut sources = self.strategies.all();
        if let Some(active) = self.active_strategy() {
            sources.retain(|strategy| *strategy != active);
            sources.insert(0, active);
        }

        for strategy in sources {
            if idle >= amount {
                break;
            }
            let mut strategy_ref = StrategyContractRef::new(self.env(), strategy);
            let available = strategy_ref.harvestable_value();
            if available.is_zero() {
                continue;
            }
            strategy_ref.withdraw(SafeMath::min(amount - idle, available));
            idle = self.underlying_balance();
        }

        if idle < amount {
            self.env().revert(SingleError::InsufficientLiquidity);
        }
    }

    fn underlying_token(&self) -> Address {
        self.token.get_or_revert_with(SingleError::TokenNotSet)
    }

    fn factor(&self) -> U256 {
        self.normalization_factor.get_or_revert_with(SingleError::TokenNotSet)
    }

    /// Underlying balance of this contract (native precision)
    fn underlying_balance(&self) -> U256 {
        let token_ref = Cep18TokenContractRef::new(self.env(), self.underlying_token());
        token_ref.balance_of(self.env().self_address())
    }

    /// Safe transfer of underlying
    fn safe_transfer(&self, to: Address, amount: U256) {
        let mut token_ref = Cep18TokenContractRef::new(self.env(), self.underlying_token());
        if !token_ref.transfer(to, amount) {
            self.env().revert(VaultError::TransferFailed);
        }
    }
}
