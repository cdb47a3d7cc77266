//! Shared fixtures for contract tests
use odra::casper_types::U256;
use odra::host::{Deployer, HostEnv};
use odra::prelude::*;
use crate::mocks::{
    MockStrategy, MockStrategyHostRef, MockStrategyInitArgs, MockToken, MockTokenHostRef,
    MockTokenInitArgs,
};
use crate::single::single_plus::{SinglePlusHostRef, SinglePlusInitArgs};
use crate::single::SinglePlus;

/// Rounding slack allowed when a value passes through several floored divisions
pub const TOLERANCE: u64 = 10;

/// Parse a decimal string into a fixed-point amount with `decimals` digits
pub fn units(value: &str, decimals: usize) -> U256 {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    let mut digits = String::from(whole);
    let mut fraction = String::from(fraction);
    while fraction.len() < decimals {
        fraction.push('0');
    }
    digits.push_str(&fraction);
    U256::from_dec_str(&digits).unwrap()
}

/// Parse a decimal string into an 18-digit value
pub fn wad(value: &str) -> U256 {
    units(value, 18)
}

/// Assert two values are equal up to `TOLERANCE` units of the last digit
pub fn assert_close(actual: U256, expected: U256) {
    let diff = if actual > expected { actual - expected } else { expected - actual };
    assert!(
        diff <= U256::from(TOLERANCE),
        "expected {}, got {}",
        expected,
        actual
    );
}

/// A single plus vault with its underlying token and active mock strategy
pub struct PlusSetup {
    pub token: MockTokenHostRef,
    pub plus: SinglePlusHostRef,
    pub strategy: MockStrategyHostRef,
    pub decimals: u8,
}

impl PlusSetup {
    /// Deploy token, vault and strategy; the current caller becomes governance
    pub fn deploy(env: &HostEnv, symbol: &str, decimals: u8) -> Self {
        let token = MockToken::deploy(
            env,
            MockTokenInitArgs {
                name: String::from(symbol),
                symbol: String::from(symbol),
                decimals,
            },
        );
        let mut plus = SinglePlus::deploy(
            env,
            SinglePlusInitArgs {
                token: token.address().clone(),
                name: String::new(),
                symbol: String::new(),
            },
        );
        let strategy = MockStrategy::deploy(
            env,
            MockStrategyInitArgs {
                vault: plus.address().clone(),
                token: token.address().clone(),
            },
        );
        plus.approve_strategy(strategy.address().clone(), true);

        Self {
            token,
            plus,
            strategy,
            decimals,
        }
    }

    /// Vault address
    pub fn address(&self) -> Address {
        self.plus.address().clone()
    }

    /// Underlying amount in native precision
    pub fn native(&self, value: &str) -> U256 {
        units(value, self.decimals as usize)
    }

    /// Mint underlying to `user` and deposit it into the vault as `user`
    pub fn deposit(&mut self, env: &HostEnv, user: Address, value: &str) -> U256 {
        let amount = self.native(value);
        self.token.mint(user, amount);
        env.set_caller(user);
        self.token.approve(self.address(), amount);
        self.plus.mint(amount)
    }

    /// Send yield straight to the strategy, as if it had been earned
    pub fn accrue(&mut self, value: &str) {
        let amount = self.native(value);
        self.token.mint(self.strategy.address().clone(), amount);
    }

    /// Destroy underlying held by the strategy, as if it had been lost
    pub fn slash(&mut self, value: &str) {
        let amount = self.native(value);
        self.token.burn(self.strategy.address().clone(), amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units() {
        assert_eq!(wad("1"), U256::from(1_000_000_000_000_000_000u128));
        assert_eq!(wad("2.4"), U256::from(2_400_000_000_000_000_000u128));
        assert_eq!(units("20", 6), U256::from(20_000_000u64));
        assert_eq!(units("0.792", 6), U256::from(792_000u64));
    }
}
