//! Fixed-point utilities for the rebasing ledger
//! All values carry 18 fractional digits and every division floors.
use odra::casper_types::U256;
use crate::errors::VaultError;

/// One whole unit in the internal 18-digit representation
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Basis-point denominator for fees and ratios
pub const MAX_PERCENT: u32 = 10_000;

/// Number of fractional digits of every plus token
pub const PLUS_DECIMALS: u8 = 18;

/// Safe math operations for U256
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, VaultError> {
        a.checked_add(b).ok_or(VaultError::Overflow)
    }

    /// Safe subtraction with underflow check
    pub fn sub(a: U256, b: U256) -> Result<U256, VaultError> {
        a.checked_sub(b).ok_or(VaultError::Underflow)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, VaultError> {
        a.checked_mul(b).ok_or(VaultError::Overflow)
    }

    /// Safe division with zero check
    pub fn div(a: U256, b: U256) -> Result<U256, VaultError> {
        if b.is_zero() {
            return Err(VaultError::DivisionByZero);
        }
        Ok(a / b)
    }

    /// `a * b / c`, multiplying first and flooring the result
    pub fn mul_div(a: U256, b: U256, c: U256) -> Result<U256, VaultError> {
        Self::div(Self::mul(a, b)?, c)
    }

    /// Sum of a list of values
    pub fn sum(values: &[U256]) -> Result<U256, VaultError> {
        values
            .iter()
            .try_fold(U256::zero(), |acc, value| Self::add(acc, *value))
    }

    /// Returns the minimum of two U256 values
    pub fn min(a: U256, b: U256) -> U256 {
        if a < b { a } else { b }
    }
}

/// Share/index conversions of the rebasing ledger
pub struct RebaseMath;

impl RebaseMath {
    /// Shares credited for `value` at the current index.
    /// An empty ledger credits shares 1:1.
    pub fn shares_for_value(
        value: U256,
        total_value: U256,
        total_shares: U256,
    ) -> Result<U256, VaultError> {
        if total_shares.is_zero() {
            return Ok(value);
        }
        SafeMath::mul_div(value, total_shares, total_value)
    }

    /// Value currently backing `shares`
    pub fn value_for_shares(
        shares: U256,
        total_value: U256,
        total_shares: U256,
    ) -> Result<U256, VaultError> {
        if total_shares.is_zero() {
            return Ok(U256::zero());
        }
        SafeMath::mul_div(shares, total_value, total_shares)
    }

    /// Value per share scaled by WAD; 1.0 while no shares exist
    pub fn index(total_value: U256, total_shares: U256) -> Result<U256, VaultError> {
        if total_shares.is_zero() {
            return Ok(U256::from(WAD));
        }
        SafeMath::mul_div(total_value, U256::from(WAD), total_shares)
    }

    /// Fee charged on `amount` at `fee_bps` basis points
    pub fn fee(amount: U256, fee_bps: u32) -> Result<U256, VaultError> {
        SafeMath::mul_div(amount, U256::from(fee_bps), U256::from(MAX_PERCENT))
    }

    /// Splits `amount` across `holdings` proportionally to each holding.
    /// The floored remainder is left undistributed.
    pub fn pro_rata(amount: U256, holdings: &[U256]) -> Result<Vec<U256>, VaultError> {
        let total = SafeMath::sum(holdings)?;
        if amount.is_zero() {
            return Ok(holdings.iter().map(|_| U256::zero()).collect());
        }
        holdings
            .iter()
            .map(|holding| SafeMath::mul_div(amount, *holding, total))
            .collect()
    }

    /// Multiplier that lifts an amount with `decimals` digits to 18 digits
    pub fn normalization_factor(decimals: u8) -> Option<U256> {
        if decimals > PLUS_DECIMALS {
            return None;
        }
        Some(U256::exp10((PLUS_DECIMALS - decimals) as usize))
    }
}
