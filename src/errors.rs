//! Error definitions shared by the plus vaults
use odra::prelude::*;

/// Errors raised by the rebasing ledger, the shared token surface and
/// the access-control component
#[odra::odra_error]
pub enum VaultError {
    /// Caller is not the governance address
    NotGovernance = 1,

    /// Caller is neither a strategist nor governance
    NotStrategist = 2,

    /// Caller is not allowed to perform this action
    Unauthorized = 3,

    /// Share amount exceeds the holder's shares
    InsufficientShares = 10,

    /// Insufficient allowance for transfer
    InsufficientAllowance = 12,

    /// Locked - reentrancy guard
    Reentrant = 13,

    /// Entry is already in the registry
    AlreadyRegistered = 14,

    /// Entry is not in the registry
    NotRegistered = 15,

    /// Zero or otherwise unusable amount
    InvalidAmount = 20,

    /// Parallel argument lists differ in length
    LengthMismatch = 21,

    /// Redeem fee out of range
    InvalidFee = 22,

    /// Liquidity ratio out of range
    InvalidRatio = 23,

    /// Overflow error
    Overflow = 30,

    /// Underflow error
    Underflow = 31,

    /// Division by zero
    DivisionByZero = 32,

    /// Token transfer returned false
    TransferFailed = 40,
}

/// Custom errors for the mock CEP-18 token
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 100,

    /// Insufficient balance for operation
    InsufficientBalance = 101,
}
