//! Event definitions for single-asset plus vaults
use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when underlying is deposited
#[odra::event]
pub struct Deposited {
    /// Depositor
    pub account: Address,
    /// Underlying amount (native precision)
    pub amount: U256,
    /// Value credited (18 digits)
    pub value: U256,
    /// Shares minted
    pub shares: U256,
}

/// Event emitted when plus tokens are redeemed for underlying
#[odra::event]
pub struct Withdrawn {
    /// Redeemer
    pub account: Address,
    /// Underlying amount paid out (native precision)
    pub amount: U256,
    /// Gross value removed from the ledger
    pub value: U256,
    /// Shares burned
    pub shares: U256,
    /// Fee left in the vault
    pub fee: U256,
}

/// Event emitted when a strategy is approved
#[odra::event]
pub struct StrategyApproved {
    /// Strategy address
    pub strategy: Address,
    /// Whether it became the active strategy
    pub active: bool,
}

/// Event emitted when a strategy is revoked
#[odra::event]
pub struct StrategyRevoked {
    /// Strategy address
    pub strategy: Address,
}

/// Event emitted when idle funds move into the active strategy
#[odra::event]
pub struct Invested {
    /// Strategy address
    pub strategy: Address,
    /// Underlying amount invested (native precision)
    pub amount: U256,
}

/// Event emitted after strategies are harvested
#[odra::event]
pub struct Harvested {
    /// Value gained by the harvest
    pub yield_value: U256,
    /// Total value after the harvest
    pub total_value: U256,
}
