//! Event definitions for composite plus vaults
use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when constituents are deposited for composite tokens
#[odra::event]
pub struct Minted {
    /// Depositor
    pub account: Address,
    /// Constituents deposited
    pub tokens: Vec<Address>,
    /// Amounts deposited per constituent
    pub amounts: Vec<U256>,
    /// Value credited
    pub value: U256,
    /// Shares minted
    pub shares: U256,
}

/// Event emitted when composite tokens are redeemed for constituents
#[odra::event]
pub struct Redeemed {
    /// Redeemer
    pub account: Address,
    /// Constituents paid out
    pub tokens: Vec<Address>,
    /// Amounts paid out per constituent
    pub amounts: Vec<U256>,
    /// Gross value removed from the ledger
    pub value: U256,
    /// Shares burned
    pub shares: U256,
    /// Fee left in the vault
    pub fee: U256,
}

/// Event emitted when a constituent is added
#[odra::event]
pub struct TokenAdded {
    /// Constituent address
    pub token: Address,
}

/// Event emitted when a constituent is removed
#[odra::event]
pub struct TokenRemoved {
    /// Constituent address
    pub token: Address,
}

/// Event emitted when a rebalancer is granted or revoked
#[odra::event]
pub struct RebalancerUpdated {
    /// Rebalancer address
    pub rebalancer: Address,
    /// Whether the address may rebalance after the update
    pub allowed: bool,
}
