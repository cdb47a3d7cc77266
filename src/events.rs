//! Event definitions shared by the plus vaults
use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when plus tokens are transferred, minted or burned
#[odra::event]
pub struct Transfer {
    /// From address
    pub from: Address,
    /// To address
    pub to: Address,
    /// Value transferred
    pub value: U256,
}

/// Event emitted when approval is granted
#[odra::event]
pub struct Approval {
    /// Owner address
    pub owner: Address,
    /// Spender address
    pub spender: Address,
    /// Value approved
    pub value: U256,
}

/// Event emitted when a ledger is re-priced
#[odra::event]
pub struct Rebased {
    /// Index before the rebase (scaled by 1e18)
    pub old_index: U256,
    /// Index after the rebase (scaled by 1e18)
    pub new_index: U256,
    /// Total value after the rebase
    pub total_value: U256,
    /// Total shares (unchanged by a rebase)
    pub total_shares: U256,
}

/// Event emitted when governance is handed over
#[odra::event]
pub struct GovernanceUpdated {
    /// Previous governance address
    pub previous: Address,
    /// New governance address
    pub governance: Address,
}

/// Event emitted when a strategist is granted or revoked
#[odra::event]
pub struct StrategistUpdated {
    /// Strategist address
    pub strategist: Address,
    /// Whether the role is held after the update
    pub allowed: bool,
}

/// Event emitted when the minimum liquidity ratio changes
#[odra::event]
pub struct MinLiquidityRatioUpdated {
    /// Old ratio in basis points
    pub old_ratio: u32,
    /// New ratio in basis points
    pub new_ratio: u32,
}

/// Event emitted when the redeem fee changes
#[odra::event]
pub struct RedeemFeeUpdated {
    /// Old fee in basis points
    pub old_fee: u32,
    /// New fee in basis points
    pub new_fee: u32,
}
