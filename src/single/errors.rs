//! Error definitions for single-asset plus vaults
use odra::prelude::*;

/// Custom errors for the single plus vault
#[odra::odra_error]
pub enum SingleError {
    /// Underlying token has more than 18 decimals
    UnsupportedDecimals = 200,

    /// Strategy is not approved
    StrategyNotApproved = 201,

    /// Strategy still reports value
    StrategyNotEmpty = 202,

    /// No active strategy to invest in or withdraw from
    NoActiveStrategy = 203,

    /// Vault cannot cover the redemption
    InsufficientLiquidity = 204,

    /// Underlying token address not set
    TokenNotSet = 205,
}
