//! Strategy collaborator consumed by single-asset vaults
//!
//! A strategy receives idle underlying funds, grows them and reports the
//! value it currently holds. Amounts are in the underlying token's native
//! precision.
use odra::prelude::*;
use odra::casper_types::U256;

/// External strategy interface
#[odra::external_contract]
pub trait Strategy {
    /// Accept `amount` of underlying already transferred to the strategy
    fn invest(&mut self, amount: U256);

    /// Realize pending yield into the strategy's holdings
    fn harvest(&mut self);

    /// Send `amount` of underlying back to the vault
    fn withdraw(&mut self, amount: U256);

    /// Total underlying the strategy can report back
    fn harvestable_value(&self) -> U256;
}
