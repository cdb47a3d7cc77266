//! Composite plus vaults
//!
//! A composite plus token holds several single plus tokens as backing and
//! issues one rebasing index token against the whole basket. Minting takes
//! any mix of supported constituents, redeeming pays out a pro-rata slice of
//! every constituent, and a rebase re-derives the total value from the live
//! constituent balances.

pub mod composite_plus;
pub mod errors;
pub mod events;

#[cfg(test)]
mod tests;

pub use composite_plus::{CompositePlus, RedeemQuote};
pub use errors::CompositeError;
pub use events::*;
