//! Single-asset plus vaults
//!
//! A single plus token wraps one underlying CEP-18 asset, normalizes it to
//! 18 digits, deploys idle funds to an approved strategy and rebases as the
//! strategy reports yield.

pub mod single_plus;
pub mod errors;
pub mod events;


pub use single_plus::SinglePlus;
pub use errors::SingleError;
pub use events::*;
