//! Error definitions for composite plus vaults
use odra::prelude::*;

/// Custom errors for the composite plus vault
#[odra::odra_error]
pub enum CompositeError {
    /// Constituent is already supported
    TokenExists = 300,

    /// Constituent is not supported
    TokenNotExists = 301,

    /// Constituent is still held by the vault
    NonzeroBalance = 302,
}
