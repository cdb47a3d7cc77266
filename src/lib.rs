#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

// Shared building blocks
pub mod errors;
pub mod events;
pub mod math;
pub mod ledger;
pub mod registry;
pub mod access;
pub mod token;
pub mod strategy;

// Single-asset plus vaults
pub mod single;

// Composite (basket) plus vaults
pub mod composite;

// Mock collaborators (tokens, strategies)
pub mod mocks;

#[cfg(test)]
mod testing;
