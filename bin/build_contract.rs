//! Binary for building WASM contracts from the plus vault modules.
#![doc = "Binary for building WASM contracts from the plus vault modules."]

#[allow(unused_imports)]
use plus_contracts;

fn main() {
    // Compilation to WASM is driven by odra-build; this binary only links the crate
}
