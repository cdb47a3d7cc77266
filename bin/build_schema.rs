//! Binary for generating contract schemas from the plus vault modules.
#![doc = "Binary for generating contract schemas from the plus vault modules."]

#[allow(unused_imports)]
use plus_contracts;

fn main() {
    // Schema generation is driven by odra-build; this binary only links the crate
}
