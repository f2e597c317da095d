//! Binary for building WASM contracts from the stable engine modules.
#![doc = "Binary for building WASM contracts from odra modules."]

#[allow(unused_imports)]
use stable_engine_contracts;

fn main() {
    // Compilation to WASM is driven by odra-build; this binary only pulls the modules in.
}
