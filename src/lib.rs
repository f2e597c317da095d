#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

// Shared definitions
pub mod errors;
pub mod events;
pub mod math;
pub mod risk;

// Collaborators
pub mod token;
pub mod stable_token;
pub mod price_feed;

// Collateral, debt and liquidation engine
pub mod engine;
