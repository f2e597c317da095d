//! Stable engine - collateral custody, debt accounting and liquidation
//!
//! Users lock registered collateral assets, mint the stable token against
//! them and must keep their health factor at or above 1.0. Positions below
//! that line can be liquidated by anyone repaying part of their debt in
//! exchange for collateral plus a fixed bonus.

pub mod registry;
pub mod ledger;
pub mod stable_engine;

#[cfg(test)]
mod failing_issuer;

pub use registry::CollateralRegistry;
pub use ledger::Ledger;
pub use stable_engine::{StableEngine, StableEngineContractRef};
