//! Collateral registry - the fixed set of accepted assets and their feeds

use odra::prelude::*;
use crate::errors::EngineError;

/// Supported collateral assets, fixed at construction.
///
/// Lookups by asset go through `price_feeds`; full iteration (collateral
/// valuation) walks the ordered `assets` list, which is linear in the number
/// of registered assets.
#[odra::module]
pub struct CollateralRegistry {
    /// asset -> price feed
    price_feeds: Mapping<Address, Address>,
    /// index -> asset, in registration order
    assets: Mapping<u32, Address>,
    /// Number of registered assets
    asset_count: Var<u32>,
}

#[odra::module]
impl CollateralRegistry {
    /// Register every asset with its feed. Only called while the owning
    /// engine is being initialized.
    pub fn register(&mut self, assets: Vec<Address>, price_feeds: Vec<Address>) {
        if assets.len() != price_feeds.len() {
            self.env().revert(EngineError::LengthMismatch);
        }
        if assets.is_empty() {
            self.env().revert(EngineError::NoCollateralAssets);
        }

        let count = assets.len() as u32;
        for (index, (asset, feed)) in assets.into_iter().zip(price_feeds).enumerate() {
            if self.price_feeds.get(&asset).is_some() {
                self.env().revert(EngineError::DuplicateCollateralAsset);
            }
            self.price_feeds.set(&asset, feed);
            self.assets.set(&(index as u32), asset);
        }
        self.asset_count.set(count);
    }

    /// Feed registered for `asset`
    pub fn price_feed_of(&self, asset: Address) -> Option<Address> {
        self.price_feeds.get(&asset)
    }

    pub fn is_registered(&self, asset: Address) -> bool {
        self.price_feeds.get(&asset).is_some()
    }

    /// All registered assets, in registration order
    pub fn assets(&self) -> Vec<Address> {
        (0..self.asset_count.get_or_default())
            .filter_map(|index| self.assets.get(&index))
            .collect()
    }
}
