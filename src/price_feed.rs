//! Price feeds - one per collateral asset, answering in USD
//!
//! The engine only relies on `latest_price` and `decimals`. Answers are
//! signed and trusted as is: no staleness or round checks are made.

use odra::prelude::*;
use crate::events::PriceUpdated;

/// Interface of a USD price feed
#[odra::external_contract]
pub trait PriceFeed {
    /// Latest answer, scaled by `10^decimals`
    fn latest_price(&self) -> i64;

    /// Number of decimals in the answer
    fn decimals(&self) -> u8;
}

/// Settable feed for local deployments and tests
#[odra::module]
pub struct MockPriceFeed {
    /// Current answer
    price: Var<i64>,
    /// Answer decimals (8 for USD pairs)
    decimals: Var<u8>,
}

#[odra::module]
impl MockPriceFeed {
    /// Initialize the feed with its decimals and a first answer
    pub fn init(&mut self, decimals: u8, initial_price: i64) {
        self.decimals.set(decimals);
        self.update_price(initial_price);
    }

    /// Latest answer
    pub fn latest_price(&self) -> i64 {
        self.price.get_or_default()
    }

    /// Answer decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    /// Replace the answer
    pub fn update_price(&mut self, price: i64) {
        self.price.set(price);
        self.env().emit_event(PriceUpdated {
            price,
            decimals: self.decimals.get_or_default(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::Deployer;

    #[test]
    fn test_update_price() {
        let env = odra_test::env();
        let mut feed = MockPriceFeed::deploy(
            &env,
            MockPriceFeedInitArgs {
                decimals: 8,
                initial_price: 2000_0000_0000,
            },
        );
        assert_eq!(feed.latest_price(), 2000_0000_0000);
        assert_eq!(feed.decimals(), 8);

        feed.update_price(-5);
        assert_eq!(feed.latest_price(), -5);
        assert!(env.emitted_event(&feed, PriceUpdated { price: -5, decimals: 8 }));
    }
}
