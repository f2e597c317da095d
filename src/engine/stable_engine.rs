//! Stable Engine - deposit, mint, redeem, burn and liquidate
//!
//! Every mutating entry point holds the reentrancy lock for its whole
//! duration and runs in three phases:
//! 1. checks and ledger effects
//! 2. health factor checks against the updated ledger
//! 3. interactions with the collateral assets and the stable token
//!
//! Any revert discards the ledger effects together with the transfers.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::ledger::Ledger;
use super::registry::CollateralRegistry;
use crate::errors::EngineError;
use crate::events::*;
use crate::math::SafeMath;
use crate::price_feed::PriceFeedContractRef;
use crate::risk::{self, RiskParameters};
use crate::stable_token::StableIssuerContractRef;
use crate::token::Cep18TokenContractRef;

/// Stable Engine contract
#[odra::module]
pub struct StableEngine {
    /// Accepted collateral assets and their price feeds
    registry: SubModule<CollateralRegistry>,
    /// Collateral balances and debt
    ledger: SubModule<Ledger>,
    /// Stable token whose mint capability is bound to this engine
    stable_token: Var<Address>,
    /// Reentrancy lock
    locked: Var<bool>,
}

#[odra::module]
impl StableEngine {
    /// Initialize the engine
    ///
    /// # Arguments
    /// * `collateral_assets` - Accepted collateral assets, in order
    /// * `price_feeds` - USD feed for each asset, same order
    /// * `stable_token` - Stable token; its minter must be bound to this engine
    pub fn init(
        &mut self,
        collateral_assets: Vec<Address>,
        price_feeds: Vec<Address>,
        stable_token: Address,
    ) {
        self.registry.register(collateral_assets, price_feeds);
        self.stable_token.set(stable_token);
        self.locked.set(false);
    }

    // ========================================
    // Position Operations
    // ========================================

    /// Lock `amount` of `asset` as collateral
    pub fn deposit_collateral(&mut self, asset: Address, amount: U256) {
        self.lock();
        let caller = self.env().caller();

        self.record_deposit(caller, asset, amount);

        self.pull_collateral(caller, asset, amount);
        self.unlock();
    }

    /// Mint `amount` stable tokens against the caller's collateral
    pub fn mint_stable(&mut self, amount: U256) {
        self.lock();
        let caller = self.env().caller();

        let total_debt = self.record_mint(caller, amount);
        self.assert_not_broken(caller);

        self.issue_stable(caller, amount, total_debt);
        self.unlock();
    }

    /// Deposit collateral and mint against it in one step
    pub fn deposit_collateral_and_mint(
        &mut self,
        asset: Address,
        amount: U256,
        mint_amount: U256,
    ) {
        self.lock();
        let caller = self.env().caller();
        self.require_positive(amount);
        self.require_positive(mint_amount);

        self.record_deposit(caller, asset, amount);
        let total_debt = self.record_mint(caller, mint_amount);
        self.assert_not_broken(caller);

        self.pull_collateral(caller, asset, amount);
        self.issue_stable(caller, mint_amount, total_debt);
        self.unlock();
    }

    /// Withdraw `amount` of the caller's `asset` collateral
    pub fn redeem_collateral(&mut self, asset: Address, amount: U256) {
        self.lock();
        let caller = self.env().caller();

        self.record_redeem(caller, asset, amount);
        self.assert_not_broken(caller);

        self.push_collateral(caller, caller, asset, amount);
        self.unlock();
    }

    /// Repay `amount` of the caller's debt with their own stable tokens
    pub fn burn_stable(&mut self, amount: U256) {
        self.lock();
        let caller = self.env().caller();

        self.record_burn(caller, amount);
        self.assert_not_broken(caller);

        self.retire_stable(caller, caller, amount);
        self.unlock();
    }

    /// Repay debt, then withdraw collateral; the health check sees the reduced debt
    pub fn redeem_collateral_for_stable(
        &mut self,
        asset: Address,
        redeem_amount: U256,
        burn_amount: U256,
    ) {
        self.lock();
        let caller = self.env().caller();
        self.require_positive(redeem_amount);
        self.require_positive(burn_amount);

        self.record_burn(caller, burn_amount);
        self.record_redeem(caller, asset, redeem_amount);
        self.assert_not_broken(caller);

        self.retire_stable(caller, caller, burn_amount);
        self.push_collateral(caller, caller, asset, redeem_amount);
        self.unlock();
    }

    // ========================================
    // Liquidation
    // ========================================

    /// Repay `debt_to_cover` of `target`'s debt and seize the equivalent
    /// `asset` collateral plus the liquidation bonus.
    ///
    /// The seizure is settled in `asset` alone: the target must hold enough
    /// of it even if other collateral would cover the value.
    pub fn liquidate(&mut self, target: Address, asset: Address, debt_to_cover: U256) {
        self.lock();
        let liquidator = self.env().caller();
        self.require_positive(debt_to_cover);
        self.require_allowed(asset);

        let starting_health_factor = self.health_factor_of(target);
        if !risk::is_liquidatable(starting_health_factor) {
            self.env().revert(EngineError::HealthFactorOk);
        }

        let base_quantity = self.quantity_from_usd(asset, debt_to_cover);
        let (bonus, seized) = self.unwrap_math(risk::liquidation_seizure(base_quantity));

        self.ledger.debit_collateral(target, asset, seized);
        self.ledger.decrease_debt(target, debt_to_cover);

        let ending_health_factor = self.health_factor_of(target);
        if ending_health_factor <= starting_health_factor {
            self.env().revert(EngineError::HealthFactorNotImproved);
        }
        self.assert_not_broken(liquidator);

        self.push_collateral(target, liquidator, asset, seized);
        self.retire_stable(target, liquidator, debt_to_cover);

        self.env().emit_event(Liquidated {
            target,
            liquidator,
            asset,
            debt_covered: debt_to_cover,
            collateral_seized: seized,
            bonus,
            starting_health_factor,
            ending_health_factor,
        });
        self.unlock();
    }

    // ========================================
    // Price Conversion
    // ========================================

    /// USD value (18 decimals) of `amount` of `asset`
    pub fn usd_value(&self, asset: Address, amount: U256) -> U256 {
        self.require_positive(amount);
        let price = self.normalized_price(asset);
        self.unwrap_math(risk::usd_value(price, amount))
    }

    /// Quantity of `asset` worth `usd_amount` (18 decimals)
    pub fn quantity_from_usd(&self, asset: Address, usd_amount: U256) -> U256 {
        let price = self.normalized_price(asset);
        self.unwrap_math(risk::quantity_from_usd(price, usd_amount))
    }

    // ========================================
    // Health Factor
    // ========================================

    /// Total USD value of every asset `user` has deposited
    pub fn collateral_value_usd(&self, user: Address) -> U256 {
        let mut total_value = U256::zero();
        for asset in self.registry.assets() {
            let amount = self.ledger.collateral_of(user, asset);
            if amount.is_zero() {
                continue;
            }
            let value = self.usd_value(asset, amount);
            total_value = self.unwrap_math(SafeMath::add(total_value, value));
        }
        total_value
    }

    /// Health factor of `user`; `U256::MAX` when debt-free
    pub fn health_factor(&self, user: Address) -> U256 {
        self.health_factor_of(user)
    }

    /// Health factor a position with these totals would have
    pub fn calculate_health_factor(&self, debt: U256, collateral_value_usd: U256) -> U256 {
        self.unwrap_math(risk::health_factor(debt, collateral_value_usd))
    }

    // ========================================
    // View Functions
    // ========================================

    /// `(debt, collateral_value_usd)` of `user`
    pub fn account_information(&self, user: Address) -> (U256, U256) {
        (self.ledger.debt_of(user), self.collateral_value_usd(user))
    }

    pub fn collateral_balance_of(&self, user: Address, asset: Address) -> U256 {
        self.ledger.collateral_of(user, asset)
    }

    pub fn collateral_assets(&self) -> Vec<Address> {
        self.registry.assets()
    }

    pub fn price_feed_of(&self, asset: Address) -> Option<Address> {
        self.registry.price_feed_of(asset)
    }

    pub fn stable_token(&self) -> Address {
        self.stable_token.get_or_revert_with(EngineError::StableTokenNotSet)
    }

    pub fn risk_parameters(&self) -> RiskParameters {
        RiskParameters::current()
    }

    // ========================================
    // Ledger Effects
    // ========================================

    fn record_deposit(&mut self, user: Address, asset: Address, amount: U256) {
        self.require_positive(amount);
        self.require_allowed(asset);
        self.ledger.credit_collateral(user, asset, amount);
    }

    fn record_mint(&mut self, user: Address, amount: U256) -> U256 {
        self.require_positive(amount);
        self.ledger.increase_debt(user, amount)
    }

    fn record_redeem(&mut self, from: Address, asset: Address, amount: U256) {
        self.require_positive(amount);
        self.require_allowed(asset);
        self.ledger.debit_collateral(from, asset, amount);
    }

    fn record_burn(&mut self, on_behalf_of: Address, amount: U256) {
        self.require_positive(amount);
        self.ledger.decrease_debt(on_behalf_of, amount);
    }

    // ========================================
    // Interactions
    // ========================================

    /// Pull collateral from its owner into custody
    fn pull_collateral(&mut self, from: Address, asset: Address, amount: U256) {
        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        if !token.transfer_from(from, self.env().self_address(), amount) {
            self.env().revert(EngineError::DepositFailed);
        }

        self.env().emit_event(CollateralDeposited {
            user: from,
            asset,
            amount,
        });
    }

    /// Release collateral debited from `from` to `to`
    fn push_collateral(&mut self, from: Address, to: Address, asset: Address, amount: U256) {
        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        if !token.transfer(to, amount) {
            self.env().revert(EngineError::RedeemFailed);
        }

        self.env().emit_event(CollateralRedeemed {
            from,
            to,
            asset,
            amount,
        });
    }

    fn issue_stable(&mut self, to: Address, amount: U256, total_debt: U256) {
        let mut stable = StableIssuerContractRef::new(self.env(), self.stable_token());
        if !stable.mint(to, amount) {
            self.env().revert(EngineError::MintFailed);
        }

        self.env().emit_event(StableMinted {
            user: to,
            amount,
            total_debt,
        });
    }

    /// Take `amount` stable tokens from `payer` and destroy them
    fn retire_stable(&mut self, on_behalf_of: Address, payer: Address, amount: U256) {
        let mut stable = StableIssuerContractRef::new(self.env(), self.stable_token());
        if !stable.transfer_from(payer, self.env().self_address(), amount) {
            self.env().revert(EngineError::BurnFailed);
        }
        stable.burn(amount);

        self.env().emit_event(StableBurned {
            on_behalf_of,
            payer,
            amount,
        });
    }

    // ========================================
    // Internal Checks
    // ========================================

    fn normalized_price(&self, asset: Address) -> U256 {
        let feed_address = self.registry.price_feed_of(asset)
            .unwrap_or_revert_with(&self.env(), EngineError::NotAllowedAsset);
        let feed = PriceFeedContractRef::new(self.env(), feed_address);
        self.unwrap_math(risk::normalize_price(feed.latest_price(), feed.decimals()))
    }

    fn health_factor_of(&self, user: Address) -> U256 {
        let debt = self.ledger.debt_of(user);
        if debt.is_zero() {
            return U256::MAX;
        }
        let collateral_value = self.collateral_value_usd(user);
        self.unwrap_math(risk::health_factor(debt, collateral_value))
    }

    /// Reverts with `BreaksHealthFactor` when `user` is below the minimum.
    ///
    /// The revert carries only the error code. The failing factor can be
    /// reproduced off-chain with `calculate_health_factor` on the debt and
    /// collateral value the rejected call would have left.
    fn assert_not_broken(&self, user: Address) {
        let health_factor = self.health_factor_of(user);
        if let Err(breach) = risk::ensure_healthy(health_factor) {
            self.env().revert(EngineError::from(breach));
        }
    }

    fn require_positive(&self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(EngineError::MustBeMoreThanZero);
        }
    }

    fn require_allowed(&self, asset: Address) {
        if !self.registry.is_registered(asset) {
            self.env().revert(EngineError::NotAllowedAsset);
        }
    }

    /// Reentrancy lock
    fn lock(&mut self) {
        if self.locked.get_or_default() {
            self.env().revert(EngineError::ReentrantCall);
        }
        self.locked.set(true);
    }

    /// Reentrancy unlock
    fn unlock(&mut self) {
        self.locked.set(false);
    }
}

impl StableEngine {
    /// Revert with the error of a failed fixed-point computation
    fn unwrap_math<T>(&self, result: Result<T, EngineError>) -> T {
        result.unwrap_or_else(|error| self.env().revert(error))
    }
}
