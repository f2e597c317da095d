//! Risk parameters and fixed-point formulas for collateral valuation,
//! health factors and liquidation seizure.
//!
//! All USD values and ratios carry 18 fractional decimal digits. Collateral
//! quantities are expressed in the asset's 18-decimal base unit.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::EngineError;
use crate::math::SafeMath;

/// 1.0 in 18-decimal fixed point
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Decimals every normalized price and USD value carries
pub const TARGET_DECIMALS: u8 = 18;

/// Share of collateral value counted towards the health factor (50 => 200% collateralization)
pub const LIQUIDATION_THRESHOLD: u128 = 50;

/// Denominator for threshold and bonus percentages
pub const LIQUIDATION_PRECISION: u128 = 100;

/// Extra collateral paid to liquidators, in percent of the debt-equivalent quantity
pub const LIQUIDATION_BONUS: u128 = 10;

/// Health factor every indebted account must keep (1.0)
pub const MIN_HEALTH_FACTOR: u128 = PRECISION;

/// Protocol constants, as reported by the engine's `risk_parameters` view
#[odra::odra_type]
pub struct RiskParameters {
    /// Fixed-point scale
    pub precision: U256,
    /// Liquidation threshold in percent
    pub liquidation_threshold: U256,
    /// Liquidation bonus in percent
    pub liquidation_bonus: U256,
    /// Percentage denominator
    pub liquidation_precision: U256,
    /// Minimum health factor
    pub min_health_factor: U256,
}

impl RiskParameters {
    pub fn current() -> Self {
        Self {
            precision: U256::from(PRECISION),
            liquidation_threshold: U256::from(LIQUIDATION_THRESHOLD),
            liquidation_bonus: U256::from(LIQUIDATION_BONUS),
            liquidation_precision: U256::from(LIQUIDATION_PRECISION),
            min_health_factor: U256::from(MIN_HEALTH_FACTOR),
        }
    }
}

/// A health check failure, carrying the factor that failed it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthFactorBreach {
    pub health_factor: U256,
}

/// Revert codes carry no payload, so the factor is dropped here
impl From<HealthFactorBreach> for EngineError {
    fn from(_: HealthFactorBreach) -> Self {
        EngineError::BreaksHealthFactor
    }
}

/// Scale a signed feed answer with `decimals` digits to 18-decimal fixed point.
///
/// Zero and negative answers are rejected; the feed is otherwise trusted as is.
pub fn normalize_price(answer: i64, decimals: u8) -> Result<U256, EngineError> {
    if answer <= 0 || decimals > TARGET_DECIMALS {
        return Err(EngineError::InvalidPrice);
    }
    let scale = U256::exp10(usize::from(TARGET_DECIMALS - decimals));
    SafeMath::mul(U256::from(answer as u64), scale)
}

/// USD value of `quantity` at a normalized `price`
pub fn usd_value(price: U256, quantity: U256) -> Result<U256, EngineError> {
    SafeMath::mul_div(price, quantity, U256::from(PRECISION))
}

/// Quantity worth `usd` at a normalized `price`
pub fn quantity_from_usd(price: U256, usd: U256) -> Result<U256, EngineError> {
    if price.is_zero() {
        return Err(EngineError::InvalidPrice);
    }
    SafeMath::mul_div(usd, U256::from(PRECISION), price)
}

/// Health factor of a position. A debt-free position reports `U256::MAX`.
pub fn health_factor(debt: U256, collateral_value_usd: U256) -> Result<U256, EngineError> {
    if debt.is_zero() {
        return Ok(U256::MAX);
    }
    let adjusted = SafeMath::mul_div(
        collateral_value_usd,
        U256::from(LIQUIDATION_THRESHOLD),
        U256::from(LIQUIDATION_PRECISION),
    )?;
    SafeMath::mul_div(adjusted, U256::from(PRECISION), debt)
}

/// Fails with the offending factor when it is below the minimum
pub fn ensure_healthy(health_factor: U256) -> Result<(), HealthFactorBreach> {
    if health_factor < U256::from(MIN_HEALTH_FACTOR) {
        return Err(HealthFactorBreach { health_factor });
    }
    Ok(())
}

/// Whether a position with this factor may be liquidated
pub fn is_liquidatable(health_factor: U256) -> bool {
    health_factor < U256::from(MIN_HEALTH_FACTOR)
}

/// Split a debt-equivalent collateral quantity into `(bonus, total_seized)`
pub fn liquidation_seizure(base_quantity: U256) -> Result<(U256, U256), EngineError> {
    let bonus = SafeMath::mul_div(
        base_quantity,
        U256::from(LIQUIDATION_BONUS),
        U256::from(LIQUIDATION_PRECISION),
    )?;
    Ok((bonus, SafeMath::add(base_quantity, bonus)?))
}
