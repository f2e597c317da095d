//! Event definitions for the stable engine and its collaborators
use odra::prelude::*;
use odra::casper_types::U256;

// ============================================================================
// Engine Events
// ============================================================================

/// Event emitted when collateral is locked in the engine
#[odra::event]
pub struct CollateralDeposited {
    /// Depositor
    pub user: Address,
    /// Collateral asset
    pub asset: Address,
    /// Amount deposited
    pub amount: U256,
}

/// Event emitted when collateral leaves the engine
#[odra::event]
pub struct CollateralRedeemed {
    /// Account the collateral is debited from
    pub from: Address,
    /// Recipient of the collateral
    pub to: Address,
    /// Collateral asset
    pub asset: Address,
    /// Amount redeemed
    pub amount: U256,
}

/// Event emitted when stable tokens are minted against collateral
#[odra::event]
pub struct StableMinted {
    /// Minter, whose debt increased
    pub user: Address,
    /// Amount minted
    pub amount: U256,
    /// Debt after the mint
    pub total_debt: U256,
}

/// Event emitted when debt is repaid and the stable tokens destroyed
#[odra::event]
pub struct StableBurned {
    /// Account whose debt decreased
    pub on_behalf_of: Address,
    /// Account that supplied the tokens
    pub payer: Address,
    /// Amount burned
    pub amount: U256,
}

/// Event emitted when a broken position is liquidated
#[odra::event]
pub struct Liquidated {
    /// Owner of the liquidated position
    pub target: Address,
    /// Address that repaid the debt
    pub liquidator: Address,
    /// Collateral asset seized
    pub asset: Address,
    /// Debt repaid by the liquidator
    pub debt_covered: U256,
    /// Collateral seized including the bonus
    pub collateral_seized: U256,
    /// Bonus part of the seized collateral
    pub bonus: U256,
    /// Target's health factor before the liquidation
    pub starting_health_factor: U256,
    /// Target's health factor after the liquidation
    pub ending_health_factor: U256,
}

// ============================================================================
// Token Events
// ============================================================================

/// Event emitted when tokens are transferred
#[odra::event]
pub struct Transfer {
    /// From address
    pub from: Address,
    /// To address
    pub to: Address,
    /// Amount transferred
    pub value: U256,
}

/// Event emitted when approval is granted
#[odra::event]
pub struct Approval {
    /// Owner address
    pub owner: Address,
    /// Spender address
    pub spender: Address,
    /// Amount approved
    pub value: U256,
}

/// Event emitted when the stable token's mint capability is bound
#[odra::event]
pub struct MinterBound {
    /// Holder of the capability
    pub minter: Address,
}

// ============================================================================
// Price Feed Events
// ============================================================================

/// Event emitted when a mock feed's answer changes
#[odra::event]
pub struct PriceUpdated {
    /// New answer
    pub price: i64,
    /// Decimals of the answer
    pub decimals: u8,
}
