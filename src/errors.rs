//! Error definitions for the stable engine and its token collaborators
use odra::prelude::*;

/// Errors raised by the stable engine.
///
/// Codes are grouped by class: 1xx validation, 2xx state, 3xx invariant,
/// 4xx collaborator failure.
#[odra::odra_error]
pub enum EngineError {
    // Validation
    /// Amount argument is zero
    MustBeMoreThanZero = 100,

    /// Asset is not a registered collateral asset
    NotAllowedAsset = 101,

    /// Asset list and price feed list differ in length
    LengthMismatch = 102,

    /// Same asset listed twice at construction
    DuplicateCollateralAsset = 103,

    /// Engine constructed without any collateral asset
    NoCollateralAssets = 104,

    /// Price feed returned a zero or negative price, or unsupported decimals
    InvalidPrice = 105,

    // State
    /// Collateral balance below the requested amount
    InsufficientBalance = 200,

    /// Debt below the amount being repaid
    InsufficientDebt = 201,

    /// Mutating entry point entered while another one is executing
    ReentrantCall = 202,

    /// Fixed-point arithmetic overflowed
    MathOverflow = 203,

    /// Stable token address missing from storage
    StableTokenNotSet = 204,

    // Invariant
    /// Resulting health factor is below the minimum
    BreaksHealthFactor = 300,

    /// Liquidation attempted on a healthy position
    HealthFactorOk = 301,

    /// Liquidation did not raise the target's health factor
    HealthFactorNotImproved = 302,

    // Collaborator
    /// Collateral transfer into the engine reported failure
    DepositFailed = 400,

    /// Stable token mint reported failure
    MintFailed = 401,

    /// Collateral transfer out of the engine reported failure
    RedeemFailed = 402,

    /// Stable token transfer into the engine reported failure
    BurnFailed = 403,
}

/// Errors raised by the CEP-18 token contracts
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 500,

    /// Insufficient balance for operation
    InsufficientBalance = 501,

    /// Caller does not hold the mint/burn capability
    NotMinter = 502,

    /// Mint/burn capability was already bound
    MinterAlreadyBound = 503,

    /// Zero amount for mint or burn
    ZeroAmount = 504,

    /// Recipient is not a valid holder
    InvalidRecipient = 505,

    /// Caller is not the token deployer
    Unauthorized = 506,
}
