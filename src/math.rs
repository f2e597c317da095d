//! Checked U256 arithmetic for the engine's fixed-point formulas
use odra::casper_types::U256;
use crate::errors::EngineError;

/// Safe math operations for U256
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, EngineError> {
        a.checked_add(b).ok_or(EngineError::MathOverflow)
    }

    /// Safe subtraction with underflow check
    pub fn sub(a: U256, b: U256) -> Result<U256, EngineError> {
        a.checked_sub(b).ok_or(EngineError::MathOverflow)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, EngineError> {
        a.checked_mul(b).ok_or(EngineError::MathOverflow)
    }

    /// Division; callers guarantee a nonzero divisor
    pub fn div(a: U256, b: U256) -> Result<U256, EngineError> {
        a.checked_div(b).ok_or(EngineError::MathOverflow)
    }

    /// `a * b / denominator` with every step checked
    pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, EngineError> {
        Self::div(Self::mul(a, b)?, denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div() {
        let result = SafeMath::mul_div(U256::from(2000), U256::from(50), U256::from(100)).unwrap();
        assert_eq!(result, U256::from(1000));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert!(matches!(SafeMath::add(U256::MAX, U256::one()), Err(EngineError::MathOverflow)));
        assert!(matches!(SafeMath::mul(U256::MAX, U256::from(2)), Err(EngineError::MathOverflow)));
        assert!(matches!(SafeMath::sub(U256::zero(), U256::one()), Err(EngineError::MathOverflow)));
        assert_eq!(SafeMath::sub(U256::from(5), U256::from(3)).unwrap(), U256::from(2));
    }

    #[test]
    fn test_division_by_zero_is_reported() {
        assert!(matches!(SafeMath::div(U256::one(), U256::zero()), Err(EngineError::MathOverflow)));
    }
}
