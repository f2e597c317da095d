//! Ledger - per-user collateral balances and stable debt

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::EngineError;
use crate::math::SafeMath;

/// Accounts are created lazily on first credit and never removed; a
/// zeroed balance simply stays at zero.
#[odra::module]
pub struct Ledger {
    /// User collateral balances: (user, asset) -> amount
    collateral: Mapping<(Address, Address), U256>,
    /// Stable tokens owed: user -> amount
    debt: Mapping<Address, U256>,
}

#[odra::module]
impl Ledger {
    pub fn collateral_of(&self, user: Address, asset: Address) -> U256 {
        self.collateral.get(&(user, asset)).unwrap_or_default()
    }

    pub fn debt_of(&self, user: Address) -> U256 {
        self.debt.get(&user).unwrap_or_default()
    }

    /// Add `amount` to the user's balance of `asset`, returning the new balance
    pub fn credit_collateral(&mut self, user: Address, asset: Address, amount: U256) -> U256 {
        let balance = self.unwrap_math(SafeMath::add(self.collateral_of(user, asset), amount));
        self.collateral.set(&(user, asset), balance);
        balance
    }

    /// Remove `amount` from the user's balance of `asset`, returning the new balance
    pub fn debit_collateral(&mut self, user: Address, asset: Address, amount: U256) -> U256 {
        let balance = self.unwrap_math(
            SafeMath::sub(self.collateral_of(user, asset), amount)
                .map_err(|_| EngineError::InsufficientBalance),
        );
        self.collateral.set(&(user, asset), balance);
        balance
    }

    /// Add to the user's debt, returning the new debt
    pub fn increase_debt(&mut self, user: Address, amount: U256) -> U256 {
        let debt = self.unwrap_math(SafeMath::add(self.debt_of(user), amount));
        self.debt.set(&user, debt);
        debt
    }

    /// Subtract from the user's debt, returning the new debt
    pub fn decrease_debt(&mut self, user: Address, amount: U256) -> U256 {
        let debt = self.unwrap_math(
            SafeMath::sub(self.debt_of(user), amount).map_err(|_| EngineError::InsufficientDebt),
        );
        self.debt.set(&user, debt);
        debt
    }
}

impl Ledger {
    fn unwrap_math(&self, result: Result<U256, EngineError>) -> U256 {
        result.unwrap_or_else(|error| self.env().revert(error))
    }
}
