//! Stable token double whose `mint` and `transfer_from` can be switched to
//! report failure instead of reverting.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::TokenError;

#[odra::module]
pub struct FailingIssuer {
    balances: Mapping<Address, U256>,
    mint_fails: Var<bool>,
    transfer_from_fails: Var<bool>,
}

#[odra::module]
impl FailingIssuer {
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    pub fn set_mint_fails(&mut self, fails: bool) {
        self.mint_fails.set(fails);
    }

    pub fn set_transfer_from_fails(&mut self, fails: bool) {
        self.transfer_from_fails.set(fails);
    }

    pub fn mint(&mut self, to: Address, amount: U256) -> bool {
        if self.mint_fails.get_or_default() {
            return false;
        }
        self.credit(to, amount);
        true
    }

    pub fn burn(&mut self, amount: U256) {
        let caller = self.env().caller();
        self.debit(caller, amount);
    }

    /// Moves funds without an allowance check
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        if self.transfer_from_fails.get_or_default() {
            return false;
        }
        self.debit(from, amount);
        self.credit(to, amount);
        true
    }
}

impl FailingIssuer {
    fn credit(&mut self, owner: Address, amount: U256) {
        let balance = self.balance_of(owner) + amount;
        self.balances.set(&owner, balance);
    }

    fn debit(&mut self, owner: Address, amount: U256) {
        let balance = self.balance_of(owner);
        if balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }
        self.balances.set(&owner, balance - amount);
    }
}
