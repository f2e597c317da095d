//! CEP-18 collateral token and the external interface the engine uses to
//! move collateral in and out of custody.
use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::engine::StableEngineContractRef;
use crate::events::{Transfer, Approval};
use crate::errors::TokenError;

/// Freely mintable CEP-18 token standing in for a wrapped collateral asset
/// (wETH, wBTC) on local networks and in tests.
///
/// Two switches simulate misbehaving assets: `set_transfers_fail` makes
/// `transfer`/`transfer_from` report `false`, and `set_reentry_target` makes
/// `transfer_from` call back into an engine before completing.
#[odra::module]
pub struct CollateralToken {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Token decimals
    decimals: Var<u8>,
    /// Total supply of tokens
    total_supply: Var<U256>,
    /// Balance mapping: owner -> balance
    balances: Mapping<Address, U256>,
    /// Allowance mapping: owner -> spender -> amount
    allowances: Mapping<(Address, Address), U256>,
    /// When set, transfers report failure instead of moving funds
    transfers_fail: Var<bool>,
    /// Engine to re-enter from `transfer_from`
    reentry_target: Var<Option<Address>>,
}

#[odra::module]
impl CollateralToken {
    /// Initialize the token with name and symbol
    pub fn init(&mut self, name: String, symbol: String) {
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(18);
        self.total_supply.set(U256::zero());
        self.transfers_fail.set(false);
        self.reentry_target.set(None);
    }

    /// Get the token name
    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    /// Get the token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    /// Get the token decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    /// Get the total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    /// Get the balance of an address
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    /// Get the allowance for a spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    /// Transfer tokens to another address
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        if self.transfers_fail.get_or_default() {
            return false;
        }
        let caller = self.env().caller();
        self.transfer_internal(caller, to, amount);
        true
    }

    /// Approve a spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.approve_internal(caller, spender, amount);
        true
    }

    /// Transfer tokens from one address to another (requires approval)
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        if self.transfers_fail.get_or_default() {
            return false;
        }
        if let Some(engine) = self.reentry_target.get_or_default() {
            let self_address = self.env().self_address();
            StableEngineContractRef::new(self.env(), engine)
                .deposit_collateral(self_address, U256::one());
        }

        let caller = self.env().caller();
        let current_allowance = self.allowance(from, caller);

        if current_allowance < amount {
            self.env().revert(TokenError::InsufficientAllowance);
        }

        self.approve_internal(from, caller, current_allowance - amount);
        self.transfer_internal(from, to, amount);
        true
    }

    /// Mint tokens to any holder (faucet)
    pub fn mint(&mut self, to: Address, amount: U256) {
        let current_supply = self.total_supply();
        self.total_supply.set(current_supply + amount);

        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);

        self.env().emit_event(Transfer {
            from: self.env().self_address(),
            to,
            value: amount,
        });
    }

    /// Make subsequent transfers report failure
    pub fn set_transfers_fail(&mut self, fail: bool) {
        self.transfers_fail.set(fail);
    }

    /// Make `transfer_from` re-enter `engine` (or stop doing so with `None`)
    pub fn set_reentry_target(&mut self, engine: Option<Address>) {
        self.reentry_target.set(engine);
    }

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);

        self.env().emit_event(Transfer {
            from,
            to,
            value: amount,
        });
    }

    fn approve_internal(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);

        self.env().emit_event(Approval {
            owner,
            spender,
            value: amount,
        });
    }
}

/// External token interface for interacting with CEP-18 tokens
#[odra::external_contract]
pub trait Cep18Token {
    /// Get the balance of an address
    fn balance_of(&self, owner: Address) -> U256;

    /// Transfer tokens
    fn transfer(&mut self, to: Address, amount: U256) -> bool;

    /// Transfer tokens from another address
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;
}
