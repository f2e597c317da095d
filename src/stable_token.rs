//! Stable token - the synthetic USD-pegged unit minted against collateral
//!
//! A plain CEP-18 token whose supply can only change through the engine:
//! `mint` and `burn` are gated by a minter capability that the deployer binds
//! exactly once and that can never be moved afterwards.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::{Approval, MinterBound, Transfer};
use crate::errors::TokenError;

#[odra::module]
pub struct StableToken {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Token decimals
    decimals: Var<u8>,
    /// Total supply
    total_supply: Var<U256>,
    /// Balance mapping: owner -> balance
    balances: Mapping<Address, U256>,
    /// Allowance mapping: owner -> spender -> amount
    allowances: Mapping<(Address, Address), U256>,
    /// Holder of the mint/burn capability
    minter: Var<Address>,
    /// Account allowed to bind the minter
    deployer: Var<Address>,
}

#[odra::module]
impl StableToken {
    /// Initialize the stable token
    pub fn init(&mut self, name: String, symbol: String) {
        let caller = self.env().caller();
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(18);
        self.total_supply.set(U256::zero());
        self.deployer.set(caller);
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
        let caller = self.env().caller();
        let current_allowance = self.allowance(from, caller);

        if current_allowance < amount {
            self.env().revert(TokenError::InsufficientAllowance);
        }

        self.approve_internal(from, caller, current_allowance - amount);
        self.transfer_internal(from, to, amount);
        true
    }

    /// Grant the mint/burn capability. Callable once, by the deployer.
    pub fn bind_minter(&mut self, minter: Address) {
        let caller = self.env().caller();
        let deployer = self.deployer.get_or_revert_with(TokenError::Unauthorized);
        if caller != deployer {
            self.env().revert(TokenError::Unauthorized);
        }
        if self.minter.get().is_some() {
            self.env().revert(TokenError::MinterAlreadyBound);
        }

        self.minter.set(minter);
        self.env().emit_event(MinterBound { minter });
    }

    /// Holder of the mint/burn capability, if bound
    pub fn minter(&self) -> Option<Address> {
        self.minter.get()
    }

    /// Mint new tokens (minter only)
    pub fn mint(&mut self, to: Address, amount: U256) -> bool {
        self.only_minter();

        if amount.is_zero() {
            self.env().revert(TokenError::ZeroAmount);
        }
        // Odra addresses cannot be null; the token itself is the only holder
        // that could never spend what it receives.
        if to == self.env().self_address() {
            self.env().revert(TokenError::InvalidRecipient);
        }

        let current_supply = self.total_supply();
        self.total_supply.set(current_supply + amount);

        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);

        self.env().emit_event(Transfer {
            from: self.env().self_address(),
            to,
            value: amount,
        });
        true
    }

    /// Burn tokens held by the minter itself (minter only)
    pub fn burn(&mut self, amount: U256) {
        self.only_minter();

        if amount.is_zero() {
            self.env().revert(TokenError::ZeroAmount);
        }

        let caller = self.env().caller();
        let current_balance = self.balance_of(caller);
        if current_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&caller, current_balance - amount);

        let current_supply = self.total_supply();
        self.total_supply.set(current_supply - amount);

        self.env().emit_event(Transfer {
            from: caller,
            to: self.env().self_address(),
            value: amount,
        });
    }

    // Internal functions

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

    fn only_minter(&self) {
        let caller = self.env().caller();
        let minter = self.minter.get_or_revert_with(TokenError::NotMinter);
        if caller != minter {
            self.env().revert(TokenError::NotMinter);
        }
    }
}

/// The slice of the stable token the engine calls into
#[odra::external_contract]
pub trait StableIssuer {
    /// Mint to a holder
    fn mint(&mut self, to: Address, amount: U256) -> bool;

    /// Burn from the caller's own balance
    fn burn(&mut self, amount: U256);

    /// Transfer tokens from another address
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, HostEnv};

    fn setup() -> (HostEnv, StableTokenHostRef) {
        let env = odra_test::env();
        let token = StableToken::deploy(
            &env,
            StableTokenInitArgs {
                name: String::from("Decentralized Stable Coin"),
                symbol: String::from("DSC"),
            },
        );
        (env, token)
    }

    #[test]
    fn test_init() {
        let (_, token) = setup();
        assert_eq!(token.symbol(), "DSC");
        assert_eq!(token.decimals(), 18);
        assert_eq!(token.minter(), None);
    }

    #[test]
    fn test_minter_binds_once() {
        let (env, mut token) = setup();
        let minter = env.get_account(1);
        token.bind_minter(minter);
        assert_eq!(token.minter(), Some(minter));
        assert!(env.emitted_event(&token, MinterBound { minter }));

        assert_eq!(
            token.try_bind_minter(env.get_account(2)),
            Err(TokenError::MinterAlreadyBound.into())
        );
    }

    #[test]
    fn test_only_deployer_binds() {
        let (env, mut token) = setup();
        env.set_caller(env.get_account(3));
        assert_eq!(
            token.try_bind_minter(env.get_account(3)),
            Err(TokenError::Unauthorized.into())
        );
    }

    #[test]
    fn test_mint_and_burn_restricted_to_minter() {
        let (env, mut token) = setup();
        let minter = env.get_account(1);
        let user = env.get_account(2);
        token.bind_minter(minter);

        env.set_caller(user);
        assert_eq!(
            token.try_mint(user, U256::from(100)),
            Err(TokenError::NotMinter.into())
        );

        env.set_caller(minter);
        assert!(token.mint(minter, U256::from(100)));
        assert_eq!(
            token.try_mint(user, U256::zero()),
            Err(TokenError::ZeroAmount.into())
        );
        assert_eq!(
            token.try_burn(U256::from(101)),
            Err(TokenError::InsufficientBalance.into())
        );

        token.burn(U256::from(40));
        assert_eq!(token.balance_of(minter), U256::from(60));
        assert_eq!(token.total_supply(), U256::from(60));
    }

    #[test]
    fn test_burn_zero_rejected() {
        let (env, mut token) = setup();
        let minter = env.get_account(1);
        token.bind_minter(minter);
        env.set_caller(minter);
        assert_eq!(token.try_burn(U256::zero()), Err(TokenError::ZeroAmount.into()));
    }
}
