//! Balance and allowance ledger

use std::collections::HashMap;

use ourtoken_primitives::{Address, U256};

use crate::{Event, TokenError, TokenResult};

/// Standard fungible token state
///
/// Failed operations never mutate state: every check runs before the first
/// write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: U256,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

impl Token {
    /// Create an empty token
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            total_supply: U256::zero(),
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    /// Construct and mint `initial_supply` to `deployer`
    ///
    /// Returns the token and the mint `Transfer` event.
    pub fn deploy(
        deployer: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        initial_supply: U256,
    ) -> TokenResult<(Self, Event)> {
        let mut token = Self::new(name, symbol, decimals);
        let event = token.mint(deployer, initial_supply)?;
        Ok((token, event))
    }

    /// Token name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Token symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Decimal precision
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Total minted supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Balance of `account`
    pub fn balance_of(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Amount `spender` may still move on behalf of `owner`
    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Create `amount` new tokens for `to`
    pub fn mint(&mut self, to: Address, amount: U256) -> TokenResult<Event> {
        if to.is_zero() {
            return Err(TokenError::InvalidReceiver { receiver: to });
        }
        self.update(Address::ZERO, to, amount)
    }

    /// Move `amount` from `caller` to `to`
    pub fn transfer(&mut self, caller: Address, to: Address, amount: U256) -> TokenResult<Event> {
        self.check_transfer(caller, to, amount)?;
        self.update(caller, to, amount)
    }

    /// Set `spender`'s allowance over `caller`'s tokens to exactly `amount`
    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        amount: U256,
    ) -> TokenResult<Event> {
        if caller.is_zero() {
            return Err(TokenError::InvalidApprover { approver: caller });
        }
        if spender.is_zero() {
            return Err(TokenError::InvalidSpender { spender });
        }
        self.set_allowance(caller, spender, amount);
        Ok(Event::Approval {
            owner: caller,
            spender,
            value: amount,
        })
    }

    /// Move `amount` from `from` to `to` using `spender`'s allowance
    ///
    /// An allowance of `U256::MAX` is treated as infinite and left untouched.
    /// Spending allowance does not emit `Approval`.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> TokenResult<Event> {
        let current = self.allowance(&from, &spender);
        let remaining = if current == U256::MAX {
            None
        } else if current < amount {
            return Err(TokenError::InsufficientAllowance {
                spender,
                allowance: current,
                needed: amount,
            });
        } else {
            Some(current - amount)
        };

        self.check_transfer(from, to, amount)?;

        if let Some(remaining) = remaining {
            self.set_allowance(from, spender, remaining);
        }
        self.update(from, to, amount)
    }

    /// Sum of all balances; equals the total supply
    pub fn circulating(&self) -> U256 {
        self.balances
            .values()
            .fold(U256::zero(), |acc, b| acc.saturating_add(*b))
    }

    fn check_transfer(&self, from: Address, to: Address, amount: U256) -> TokenResult<()> {
        if from.is_zero() {
            return Err(TokenError::InvalidSender { sender: from });
        }
        if to.is_zero() {
            return Err(TokenError::InvalidReceiver { receiver: to });
        }
        let balance = self.balance_of(&from);
        if balance < amount {
            return Err(TokenError::InsufficientBalance {
                sender: from,
                balance,
                needed: amount,
            });
        }
        Ok(())
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, amount: U256) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    /// Core balance update; a zero `from` mints
    fn update(&mut self, from: Address, to: Address, amount: U256) -> TokenResult<Event> {
        if from.is_zero() {
            self.total_supply = self
                .total_supply
                .checked_add(amount)
                .ok_or(TokenError::ArithmeticOverflow)?;
        } else {
            let balance = self.balance_of(&from);
            self.balances.insert(from, balance - amount);
        }

        // Cannot overflow: every balance is bounded by the total supply.
        let credited = self.balance_of(&to) + amount;
        self.balances.insert(to, credited);

        tracing::trace!(%from, %to, %amount, "token balance update");
        Ok(Event::Transfer {
            from,
            to,
            value: amount,
        })
    }
}
