//! Front-end boundary for account operations
//!
//! This module defines the trait through which front ends (batch replay, a
//! terminal, a GUI) reach the ledger. Front ends never touch the registry
//! directly.

use crate::types::{Account, AccountId, BankError};
use rust_decimal::Decimal;

/// Which account an operation applies to
///
/// Interactive front ends act on the logged-in account; batch replay names the
/// account explicitly on every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The account bound to the current session
    Session,

    /// An explicit account ID
    Account(AccountId),
}

/// Result of compiling interest on one account
#[derive(Debug, Clone, PartialEq)]
pub struct InterestAdjustment {
    pub account: AccountId,
    pub previous: Decimal,
    pub balance: Decimal,
}

impl InterestAdjustment {
    /// Change applied to the balance (negative for a penalty)
    pub fn adjustment(&self) -> Decimal {
        let delta = self.balance - self.previous;
        if delta.is_zero() {
            Decimal::ZERO
        } else {
            delta
        }
    }
}

/// Operations exposed to front ends
///
/// Every method is a complete, atomic operation: it either succeeds or returns
/// an error with no state changed.
pub trait BankController {
    /// Check the PIN for an account and bind it to the session on success
    fn login(&self, id: AccountId, pin: u32) -> Result<(), BankError>;

    /// Whether an account with the given ID exists (no PIN check)
    fn account_exists(&self, id: AccountId) -> bool;

    /// Open a new account from a type tag
    fn open_account(
        &self,
        kind: char,
        id: AccountId,
        pin: u32,
        balance: Decimal,
    ) -> Result<Account, BankError>;

    /// Close an account, returning it as it was at closing
    fn close_account(&self, id: AccountId) -> Result<Account, BankError>;

    /// Deposit into the target account, returning the new balance
    fn deposit(&self, target: Target, amount: Decimal) -> Result<Decimal, BankError>;

    /// Withdraw from the target account, returning the new balance
    fn withdraw(&self, target: Target, amount: Decimal) -> Result<Decimal, BankError>;

    /// Current balance of the target account
    fn balance_of(&self, target: Target) -> Result<Decimal, BankError>;

    /// Snapshot of every account, sorted by ID
    fn all_accounts(&self) -> Vec<Account>;

    /// Compile interest on every account, in ascending ID order
    fn apply_interest_to_all(&self) -> Vec<InterestAdjustment>;

    /// Whether `pin` matches the account's PIN; the session is not touched
    fn is_valid_login(&self, id: AccountId, pin: u32) -> bool;
}
