//! Transaction controller
//!
//! This module provides the TransactionController, the single authority for
//! every change to the ledger, whichever front end makes the request.
//!
//! The controller enforces business rules such as:
//! - Unique account IDs and valid type tags, PINs and opening balances
//! - Non-negative amounts and sufficient funds for withdrawals
//! - At most one logged-in account per session
//!
//! # Thread Safety
//!
//! Registry and session live behind one mutex, and every public method holds
//! it for its whole body. The controller is `Send + Sync`; concurrent front ends
//! share it by reference or behind an `Arc`.

use crate::core::registry::AccountRegistry;
use crate::core::traits::{BankController, InterestAdjustment, Target};
use crate::io::{validate_pin, LedgerFile};
use crate::types::{Account, AccountId, AccountKind, BankError};
use rust_decimal::Decimal;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// The interactive login state
///
/// Holds the ID of the logged-in account, never the account itself; the
/// registry stays the only owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    account: Option<AccountId>,
}

impl Session {
    pub fn account_id(&self) -> Option<AccountId> {
        self.account
    }

    pub fn is_active(&self) -> bool {
        self.account.is_some()
    }

    fn bind(&mut self, id: AccountId) {
        self.account = Some(id);
    }

    fn clear(&mut self) {
        self.account = None;
    }
}

#[derive(Debug)]
struct ControllerState {
    registry: AccountRegistry,
    session: Session,
}

impl ControllerState {
    fn pin_matches(&self, id: AccountId, pin: u32) -> bool {
        self.registry
            .get(id)
            .is_some_and(|account| u32::from(account.pin()) == pin)
    }

    fn resolve(&self, target: Target) -> Result<AccountId, BankError> {
        match target {
            Target::Account(id) => Ok(id),
            Target::Session => self.session.account_id().ok_or(BankError::NoActiveSession),
        }
    }

    fn account(&self, target: Target) -> Result<&Account, BankError> {
        let id = self.resolve(target)?;
        self.registry
            .get(id)
            .ok_or_else(|| BankError::account_not_found(id))
    }

    fn account_mut(&mut self, target: Target) -> Result<&mut Account, BankError> {
        let id = self.resolve(target)?;
        self.registry
            .get_mut(id)
            .ok_or_else(|| BankError::account_not_found(id))
    }
}

/// Mediates every account operation
///
/// Owns the registry and the session. See the module docs for the locking
/// discipline.
#[derive(Debug)]
pub struct TransactionController {
    state: Mutex<ControllerState>,
}

impl TransactionController {
    /// Create a controller over a loaded registry, with nobody logged in
    pub fn new(registry: AccountRegistry) -> Self {
        TransactionController {
            state: Mutex::new(ControllerState {
                registry,
                session: Session::default(),
            }),
        }
    }

    // State is only written after all checks pass, so a poisoned lock never
    // guards a half-applied operation.
    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// End the current session, if any
    pub fn logout(&self) {
        let mut state = self.lock();
        if let Some(id) = state.session.account_id() {
            debug!(account = id, "logged out");
        }
        state.session.clear();
    }

    /// Snapshot of the logged-in account
    ///
    /// `None` if nobody is logged in or the account has since been closed.
    pub fn session_account(&self) -> Option<Account> {
        self.lock().account(Target::Session).ok().cloned()
    }

    /// Persist the registry while holding the lock
    pub fn save(&self, ledger: &LedgerFile) -> Result<(), BankError> {
        self.lock().registry.save(ledger)
    }

    /// Give up the controller and return its registry
    pub fn into_registry(self) -> AccountRegistry {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .registry
    }
}

impl BankController for TransactionController {
    fn login(&self, id: AccountId, pin: u32) -> Result<(), BankError> {
        let mut state = self.lock();
        if !state.pin_matches(id, pin) {
            return Err(BankError::InvalidCredentials { account: id });
        }

        state.session.bind(id);
        debug!(account = id, "logged in");
        Ok(())
    }

    fn is_valid_login(&self, id: AccountId, pin: u32) -> bool {
        self.lock().pin_matches(id, pin)
    }

    fn account_exists(&self, id: AccountId) -> bool {
        self.lock().registry.contains(id)
    }

    /// Open a new account
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The type tag is not `s`, `x` or `c`
    /// - The PIN has more than four digits
    /// - The opening balance is negative
    /// - An account with the same ID already exists
    fn open_account(
        &self,
        kind: char,
        id: AccountId,
        pin: u32,
        balance: Decimal,
    ) -> Result<Account, BankError> {
        if AccountKind::from_char(kind).is_none() {
            return Err(BankError::InvalidAccountKind { kind });
        }
        let pin = validate_pin(pin)?;
        if balance < Decimal::ZERO {
            return Err(BankError::invalid_amount(balance));
        }

        let mut state = self.lock();
        if state.registry.contains(id) {
            return Err(BankError::duplicate_account(id));
        }
        let account = AccountRegistry::create(kind, id, pin, balance)
            .ok_or(BankError::InvalidAccountKind { kind })?;
        state.registry.register(account.clone())?;

        debug!(account = id, kind = %kind, %balance, "account opened");
        Ok(account)
    }

    fn close_account(&self, id: AccountId) -> Result<Account, BankError> {
        let mut state = self.lock();
        let account = state
            .registry
            .unregister(id)
            .ok_or_else(|| BankError::account_not_found(id))?;

        if state.session.account_id() == Some(id) {
            state.session.clear();
        }

        debug!(account = id, "account closed");
        Ok(account)
    }

    fn deposit(&self, target: Target, amount: Decimal) -> Result<Decimal, BankError> {
        let mut state = self.lock();
        state.account_mut(target)?.deposit(amount)
    }

    fn withdraw(&self, target: Target, amount: Decimal) -> Result<Decimal, BankError> {
        let mut state = self.lock();
        state.account_mut(target)?.withdraw(amount)
    }

    fn balance_of(&self, target: Target) -> Result<Decimal, BankError> {
        self.lock().account(target).map(Account::balance)
    }

    fn all_accounts(&self) -> Vec<Account> {
        self.lock().registry.all().into_iter().cloned().collect()
    }

    /// Accounts whose settlement would overflow are left unchanged and reported
    /// with a zero adjustment.
    fn apply_interest_to_all(&self) -> Vec<InterestAdjustment> {
        let mut state = self.lock();
        let ids = state.registry.ids();

        let mut adjustments = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(account) = state.registry.get_mut(id) else {
                continue;
            };
            let previous = account.balance();
            let balance = match account.compile_interest() {
                Ok(balance) => balance,
                Err(e) => {
                    warn!(account = id, error = %e, "interest not applied");
                    previous
                }
            };
            adjustments.push(InterestAdjustment {
                account: id,
                previous,
                balance,
            });
        }

        info!(accounts = adjustments.len(), "interest applied");
        adjustments
    }
}
