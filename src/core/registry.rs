//! Account registry module
//!
//! This module provides the `AccountRegistry` struct, the authoritative in-memory
//! index of every account in the ledger.
//!
//! The AccountRegistry is responsible for:
//! - Creating accounts from a type tag (factory)
//! - Enforcing account ID uniqueness
//! - Providing sorted account listings for reports and persistence
//! - Loading from and saving to the ledger file

use crate::io::LedgerFile;
use crate::types::{Account, AccountId, AccountKind, BankError, Pin};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{info, warn};

/// Owns every account in the ledger
///
/// The registry maintains an in-memory map of account IDs to accounts. Callers
/// may borrow accounts, but only the registry decides which accounts exist.
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    /// Map of account IDs to accounts
    accounts: HashMap<AccountId, Account>,
}

impl AccountRegistry {
    /// Create a new AccountRegistry with no accounts
    pub fn new() -> Self {
        AccountRegistry {
            accounts: HashMap::new(),
        }
    }

    /// Build an account from its type tag
    ///
    /// # Arguments
    ///
    /// * `kind` - Type tag (`s`, `x` or `c`, case-insensitive)
    /// * `id`, `pin`, `balance` - Identity and opening balance
    ///
    /// # Returns
    ///
    /// The new account, or `None` if the type tag is not recognized
    pub fn create(kind: char, id: AccountId, pin: Pin, balance: Decimal) -> Option<Account> {
        AccountKind::from_char(kind).map(|kind| Account::new(kind, id, pin, balance))
    }

    /// Load the registry from a ledger file
    ///
    /// A missing file yields an empty registry. Malformed lines and lines whose
    /// ID is already loaded are skipped.
    pub fn load(ledger: &LedgerFile) -> Result<Self, BankError> {
        let mut registry = AccountRegistry::new();

        for account in ledger.load()? {
            if let Err(e) = registry.register(account) {
                warn!(error = %e, "skipping duplicate ledger entry");
            }
        }

        info!(
            path = %ledger.path.display(),
            accounts = registry.len(),
            "ledger loaded"
        );
        Ok(registry)
    }

    /// Save every account to the ledger file, sorted by ID
    pub fn save(&self, ledger: &LedgerFile) -> Result<(), BankError> {
        ledger.save(self.all())
    }

    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn get_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.get_mut(&id)
    }

    pub fn contains(&self, id: AccountId) -> bool {
        self.accounts.contains_key(&id)
    }

    /// Get all accounts sorted by account ID
    ///
    /// Sorting gives deterministic report and ledger output regardless of
    /// insertion order.
    pub fn all(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by_key(|account| account.id());
        accounts
    }

    /// IDs of all accounts, ascending
    pub fn ids(&self) -> Vec<AccountId> {
        let mut ids: Vec<AccountId> = self.accounts.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Add an account to the registry
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The account was inserted
    /// * `Err(BankError::DuplicateAccount)` - The ID is taken; the existing account is untouched
    pub fn register(&mut self, account: Account) -> Result<(), BankError> {
        let id = account.id();
        if self.accounts.contains_key(&id) {
            return Err(BankError::duplicate_account(id));
        }
        self.accounts.insert(id, account);
        Ok(())
    }

    /// Remove and return an account, or `None` if absent
    pub fn unregister(&mut self, id: AccountId) -> Option<Account> {
        self.accounts.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl FromIterator<Account> for AccountRegistry {
    /// Collect accounts into a registry; later duplicates are dropped
    fn from_iter<T: IntoIterator<Item = Account>>(iter: T) -> Self {
        let mut registry = AccountRegistry::new();
        for account in iter {
            // First registration wins
            let _ = registry.register(account);
        }
        registry
    }
}
