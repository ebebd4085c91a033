//! Ledger lifecycle
//!
//! `Bank` ties the controller to its ledger file: the ledger is loaded once in
//! `start` and saved once in `shutdown`. Nothing is persisted in between, so
//! the ledger is durable across clean shutdowns only.

use crate::core::controller::TransactionController;
use crate::core::registry::AccountRegistry;
use crate::io::LedgerFile;
use crate::types::BankError;
use tracing::info;

/// A running ledger: the controller plus where to persist it
#[derive(Debug)]
pub struct Bank {
    ledger: LedgerFile,
    controller: TransactionController,
}

impl Bank {
    /// Load the ledger and make it available through a controller
    ///
    /// A missing ledger file starts an empty bank.
    pub fn start(ledger: LedgerFile) -> Result<Self, BankError> {
        let registry = AccountRegistry::load(&ledger)?;
        Ok(Bank {
            ledger,
            controller: TransactionController::new(registry),
        })
    }

    pub fn controller(&self) -> &TransactionController {
        &self.controller
    }

    pub fn ledger(&self) -> &LedgerFile {
        &self.ledger
    }

    /// Save the ledger back to its file and stop
    pub fn shutdown(self) -> Result<(), BankError> {
        self.controller.save(&self.ledger)?;
        info!(path = %self.ledger.path.display(), "bank shut down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::{BankController, Target};
    use rust_decimal::Decimal;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_start_with_missing_ledger_is_empty() {
        let dir = TempDir::new().unwrap();

        let bank = Bank::start(LedgerFile::new(dir.path().join("bank.txt"))).unwrap();

        assert!(bank.controller().all_accounts().is_empty());
    }

    #[test]
    fn test_changes_are_persisted_on_shutdown() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bank.txt");
        fs::write(&path, "1001\ts\t1234\t500.00\n").unwrap();

        let bank = Bank::start(LedgerFile::new(&path)).unwrap();
        bank.controller()
            .deposit(Target::Account(1001), Decimal::new(150, 0))
            .unwrap();
        bank.controller()
            .open_account('x', 7, 1, Decimal::new(5000, 2))
            .unwrap();

        // Not saved before shutdown
        assert_eq!(fs::read_to_string(&path).unwrap(), "1001\ts\t1234\t500.00\n");

        bank.shutdown().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "7\tx\t1\t50.00\n1001\ts\t1234\t650.00\n"
        );
        assert!(!dir.path().join("bank.txt.old").exists());
    }

    #[test]
    fn test_shutdown_keeps_only_surviving_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bank.txt");
        let backup = dir.path().join("bank.txt.old");
        fs::write(&backup, "1001\ts\t1234\t500.00\n").unwrap();

        let bank = Bank::start(LedgerFile::new(&path)).unwrap();
        assert!(bank.controller().all_accounts().is_empty());
        bank.shutdown().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        assert_eq!(
            fs::read_to_string(&backup).unwrap(),
            "1001\ts\t1234\t500.00\n"
        );
    }
}
