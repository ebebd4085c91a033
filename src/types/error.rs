//! Error types for the bank ledger
//!
//! This module defines all error types that can occur while loading, mutating
//! and persisting the ledger. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: Ledger or batch file not found, unreadable, unwritable
//! - **Parsing Errors**: Malformed ledger lines or batch arguments (recovered locally)
//! - **Business Rule Errors**: Insufficient funds, duplicate or unknown account, invalid amount
//! - **Session Errors**: Failed login, no active session

use super::account::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the bank ledger
///
/// Every fallible ledger operation returns this type. Business rule variants
/// are the "failed" outcome of an operation and never leave state partially
/// applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// File not found at the specified path
    ///
    /// Fatal for a batch script. A missing ledger file is not reported with
    /// this variant; it loads as an empty registry.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Malformed ledger line or batch argument
    ///
    /// This is a recoverable error - the offending line is skipped.
    #[error("Parse error{}: {message}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Unknown account type tag
    #[error("Invalid account type '{kind}'")]
    InvalidAccountKind {
        /// The unrecognized type tag
        kind: char,
    },

    /// PIN outside 0000-9999
    #[error("Invalid PIN {pin}: must be at most four digits")]
    InvalidPin {
        /// The rejected PIN
        pin: u32,
    },

    /// Negative amount for a deposit, withdrawal or opening balance
    #[error("Invalid amount {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Insufficient funds for withdrawal
    ///
    /// The withdrawal is rejected and the account state remains unchanged.
    #[error("Insufficient funds for account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account ID
        account: AccountId,
        /// Current balance
        balance: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Account ID already present in the registry
    #[error("Account {account} already exists")]
    DuplicateAccount {
        /// The duplicated account ID
        account: AccountId,
    },

    /// No account with the given ID
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The missing account ID
        account: AccountId,
    },

    /// Login with an unknown account or a wrong PIN
    #[error("Invalid credentials for account {account}")]
    InvalidCredentials {
        /// The account ID used to log in
        account: AccountId,
    },

    /// A session operation was attempted with nobody logged in
    #[error("No account is logged in")]
    NoActiveSession,

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected to maintain account integrity.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account ID
        account: AccountId,
    },

    /// Batch line whose arguments could not be parsed
    #[error("Invalid '{command}' command: {message}")]
    InvalidCommand {
        /// The command letter
        command: char,
        /// What was wrong with the arguments
        message: String,
    },
}

// Conversion from io::Error to BankError
impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to BankError
impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        BankError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BankError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        BankError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create a ParseError error
    pub fn parse_error(line: Option<u64>, message: impl Into<String>) -> Self {
        BankError::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        BankError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: AccountId, balance: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(account: AccountId) -> Self {
        BankError::DuplicateAccount { account }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountId) -> Self {
        BankError::AccountNotFound { account }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: AccountId) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    /// Create an InvalidCommand error
    pub fn invalid_command(command: char, message: impl Into<String>) -> Self {
        BankError::InvalidCommand {
            command,
            message: message.into(),
        }
    }

    /// Whether the error is a rejected operation rather than an I/O or parse failure
    pub fn is_business_rule(&self) -> bool {
        !matches!(
            self,
            BankError::FileNotFound { .. }
                | BankError::IoError { .. }
                | BankError::ParseError { .. }
                | BankError::InvalidCommand { .. }
        )
    }
}
