//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account, account kinds and their interest policy
//! - `error`: Error types for the bank ledger

pub mod account;
pub mod error;

pub use account::{round_to_cents, Account, AccountId, AccountKind, Pin, MAX_PIN};
pub use error::BankError;
