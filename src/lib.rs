//! Bank Ledger Library
//! # Overview
//!
//! This library keeps a small bank's accounts in a delimited text ledger and
//! replays batch command scripts against it.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, AccountKind, BankError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::registry`] - In-memory account store keyed by ID
//!   - [`core::controller`] - Serialized access to the registry plus the login session
//!   - [`core::bank`] - Load at startup, save at shutdown
//! - [`io`] - Ledger file parsing and persistence
//! - [`batch`] - Batch command parsing, replay and reports
//!
//! # Account Types
//!
//! | Type | Tag | Minimum | Monthly rate | Penalty fee |
//! |---|---|---|---|---|
//! | Savings | `s` | 200 | 0.5% / 12 | 10 |
//! | Checking | `x` | 50 | 0 | 5 |
//! | CD | `c` | 1000 | 2% / 12 | none |
//!
//! Compiling interest on an account below its minimum charges
//! `min(fee, 10% of balance)`; otherwise the monthly interest is added.

// Module declarations
pub mod batch;
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use batch::{BatchInterpreter, BatchSummary};
pub use core::{AccountRegistry, Bank, BankController, Target, TransactionController};
pub use io::LedgerFile;
pub use types::{Account, AccountId, AccountKind, BankError, Pin};
