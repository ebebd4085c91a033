//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - The front-end boundary (`BankController`, `Target`)
//! - `registry` - Account ownership, uniqueness and persistence
//! - `controller` - Validated, serialized account operations and the session
//! - `bank` - Load-at-start / save-at-shutdown lifecycle

pub mod bank;
pub mod controller;
pub mod registry;
pub mod traits;

pub use bank::Bank;
pub use controller::{Session, TransactionController};
pub use registry::AccountRegistry;
pub use traits::{BankController, InterestAdjustment, Target};
