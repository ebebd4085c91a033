//! I/O module
//!
//! Handles the ledger file format and its persistence.
//!
//! # Components
//!
//! - `ledger_format` - Ledger record handling (record conversion, validation)
//! - `ledger_file` - Ledger file load/save with a backup swap

pub mod ledger_file;
pub mod ledger_format;

pub use ledger_file::{LedgerFile, DEFAULT_DELIMITER};
pub use ledger_format::{convert_ledger_record, validate_pin, LedgerRecord};
