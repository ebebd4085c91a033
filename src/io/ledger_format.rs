//! Ledger record format
//!
//! This module centralizes the ledger line format, providing:
//! - LedgerRecord structure for (de)serialization
//! - Conversion from ledger records to accounts, with validation
//! - Conversion from accounts back to ledger records
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Account, AccountId, AccountKind, BankError, Pin, MAX_PIN};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of fields on a well-formed ledger line
pub const LEDGER_FIELDS: usize = 4;

/// One ledger line: `id, typeChar, pin, balance`
///
/// Type tag and balance are kept as strings so that validation can report
/// exactly what was wrong with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub id: AccountId,
    pub kind: String,
    pub pin: u32,
    pub balance: String,
}

/// Check that a PIN has at most four digits
pub fn validate_pin(pin: u32) -> Result<Pin, BankError> {
    Pin::try_from(pin)
        .ok()
        .filter(|pin| *pin <= MAX_PIN)
        .ok_or(BankError::InvalidPin { pin })
}

/// Convert a LedgerRecord to an Account
///
/// This function:
/// - Parses the type tag (single character, case-insensitive)
/// - Checks the PIN has at most four digits
/// - Parses the balance into a Decimal and rejects negative balances
///
/// # Returns
///
/// * `Ok(Account)` - Successfully converted record
/// * `Err(BankError)` - Description of the first invalid field
pub fn convert_ledger_record(record: LedgerRecord) -> Result<Account, BankError> {
    let mut tag = record.kind.chars();
    let kind = match (tag.next(), tag.next()) {
        (Some(c), None) => {
            AccountKind::from_char(c).ok_or(BankError::InvalidAccountKind { kind: c })?
        }
        _ => {
            return Err(BankError::parse_error(
                None,
                format!("invalid type tag '{}' for account {}", record.kind, record.id),
            ))
        }
    };

    let pin = validate_pin(record.pin)?;

    let balance = Decimal::from_str(record.balance.trim()).map_err(|_| {
        BankError::parse_error(
            None,
            format!(
                "invalid balance '{}' for account {}",
                record.balance, record.id
            ),
        )
    })?;
    if balance < Decimal::ZERO {
        return Err(BankError::invalid_amount(balance));
    }

    Ok(Account::new(kind, record.id, pin, balance))
}

impl From<&Account> for LedgerRecord {
    fn from(account: &Account) -> Self {
        LedgerRecord {
            id: account.id(),
            kind: account.display_char().to_string(),
            pin: u32::from(account.pin()),
            balance: account.balance().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(id: AccountId, kind: &str, pin: u32, balance: &str) -> LedgerRecord {
        LedgerRecord {
            id,
            kind: kind.to_string(),
            pin,
            balance: balance.to_string(),
        }
    }

    #[rstest]
    #[case::savings("s", AccountKind::Savings)]
    #[case::checking("x", AccountKind::Checking)]
    #[case::cd("c", AccountKind::CertificateOfDeposit)]
    #[case::uppercase("X", AccountKind::Checking)]
    fn test_convert_valid_record(#[case] tag: &str, #[case] expected: AccountKind) {
        let account = convert_ledger_record(record(1001, tag, 1234, "500.00")).unwrap();

        assert_eq!(account.id(), 1001);
        assert_eq!(account.kind(), expected);
        assert_eq!(account.pin(), 1234);
        assert_eq!(account.balance(), Decimal::new(50000, 2));
    }

    #[rstest]
    #[case::unknown_kind(record(1, "q", 1234, "1.00"))]
    #[case::multi_char_kind(record(1, "ss", 1234, "1.00"))]
    #[case::empty_kind(record(1, "", 1234, "1.00"))]
    #[case::five_digit_pin(record(1, "s", 12345, "1.00"))]
    #[case::non_numeric_balance(record(1, "s", 1234, "lots"))]
    #[case::negative_balance(record(1, "s", 1234, "-0.01"))]
    fn test_convert_invalid_record(#[case] input: LedgerRecord) {
        assert!(convert_ledger_record(input).is_err());
    }

    #[test]
    fn test_unknown_kind_reports_tag() {
        let result = convert_ledger_record(record(1, "q", 1234, "1.00"));
        assert_eq!(result, Err(BankError::InvalidAccountKind { kind: 'q' }));
    }

    #[rstest]
    #[case::zero(0, Ok(0))]
    #[case::max(9999, Ok(9999))]
    #[case::too_long(10000, Err(BankError::InvalidPin { pin: 10000 }))]
    #[case::beyond_u16(70000, Err(BankError::InvalidPin { pin: 70000 }))]
    fn test_validate_pin(#[case] pin: u32, #[case] expected: Result<Pin, BankError>) {
        assert_eq!(validate_pin(pin), expected);
    }

    #[test]
    fn test_record_from_account_keeps_scale() {
        let account = Account::new(AccountKind::Checking, 42, 7, Decimal::new(2700, 2));

        assert_eq!(LedgerRecord::from(&account), record(42, "x", 7, "27.00"));
    }
}
