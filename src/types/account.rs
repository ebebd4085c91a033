//! Account-related types for the bank ledger
//!
//! This module defines the Account structure, the closed set of account kinds,
//! and the per-kind policy (minimum balance, monthly rate, below-minimum penalty)
//! applied when interest is compiled at monthly settlement.

use super::error::BankError;
use rust_decimal::{Decimal, RoundingStrategy};

/// Account identifier
///
/// Non-negative and unique across the registry
pub type AccountId = u32;

/// Four digit advisory PIN (0000-9999)
pub type Pin = u16;

/// Largest PIN accepted when opening or loading an account
pub const MAX_PIN: Pin = 9999;

/// Round a currency amount to whole cents
///
/// Midpoints round away from zero, matching how reports print `%.2f` values.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The kind of an account, fixed at creation
///
/// Each kind carries its own display tag, minimum balance, monthly interest
/// rate and below-minimum penalty shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    /// Interest bearing above 200, penalized below it
    Savings,

    /// Never earns interest, penalized below 50
    Checking,

    /// Certificate of deposit
    ///
    /// Earns a fixed 2% annual rate (paid monthly) with no below-minimum penalty.
    CertificateOfDeposit,
}

impl AccountKind {
    /// Every account kind, in display order
    pub const ALL: [AccountKind; 3] = [
        AccountKind::Savings,
        AccountKind::Checking,
        AccountKind::CertificateOfDeposit,
    ];

    /// Parse a type tag (`s`, `x`, `c`), ignoring case
    ///
    /// # Returns
    ///
    /// `None` if the character is not a known type tag
    pub fn from_char(tag: char) -> Option<Self> {
        match tag.to_ascii_lowercase() {
            's' => Some(AccountKind::Savings),
            'x' => Some(AccountKind::Checking),
            'c' => Some(AccountKind::CertificateOfDeposit),
            _ => None,
        }
    }

    /// Lowercase type tag used by the ledger file and batch scripts
    pub fn display_char(self) -> char {
        match self {
            AccountKind::Savings => 's',
            AccountKind::Checking => 'x',
            AccountKind::CertificateOfDeposit => 'c',
        }
    }

    /// Human readable label used in reports
    pub fn display_label(self) -> &'static str {
        match self {
            AccountKind::Savings => "Savings",
            AccountKind::Checking => "Checking",
            AccountKind::CertificateOfDeposit => "CD",
        }
    }

    /// Balance below which the penalty branch of `compile_interest` applies
    pub fn minimum_balance(self) -> Decimal {
        match self {
            AccountKind::Savings => Decimal::new(200, 0),
            AccountKind::Checking => Decimal::new(50, 0),
            AccountKind::CertificateOfDeposit => Decimal::new(1000, 0),
        }
    }

    /// Interest rate applied once per monthly settlement
    pub fn monthly_interest_rate(self) -> Decimal {
        let months = Decimal::from(12);
        match self {
            AccountKind::Savings => Decimal::new(5, 3) / months,
            AccountKind::Checking => Decimal::ZERO,
            AccountKind::CertificateOfDeposit => Decimal::new(2, 2) / months,
        }
    }

    /// Largest penalty charged below the minimum balance
    ///
    /// The charge is the smaller of this fee and 10% of the balance. `None`
    /// means the kind is never penalized.
    pub fn penalty_fee(self) -> Option<Decimal> {
        match self {
            AccountKind::Savings => Some(Decimal::new(10, 0)),
            AccountKind::Checking => Some(Decimal::new(5, 0)),
            AccountKind::CertificateOfDeposit => None,
        }
    }
}

/// A single ledger entry
///
/// Identity (`id`, `pin`, `kind`) is immutable after creation. The balance only
/// changes through `deposit`, `withdraw` and `compile_interest`, each of which
/// checks its precondition first and leaves the account untouched on failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    kind: AccountKind,
    pin: Pin,
    balance: Decimal,
}

impl Account {
    /// Create an account with the given identity and opening balance
    ///
    /// No validation happens here; the registry factory and the controller
    /// decide which accounts may exist.
    pub fn new(kind: AccountKind, id: AccountId, pin: Pin, balance: Decimal) -> Self {
        Account {
            id,
            kind,
            pin,
            balance,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn pin(&self) -> Pin {
        self.pin
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn display_char(&self) -> char {
        self.kind.display_char()
    }

    pub fn display_label(&self) -> &'static str {
        self.kind.display_label()
    }

    pub fn minimum_balance(&self) -> Decimal {
        self.kind.minimum_balance()
    }

    pub fn monthly_interest_rate(&self) -> Decimal {
        self.kind.monthly_interest_rate()
    }

    /// Whether `amount` may be deposited (any non-negative amount)
    pub fn can_deposit(&self, amount: Decimal) -> bool {
        amount >= Decimal::ZERO
    }

    /// Whether `amount` may be withdrawn without driving the balance negative
    pub fn can_withdraw(&self, amount: Decimal) -> bool {
        amount >= Decimal::ZERO && amount <= self.balance
    }

    /// Deposit funds into the account
    ///
    /// # Arguments
    ///
    /// * `amount` - The amount to deposit (must be non-negative)
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - The new balance
    /// * `Err(BankError)` - If the amount is negative or the sum would overflow
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, BankError> {
        if !self.can_deposit(amount) {
            return Err(BankError::invalid_amount(amount));
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("deposit", self.id))?;

        Ok(self.balance)
    }

    /// Withdraw funds from the account
    ///
    /// # Arguments
    ///
    /// * `amount` - The amount to withdraw (must be between zero and the balance)
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - The new balance
    /// * `Err(BankError)` - If the amount is negative or exceeds the balance
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, BankError> {
        if amount < Decimal::ZERO {
            return Err(BankError::invalid_amount(amount));
        }
        if !self.can_withdraw(amount) {
            return Err(BankError::insufficient_funds(self.id, self.balance, amount));
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("withdrawal", self.id))?;

        Ok(self.balance)
    }

    /// Apply the monthly settlement for this account's kind
    ///
    /// Below the minimum balance, kinds with a penalty fee are charged the smaller
    /// of that fee and 10% of the balance. Otherwise
    /// the balance grows by `balance * monthly_interest_rate()`. The result is
    /// rounded to cents.
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - The new balance
    /// * `Err(BankError)` - If the computation would overflow (balance unchanged)
    pub fn compile_interest(&mut self) -> Result<Decimal, BankError> {
        let overflow = || BankError::arithmetic_overflow("interest", self.id);

        let new_balance = match self.kind.penalty_fee() {
            Some(fee) if self.balance < self.minimum_balance() => {
                let tenth = self
                    .balance
                    .checked_mul(Decimal::new(1, 1))
                    .ok_or_else(overflow)?;
                let penalty = fee.min(tenth);
                self.balance.checked_sub(penalty).ok_or_else(overflow)?
            }
            _ => {
                let interest = self
                    .balance
                    .checked_mul(self.monthly_interest_rate())
                    .ok_or_else(overflow)?;
                self.balance.checked_add(interest).ok_or_else(overflow)?
            }
        };

        self.balance = round_to_cents(new_balance);
        Ok(self.balance)
    }

    /// Format the account as `id<d>typeChar<d>pin<d>balance`
    ///
    /// This is the ledger line shape; the balance keeps its stored scale.
    pub fn format_with(&self, delimiter: char) -> String {
        format!(
            "{id}{d}{kind}{d}{pin}{d}{balance}",
            id = self.id,
            kind = self.display_char(),
            pin = self.pin,
            balance = self.balance,
            d = delimiter
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[rstest]
    #[case::savings('s', Some(AccountKind::Savings))]
    #[case::checking('x', Some(AccountKind::Checking))]
    #[case::cd('c', Some(AccountKind::CertificateOfDeposit))]
    #[case::uppercase_savings('S', Some(AccountKind::Savings))]
    #[case::uppercase_checking('X', Some(AccountKind::Checking))]
    #[case::unknown('q', None)]
    fn test_kind_from_char(#[case] tag: char, #[case] expected: Option<AccountKind>) {
        assert_eq!(AccountKind::from_char(tag), expected);
    }

    #[test]
    fn test_kind_display_char_round_trips() {
        for kind in AccountKind::ALL {
            assert_eq!(AccountKind::from_char(kind.display_char()), Some(kind));
        }
    }

    #[rstest]
    #[case::zero("0", true)]
    #[case::positive("150", true)]
    #[case::negative("-0.01", false)]
    fn test_can_deposit(#[case] amount: &str, #[case] expected: bool) {
        let account = Account::new(AccountKind::Savings, 1, 1234, dec("10"));
        assert_eq!(account.can_deposit(dec(amount)), expected);
    }

    #[rstest]
    #[case::zero("0", true)]
    #[case::partial("5.50", true)]
    #[case::exact_balance("10.00", true)]
    #[case::over_balance("10.01", false)]
    #[case::negative("-1", false)]
    fn test_can_withdraw(#[case] amount: &str, #[case] expected: bool) {
        let account = Account::new(AccountKind::Checking, 1, 1234, dec("10.00"));
        assert_eq!(account.can_withdraw(dec(amount)), expected);
    }

    #[test]
    fn test_deposit_adds_amount() {
        let mut account = Account::new(AccountKind::Savings, 1001, 1234, dec("500.00"));

        let balance = account.deposit(dec("150")).unwrap();

        assert_eq!(balance, dec("650.00"));
        assert_eq!(account.balance(), dec("650.00"));
    }

    #[test]
    fn test_deposit_negative_amount_fails_without_change() {
        let mut account = Account::new(AccountKind::Savings, 1001, 1234, dec("500.00"));

        let result = account.deposit(dec("-1"));

        assert!(matches!(result, Err(BankError::InvalidAmount { .. })));
        assert_eq!(account.balance(), dec("500.00"));
    }

    #[test]
    fn test_deposit_overflow_leaves_balance() {
        let mut account = Account::new(AccountKind::Checking, 7, 1, Decimal::MAX);

        let result = account.deposit(Decimal::ONE);

        assert!(matches!(result, Err(BankError::ArithmeticOverflow { .. })));
        assert_eq!(account.balance(), Decimal::MAX);
    }

    #[test]
    fn test_withdraw_subtracts_amount() {
        let mut account = Account::new(AccountKind::Checking, 1, 1234, dec("100"));

        assert_eq!(account.withdraw(dec("100")).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_withdraw_over_balance_fails_without_change() {
        let mut account = Account::new(AccountKind::Savings, 1001, 1234, dec("650.00"));

        let result = account.withdraw(dec("1000"));

        assert!(matches!(result, Err(BankError::InsufficientFunds { .. })));
        assert_eq!(account.balance(), dec("650.00"));
    }

    #[test]
    fn test_withdraw_negative_amount_is_invalid() {
        let mut account = Account::new(AccountKind::Savings, 1, 1234, dec("10"));

        let result = account.withdraw(dec("-5"));

        assert!(matches!(result, Err(BankError::InvalidAmount { .. })));
        assert_eq!(account.balance(), dec("10"));
    }

    #[rstest]
    // Interest branch
    #[case::savings_at_minimum(AccountKind::Savings, "200", "200.08")]
    #[case::savings_above_minimum(AccountKind::Savings, "500.00", "500.21")]
    #[case::checking_at_minimum(AccountKind::Checking, "50", "50.00")]
    #[case::checking_above_minimum(AccountKind::Checking, "1000", "1000.00")]
    #[case::cd_above_minimum(AccountKind::CertificateOfDeposit, "1200", "1202.00")]
    #[case::cd_below_minimum_still_earns(AccountKind::CertificateOfDeposit, "600", "601.00")]
    // Penalty branch
    #[case::savings_flat_fee(AccountKind::Savings, "150", "140.00")]
    #[case::savings_ten_percent(AccountKind::Savings, "5", "4.50")]
    #[case::savings_at_fee_boundary(AccountKind::Savings, "100", "90.00")]
    #[case::savings_exactly_fee(AccountKind::Savings, "10", "9.00")]
    #[case::checking_below_minimum(AccountKind::Checking, "30", "27.00")]
    #[case::checking_just_below_minimum(AccountKind::Checking, "49.99", "44.99")]
    #[case::checking_ten_percent(AccountKind::Checking, "3", "2.70")]
    #[case::checking_empty(AccountKind::Checking, "0", "0.00")]
    fn test_compile_interest(
        #[case] kind: AccountKind,
        #[case] balance: &str,
        #[case] expected: &str,
    ) {
        let mut account = Account::new(kind, 1, 1234, dec(balance));

        let new_balance = account.compile_interest().unwrap();

        assert_eq!(new_balance, dec(expected));
        assert_eq!(account.balance(), dec(expected));
        assert!(account.balance() >= Decimal::ZERO);
    }

    #[test]
    fn test_format_with_tab_delimiter() {
        let account = Account::new(AccountKind::Savings, 1001, 1234, dec("500.00"));
        assert_eq!(account.format_with('\t'), "1001\ts\t1234\t500.00");
    }

    #[test]
    fn test_format_with_custom_delimiter() {
        let account = Account::new(AccountKind::CertificateOfDeposit, 7, 42, dec("3"));
        assert_eq!(account.format_with('|'), "7|c|42|3");
    }

    #[test]
    fn test_round_to_cents_rounds_midpoint_away_from_zero() {
        assert_eq!(round_to_cents(dec("0.125")), dec("0.13"));
        assert_eq!(round_to_cents(dec("-0.125")), dec("-0.13"));
        assert_eq!(round_to_cents(dec("1.2")), dec("1.2"));
    }
}
