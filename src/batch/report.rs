//! Fixed-column batch report formatting
//!
//! Every currency value is printed right-aligned in nine columns with two
//! decimals (`$ {:>9.2}`), and every command line starts with the account ID
//! left-aligned in seven columns.

use crate::batch::command::CommandKind;
use crate::core::InterestAdjustment;
use crate::types::{round_to_cents, Account, AccountId};
use rust_decimal::Decimal;
use std::io::Write;

const INTEREST_TITLE: &str = "============== Interest Report ==============";
const INTEREST_HEADER: &str = "Account Adjustment      New Balance";
const INTEREST_RULE: &str = "------- -----------     -----------";

/// Format a currency amount as a nine-column, two-decimal field
pub fn money(amount: Decimal) -> String {
    let cents = round_to_cents(amount);
    // Never print "-0.00"
    let cents = if cents.is_zero() { Decimal::ZERO } else { cents };
    format!("{:>9}", format!("{:.2}", cents))
}

/// Write a bank data report: every account with its type, ID and balance
///
/// Accounts are printed in the order given; callers pass them sorted by ID.
pub fn write_bank_data(
    output: &mut dyn Write,
    title: &str,
    accounts: &[Account],
) -> std::io::Result<()> {
    let heading = format!("============== {} Bank Data ==============", title);

    writeln!(output)?;
    writeln!(output, "{}", heading)?;
    writeln!(output, "{:<19} {:<7} {:>11}", "Type", "Account", "Balance")?;
    writeln!(
        output,
        "{} {} {}",
        "-".repeat(19),
        "-".repeat(7),
        "-".repeat(11)
    )?;
    for account in accounts {
        writeln!(
            output,
            "{:<19} {:<7} $ {}",
            account.display_label(),
            account.id(),
            money(account.balance())
        )?;
    }
    writeln!(output, "{}", "=".repeat(heading.chars().count()))?;
    writeln!(output)
}

/// Write the interest report for an apply-interest command
pub fn write_interest_report(
    output: &mut dyn Write,
    adjustments: &[InterestAdjustment],
) -> std::io::Result<()> {
    writeln!(output)?;
    writeln!(output, "{}", INTEREST_TITLE)?;
    writeln!(output, "{}", INTEREST_HEADER)?;
    writeln!(output, "{}", INTEREST_RULE)?;
    for adjustment in adjustments {
        writeln!(
            output,
            "{:<7} $ {}     $ {}",
            adjustment.account,
            money(adjustment.adjustment()),
            money(adjustment.balance)
        )?;
    }
    writeln!(output, "{}", "=".repeat(INTEREST_TITLE.len()))?;
    writeln!(output)
}

/// Outcome line for an open command; `balance` is `None` on failure
pub fn open_line(id: AccountId, kind: char, balance: Option<Decimal>) -> String {
    match balance {
        Some(balance) => format!(
            "{:<7} o   {}   Open: Success   $ {}",
            id,
            kind,
            money(balance)
        ),
        None => format!("{:<7} o   {}   Open: Failed", id, kind),
    }
}

/// Outcome line for a close command; `balance` is the closing balance
pub fn close_line(id: AccountId, balance: Option<Decimal>) -> String {
    match balance {
        Some(balance) => format!("{:<7} c       Closed: Success $ {}", id, money(balance)),
        None => format!("{:<7} c       Closed: Failed", id),
    }
}

/// Outcome line for a deposit or withdrawal; `balance` is the new balance
pub fn transfer_line(
    command: CommandKind,
    id: AccountId,
    amount: Decimal,
    balance: Option<Decimal>,
) -> String {
    let prefix = format!("{:<7} {}       $ {}     ", id, command.letter(), money(amount));
    match balance {
        Some(balance) => format!("{}$ {}", prefix, money(balance)),
        None => format!("{}Failed", prefix),
    }
}

/// Line for a command whose arguments could not be parsed
pub fn invalid_line(command: CommandKind, first_arg: &str) -> String {
    format!("{:<7} {}       Failed", first_arg, command.letter())
}
