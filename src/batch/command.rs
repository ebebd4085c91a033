//! Batch command parsing
//!
//! A script line is a command letter, one separator character (conventionally
//! a space), then whitespace-separated arguments. The letter selects an entry
//! in a fixed dispatch table:
//!
//! | Letter | Command | Arguments |
//! |---|---|---|
//! | `o` | open account | type-char, id, pin, balance |
//! | `c` | close account | id |
//! | `d` | deposit | id, amount |
//! | `w` | withdraw | id, amount |
//! | `a` | apply interest to all accounts | (none) |

use crate::types::{AccountId, BankError};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Entry in the command dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Open,
    Close,
    Deposit,
    Withdraw,
    ApplyInterest,
}

impl CommandKind {
    /// Look up a command letter; `None` for letters outside the table
    pub fn from_char(letter: char) -> Option<Self> {
        match letter {
            'o' => Some(CommandKind::Open),
            'c' => Some(CommandKind::Close),
            'd' => Some(CommandKind::Deposit),
            'w' => Some(CommandKind::Withdraw),
            'a' => Some(CommandKind::ApplyInterest),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            CommandKind::Open => 'o',
            CommandKind::Close => 'c',
            CommandKind::Deposit => 'd',
            CommandKind::Withdraw => 'w',
            CommandKind::ApplyInterest => 'a',
        }
    }
}

/// A fully parsed batch command
#[derive(Debug, Clone, PartialEq)]
pub enum BatchCommand {
    Open {
        kind: char,
        id: AccountId,
        pin: u32,
        balance: Decimal,
    },
    Close {
        id: AccountId,
    },
    Deposit {
        id: AccountId,
        amount: Decimal,
    },
    Withdraw {
        id: AccountId,
        amount: Decimal,
    },
    ApplyInterest,
}

impl BatchCommand {
    /// Parse the arguments for a command
    ///
    /// Extra trailing arguments are ignored.
    ///
    /// # Errors
    ///
    /// Returns `BankError::InvalidCommand` if an argument is missing or is not
    /// a number where one is expected.
    pub fn parse(kind: CommandKind, args: &[&str]) -> Result<Self, BankError> {
        let letter = kind.letter();
        let command = match kind {
            CommandKind::Open => {
                let tag = required(letter, args, 0, "account type")?;
                BatchCommand::Open {
                    // The tag is validated by the controller, not here
                    kind: tag.chars().next().unwrap_or_default(),
                    id: number(letter, args, 1, "account id")?,
                    pin: number(letter, args, 2, "pin")?,
                    balance: number(letter, args, 3, "balance")?,
                }
            }
            CommandKind::Close => BatchCommand::Close {
                id: number(letter, args, 0, "account id")?,
            },
            CommandKind::Deposit => BatchCommand::Deposit {
                id: number(letter, args, 0, "account id")?,
                amount: number(letter, args, 1, "amount")?,
            },
            CommandKind::Withdraw => BatchCommand::Withdraw {
                id: number(letter, args, 0, "account id")?,
                amount: number(letter, args, 1, "amount")?,
            },
            CommandKind::ApplyInterest => BatchCommand::ApplyInterest,
        };
        Ok(command)
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            BatchCommand::Open { .. } => CommandKind::Open,
            BatchCommand::Close { .. } => CommandKind::Close,
            BatchCommand::Deposit { .. } => CommandKind::Deposit,
            BatchCommand::Withdraw { .. } => CommandKind::Withdraw,
            BatchCommand::ApplyInterest => CommandKind::ApplyInterest,
        }
    }
}

/// A script line split into its command and raw arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine<'a> {
    pub kind: CommandKind,
    pub args: Vec<&'a str>,
}

/// Split a script line into command and arguments
///
/// The first character is the command letter and the second is a separator,
/// whatever it is. The rest is split on whitespace. Returns `None` for blank
/// lines and unknown command letters; such lines are skipped by the
/// interpreter.
pub fn split_line(line: &str) -> Option<ScriptLine<'_>> {
    let mut chars = line.chars();
    let kind = CommandKind::from_char(chars.next()?)?;
    chars.next();
    Some(ScriptLine {
        kind,
        args: chars.as_str().split_whitespace().collect(),
    })
}

fn required<'a>(
    letter: char,
    args: &[&'a str],
    index: usize,
    name: &str,
) -> Result<&'a str, BankError> {
    args.get(index)
        .copied()
        .ok_or_else(|| BankError::invalid_command(letter, format!("missing {}", name)))
}

fn number<T: FromStr>(
    letter: char,
    args: &[&str],
    index: usize,
    name: &str,
) -> Result<T, BankError> {
    let raw = required(letter, args, index, name)?;
    raw.parse()
        .map_err(|_| BankError::invalid_command(letter, format!("invalid {} '{}'", name, raw)))
}
