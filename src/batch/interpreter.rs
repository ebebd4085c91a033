//! Batch script replay
//!
//! The interpreter replays a line-oriented command script against a
//! [`BankController`]. It keeps no state between lines: every line names its
//! target account explicitly.
//!
//! # Error Handling
//!
//! - Blank lines, unknown command letters and lines that are not valid UTF-8
//!   are skipped
//! - Lines with bad arguments print a `Failed` line and replay continues
//! - Business-rule failures (unknown account, insufficient funds, ...) print a
//!   `Failed` line and replay continues
//! - Failing to open or read the script, or to write the report, aborts the run

use crate::batch::command::{split_line, BatchCommand, CommandKind};
use crate::batch::report;
use crate::core::{BankController, Target};
use crate::types::{Account, BankError};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// What happened to a single script line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line or unknown command letter
    Skipped,
    Succeeded,
    Failed,
}

/// Counts of line outcomes for a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Lines that ran a command, successful or not
    pub executed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: LineOutcome) {
        match outcome {
            LineOutcome::Skipped => self.skipped += 1,
            LineOutcome::Succeeded => self.executed += 1,
            LineOutcome::Failed => {
                self.executed += 1;
                self.failed += 1;
            }
        }
    }
}

/// Replays batch scripts against a controller
pub struct BatchInterpreter<'a, C: BankController + ?Sized> {
    controller: &'a C,
}

impl<'a, C: BankController + ?Sized> BatchInterpreter<'a, C> {
    pub fn new(controller: &'a C) -> Self {
        BatchInterpreter { controller }
    }

    /// Replay the script at `script`, writing the report to `output`
    ///
    /// The script is opened before anything is written, so an unopenable
    /// script produces no report at all.
    ///
    /// # Arguments
    ///
    /// * `script` - Path to the batch command file
    /// * `output` - Destination for the Initial, per-command and Final reports
    ///
    /// # Errors
    ///
    /// Returns `BankError::FileNotFound` if the script does not exist, and
    /// `BankError::IoError` if it cannot be read or the report cannot be
    /// written.
    pub fn run(&self, script: &Path, output: &mut dyn Write) -> Result<BatchSummary, BankError> {
        let file = File::open(script).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                BankError::file_not_found(script)
            } else {
                BankError::from(e)
            }
        })?;
        info!(path = %script.display(), "replaying batch script");
        self.run_script(BufReader::new(file), output)
    }

    /// Replay a script from any buffered reader
    ///
    /// Lines that are not valid UTF-8 are skipped like any other malformed
    /// line; only read and write failures abort the replay.
    pub fn run_script<R: BufRead>(
        &self,
        mut script: R,
        output: &mut dyn Write,
    ) -> Result<BatchSummary, BankError> {
        report::write_bank_data(output, "Initial", &self.controller.all_accounts())?;

        let mut summary = BatchSummary::default();
        let mut buffer = Vec::new();
        let mut line_number = 0usize;
        loop {
            buffer.clear();
            if script.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            line_number += 1;

            let outcome = match std::str::from_utf8(&buffer) {
                Ok(text) => {
                    let text = text.trim_end();
                    let outcome = self.execute_line(text, output)?;
                    if outcome == LineOutcome::Failed {
                        debug!(line = line_number, text = %text, "command failed");
                    }
                    outcome
                }
                Err(e) => {
                    warn!(
                        line = line_number,
                        error = %e,
                        "skipping script line that is not valid UTF-8"
                    );
                    LineOutcome::Skipped
                }
            };
            summary.record(outcome);
        }

        report::write_bank_data(output, "Final", &self.controller.all_accounts())?;
        output.flush()?;

        info!(
            executed = summary.executed,
            failed = summary.failed,
            skipped = summary.skipped,
            "batch replay complete"
        );
        Ok(summary)
    }

    /// Execute one script line and write its report line
    ///
    /// # Errors
    ///
    /// Only report write failures are returned; command failures are reported
    /// in the output and as `LineOutcome::Failed`.
    pub fn execute_line(
        &self,
        line: &str,
        output: &mut dyn Write,
    ) -> Result<LineOutcome, BankError> {
        let Some(parsed) = split_line(line) else {
            if !line.trim().is_empty() {
                debug!(text = %line, "skipping unknown command");
            }
            return Ok(LineOutcome::Skipped);
        };

        match BatchCommand::parse(parsed.kind, &parsed.args) {
            Ok(command) => self.execute(&command, output),
            Err(e) => {
                warn!(error = %e, text = %line, "invalid command arguments");
                let first_arg = invalid_target(parsed.kind, &parsed.args);
                writeln!(output, "{}", report::invalid_line(parsed.kind, first_arg))?;
                Ok(LineOutcome::Failed)
            }
        }
    }

    /// Execute a parsed command and write its report line
    pub fn execute(
        &self,
        command: &BatchCommand,
        output: &mut dyn Write,
    ) -> Result<LineOutcome, BankError> {
        let succeeded = match *command {
            BatchCommand::Open {
                kind,
                id,
                pin,
                balance,
            } => {
                let result = self.controller.open_account(kind, id, pin, balance);
                let line = report::open_line(id, kind, account_balance(&result));
                writeln!(output, "{}", line)?;
                log_failure(command, result.as_ref().err());
                result.is_ok()
            }
            BatchCommand::Close { id } => {
                let result = self.controller.close_account(id);
                writeln!(output, "{}", report::close_line(id, account_balance(&result)))?;
                log_failure(command, result.as_ref().err());
                result.is_ok()
            }
            BatchCommand::Deposit { id, amount } => {
                let result = self.controller.deposit(Target::Account(id), amount);
                let balance = result.as_ref().ok().copied();
                let line = report::transfer_line(command.kind(), id, amount, balance);
                writeln!(output, "{}", line)?;
                log_failure(command, result.as_ref().err());
                result.is_ok()
            }
            BatchCommand::Withdraw { id, amount } => {
                let result = self.controller.withdraw(Target::Account(id), amount);
                let balance = result.as_ref().ok().copied();
                let line = report::transfer_line(command.kind(), id, amount, balance);
                writeln!(output, "{}", line)?;
                log_failure(command, result.as_ref().err());
                result.is_ok()
            }
            BatchCommand::ApplyInterest => {
                let adjustments = self.controller.apply_interest_to_all();
                report::write_interest_report(output, &adjustments)?;
                true
            }
        };

        Ok(if succeeded {
            LineOutcome::Succeeded
        } else {
            LineOutcome::Failed
        })
    }
}

fn account_balance(result: &Result<Account, BankError>) -> Option<Decimal> {
    result.as_ref().ok().map(|account| account.balance())
}

fn log_failure(command: &BatchCommand, error: Option<&BankError>) {
    match error {
        Some(e) if e.is_business_rule() => debug!(command = ?command, error = %e, "command rejected"),
        Some(e) => warn!(command = ?command, error = %e, "command failed"),
        None => {}
    }
}

/// The argument printed in the ID column of an invalid-arguments line
///
/// For `open` the ID is the second argument (after the type tag).
fn invalid_target<'s>(kind: CommandKind, args: &[&'s str]) -> &'s str {
    let index = if kind == CommandKind::Open { 1 } else { 0 };
    args.get(index).copied().unwrap_or("")
}
