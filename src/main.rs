//! Bank Ledger CLI
//!
//! Loads an account ledger, optionally replays a batch command script against
//! it, and saves the ledger back on exit.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- bank.txt commands.txt > report.txt
//! cargo run -- bank.txt
//! cargo run -- --delimiter , --keep-backup bank.csv commands.txt
//! RUST_LOG=debug cargo run -- bank.txt commands.txt
//! ```
//!
//! Without a batch script the current ledger is printed as a report.
//! Reports go to stdout; logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (unreadable ledger, missing batch script, failed save, etc.)

use bank_ledger::batch::report;
use bank_ledger::{cli, Bank, BankController, BankError, BatchInterpreter};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &cli::CliArgs) -> Result<(), BankError> {
    let bank = Bank::start(args.to_ledger_file())?;

    let stdout = std::io::stdout();
    let mut output = stdout.lock();
    match &args.batch {
        Some(script) => {
            BatchInterpreter::new(bank.controller()).run(script, &mut output)?;
        }
        None => {
            report::write_bank_data(&mut output, "Current", &bank.controller().all_accounts())?;
        }
    }

    bank.shutdown()
}
