//! Benchmark suite for batch replay and ledger persistence
//!
//! Uses the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```
//!
//! Scripts and ledgers are generated in memory for each size. Scripts mix
//! opens, deposits, withdrawals (some failing), closes and a trailing
//! apply-interest command.

use bank_ledger::{
    Account, AccountKind, AccountRegistry, BatchInterpreter, LedgerFile, TransactionController,
};
use rust_decimal::Decimal;
use std::fmt::Write;
use std::io::Cursor;
use tempfile::TempDir;

const SIZES: &[usize] = &[100, 1_000, 10_000];

fn main() {
    divan::main();
}

fn generate_script(commands: usize) -> String {
    let accounts = (commands / 10).max(1);
    let mut script = String::new();
    for id in 0..accounts {
        let _ = writeln!(script, "o {} {} 1234 {}.00", ['s', 'x', 'c'][id % 3], id, 1000 + id);
    }
    for n in 0..commands {
        let id = n % accounts;
        let _ = match n % 4 {
            0 => writeln!(script, "d {} {}.25", id, n % 500),
            1 => writeln!(script, "w {} {}.50", id, n % 700),
            2 => writeln!(script, "w {} 999999", id),
            _ => writeln!(script, "x ignored line"),
        };
    }
    for id in (0..accounts).step_by(7) {
        let _ = writeln!(script, "c {}", id);
    }
    script.push_str("a\n");
    script
}

fn generate_registry(accounts: usize) -> AccountRegistry {
    (0..accounts as u32)
        .map(|id| {
            let kind = AccountKind::ALL[id as usize % AccountKind::ALL.len()];
            Account::new(kind, id, 1234, Decimal::new(100_000 + i64::from(id), 2))
        })
        .collect()
}

/// Replay a generated script against an empty controller
#[divan::bench(args = SIZES)]
fn replay_script(bencher: divan::Bencher, commands: usize) {
    let script = generate_script(commands);

    bencher.bench_local(|| {
        let controller = TransactionController::new(AccountRegistry::new());
        let mut output = Vec::new();
        BatchInterpreter::new(&controller)
            .run_script(Cursor::new(script.as_bytes()), &mut output)
            .expect("Replay failed");
        output
    });
}

/// Save then load a ledger of the given number of accounts
#[divan::bench(args = SIZES)]
fn save_and_load_ledger(bencher: divan::Bencher, accounts: usize) {
    let registry = generate_registry(accounts);
    let dir = TempDir::new().expect("Failed to create temp dir");
    let ledger = LedgerFile::new(dir.path().join("ledger.tsv"));

    bencher.bench_local(|| {
        registry.save(&ledger).expect("Save failed");
        AccountRegistry::load(&ledger).expect("Load failed")
    });
}
