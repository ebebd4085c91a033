//! Batch script replay: command parsing, execution and report formatting

pub mod command;
pub mod interpreter;
pub mod report;

pub use command::{split_line, BatchCommand, CommandKind, ScriptLine};
pub use interpreter::{BatchInterpreter, BatchSummary, LineOutcome};
