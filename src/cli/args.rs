use crate::io::{LedgerFile, DEFAULT_DELIMITER};
use clap::Parser;
use std::path::PathBuf;

/// Replay banking commands against a tab-delimited account ledger
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Replay banking commands against an account ledger", long_about = None)]
pub struct CliArgs {
    /// Ledger file holding one account per line
    #[arg(value_name = "LEDGER", help = "Path to the ledger file (created if missing)")]
    pub ledger: PathBuf,

    /// Batch command script; without one the current ledger is printed
    #[arg(value_name = "BATCH", help = "Path to a batch command script")]
    pub batch: Option<PathBuf>,

    /// Ledger field delimiter
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        default_value = "tab",
        value_parser = parse_delimiter,
        help = "Ledger field delimiter: 'tab' or a single ASCII character"
    )]
    pub delimiter: u8,

    /// Keep the `.old` backup after saving
    #[arg(long = "keep-backup", help = "Keep the previous ledger as <LEDGER>.old")]
    pub keep_backup: bool,
}

impl CliArgs {
    /// Build the ledger file settings from the parsed arguments
    pub fn to_ledger_file(&self) -> LedgerFile {
        LedgerFile::new(self.ledger.clone())
            .with_delimiter(self.delimiter)
            .with_keep_backup(self.keep_backup)
    }
}

/// Parse a `--delimiter` value
///
/// Accepts `tab`, a literal `\t`, or any single ASCII character other than a
/// newline.
fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => return Ok(DEFAULT_DELIMITER),
        _ => {}
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() && c != '\n' && c != '\r' => Ok(c as u8),
        _ => Err(format!(
            "delimiter must be 'tab' or a single ASCII character, got '{}'",
            value
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::ledger_only(&["program", "bank.txt"], None)]
    #[case::with_batch(&["program", "bank.txt", "commands.txt"], Some("commands.txt"))]
    fn test_positional_arguments(#[case] args: &[&str], #[case] batch: Option<&str>) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.ledger, PathBuf::from("bank.txt"));
        assert_eq!(parsed.batch, batch.map(PathBuf::from));
    }

    #[rstest]
    #[case::default(&["program", "bank.txt"], b'\t')]
    #[case::named_tab(&["program", "--delimiter", "tab", "bank.txt"], b'\t')]
    #[case::escaped_tab(&["program", "--delimiter", "\\t", "bank.txt"], b'\t')]
    #[case::comma(&["program", "--delimiter", ",", "bank.txt"], b',')]
    #[case::pipe(&["program", "--delimiter=|", "bank.txt"], b'|')]
    fn test_delimiter_parsing(#[case] args: &[&str], #[case] expected: u8) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.delimiter, expected);
    }

    #[test]
    fn test_to_ledger_file() {
        let parsed =
            CliArgs::try_parse_from(["program", "--delimiter", ",", "--keep-backup", "bank.txt"])
                .unwrap();

        let ledger = parsed.to_ledger_file();

        assert_eq!(ledger.path, PathBuf::from("bank.txt"));
        assert_eq!(ledger.delimiter, b',');
        assert!(ledger.keep_backup);
    }

    #[rstest]
    #[case::missing_ledger(&["program"])]
    #[case::long_delimiter(&["program", "--delimiter", "ab", "bank.txt"])]
    #[case::non_ascii_delimiter(&["program", "--delimiter", "é", "bank.txt"])]
    #[case::too_many_positionals(&["program", "a", "b", "c"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
