//! File-backed ledger persistence
//!
//! Reads and writes the flat ledger file, one account per line with
//! delimiter-separated fields `id, typeChar, pin, balance`. Delegates the record
//! shape to the ledger_format module.
//!
//! # Error Handling
//!
//! - A missing ledger file loads as an empty ledger
//! - Malformed lines are skipped with a warning; they never abort the load
//! - Unreadable or unwritable files are returned as `BankError::IoError`
//!
//! # Saving
//!
//! The existing file is renamed to `<path>.old` before the new file is written,
//! so a crash mid-write leaves the previous ledger recoverable. The backup is
//! removed once the write has been synced, unless `keep_backup` is set.

use crate::io::ledger_format::{convert_ledger_record, LedgerRecord, LEDGER_FIELDS};
use crate::types::{Account, BankError};
use csv::{QuoteStyle, ReaderBuilder, Terminator, Trim, WriterBuilder};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default field delimiter (tab)
pub const DEFAULT_DELIMITER: u8 = b'\t';

/// Suffix appended to the ledger path for the pre-save backup
pub const BACKUP_SUFFIX: &str = ".old";

/// Location and format of the ledger file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerFile {
    /// Path of the ledger file
    pub path: PathBuf,

    /// Single-byte field delimiter
    pub delimiter: u8,

    /// Keep `<path>.old` after a successful save
    pub keep_backup: bool,
}

impl LedgerFile {
    /// Create a ledger file config with the default (tab) delimiter
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LedgerFile {
            path: path.into(),
            delimiter: DEFAULT_DELIMITER,
            keep_backup: false,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_keep_backup(mut self, keep_backup: bool) -> Self {
        self.keep_backup = keep_backup;
        self
    }

    /// Path of the backup written before each save (`<path>.old`)
    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    /// Load every well-formed account from the ledger file
    ///
    /// Lines with a field count other than four, or with an invalid type tag,
    /// PIN or balance, are skipped. Duplicate IDs are not detected here; the
    /// registry rejects them when the accounts are registered.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Account>)` - Accounts in file order (empty if the file is missing)
    /// * `Err(BankError)` - If the file exists but cannot be read
    pub fn load(&self) -> Result<Vec<Account>, BankError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let backup = self.backup_path();
                if backup.exists() {
                    warn!(
                        path = %self.path.display(),
                        backup = %backup.display(),
                        "ledger file not found but a backup exists, starting empty"
                    );
                } else {
                    info!(path = %self.path.display(), "ledger file not found, starting empty");
                }
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(file);

        let mut accounts = Vec::new();
        let mut skipped = 0usize;

        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    warn!(error = %BankError::from(e), "skipping unreadable ledger line");
                    skipped += 1;
                    continue;
                }
            };
            let line = record.position().map(|pos| pos.line());

            if record.len() != LEDGER_FIELDS {
                warn!(
                    line,
                    fields = record.len(),
                    "skipping ledger line: expected {} fields",
                    LEDGER_FIELDS
                );
                skipped += 1;
                continue;
            }

            let converted = record
                .deserialize::<LedgerRecord>(None)
                .map_err(BankError::from)
                .and_then(convert_ledger_record);

            match converted {
                Ok(account) => accounts.push(account),
                Err(e) => {
                    warn!(line, error = %e, "skipping malformed ledger line");
                    skipped += 1;
                }
            }
        }

        debug!(
            path = %self.path.display(),
            loaded = accounts.len(),
            skipped,
            "ledger file read"
        );
        Ok(accounts)
    }

    /// Write the given accounts to the ledger file
    ///
    /// Renames any existing ledger to the backup path first, then writes one
    /// line per account in the order given. Only a backup made by this save is
    /// removed afterwards; a backup left by an interrupted earlier save is kept.
    pub fn save<'a, I>(&self, accounts: I) -> Result<(), BankError>
    where
        I: IntoIterator<Item = &'a Account>,
    {
        let backup = self.backup_path();
        let backed_up = if self.path.exists() {
            fs::rename(&self.path, &backup)?;
            debug!(backup = %backup.display(), "previous ledger moved to backup");
            true
        } else {
            if backup.exists() {
                warn!(
                    backup = %backup.display(),
                    "leaving backup from an earlier save in place"
                );
            }
            false
        };

        let file = File::create(&self.path)?;
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);

        let mut written = 0usize;
        for account in accounts {
            writer.serialize(LedgerRecord::from(account))?;
            written += 1;
        }

        let file = writer
            .into_inner()
            .map_err(|e| BankError::from(e.into_error()))?;
        file.sync_all()?;

        if backed_up && !self.keep_backup {
            remove_if_exists(&backup)?;
        }

        info!(path = %self.path.display(), accounts = written, "ledger saved");
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> Result<(), BankError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
