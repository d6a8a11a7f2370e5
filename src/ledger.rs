use crate::entry::{Entry, EntryKind};
use crate::errors::LedgerError;
use chrono::NaiveDateTime;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Totals over every entry recorded in a ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    /// The sum of all credit amounts.
    pub credits: f64,

    /// The sum of all debit amounts.
    pub debits: f64,

    /// Credits minus debits.
    pub balance: f64,
}

impl Summary {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut summary = entries
            .into_iter()
            .fold(Summary::default(), |mut acc, entry| {
                match entry.kind() {
                    EntryKind::Credit => acc.credits += entry.amount(),
                    EntryKind::Debit => acc.debits += entry.amount(),
                }
                acc
            });
        summary.balance = summary.credits - summary.debits;
        summary
    }
}

/// A Ledger records credits and debits in a single JSON data file.
///
/// The data file is the only source of truth. Every operation reads the
/// whole file, and every mutation rewrites the whole file, so a Ledger holds
/// nothing besides the path it is bound to.
#[derive(Clone, Debug)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Binds a Ledger to the data file at the provided path.
    ///
    /// Missing parent directories are created, and if the data file itself
    /// does not exist an empty one is written. An existing data file is left
    /// untouched.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let ledger = Self { path: path.into() };

        if let Some(parent) = ledger.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tracing::debug!(dir = %parent.display(), "creating data directory");
                fs::create_dir_all(parent).map_err(|err| LedgerError::io(parent, err))?;
            }
        }

        if !ledger.path.exists() {
            tracing::debug!(path = %ledger.path.display(), "initializing empty data file");
            ledger.write_entries(&[])?;
        }

        Ok(ledger)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records a new entry and returns it.
    ///
    /// The kind is matched against "entrada" and "saida" ignoring case and
    /// surrounding whitespace, and the amount must be positive. Both are
    /// checked before the data file is touched, so a rejected entry never
    /// changes the ledger. When no timestamp is provided the current local
    /// time is used.
    pub fn add(
        &self,
        kind: &str,
        description: &str,
        amount: f64,
        timestamp: Option<NaiveDateTime>,
    ) -> Result<Entry, LedgerError> {
        let kind: EntryKind = kind.parse()?;
        let entry = Entry::new(kind, description, amount, timestamp)?;

        let mut entries = self.read_entries()?;
        entries.push(entry.clone());
        self.write_entries(&entries)?;

        tracing::info!(
            kind = %entry.kind(),
            amount = entry.amount(),
            total_entries = entries.len(),
            "recorded entry"
        );
        Ok(entry)
    }

    /// Returns every recorded entry in the order it was added.
    pub fn list(&self) -> Result<Vec<Entry>, LedgerError> {
        self.read_entries()
    }

    /// Computes the credit, debit, and balance totals from the data file.
    pub fn summarize(&self) -> Result<Summary, LedgerError> {
        Ok(Summary::from_entries(&self.read_entries()?))
    }

    /// Removes every entry from the ledger.
    pub fn clear(&self) -> Result<(), LedgerError> {
        self.write_entries(&[])?;
        tracing::info!(path = %self.path.display(), "cleared all entries");
        Ok(())
    }

    fn read_entries(&self) -> Result<Vec<Entry>, LedgerError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "data file disappeared, treating as empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(LedgerError::io(&self.path, err)),
        };

        // A partially valid file is as bad as an unreadable one, so the first
        // bad record fails the whole read.
        let entries: Vec<Entry> =
            serde_json::from_str(&raw).map_err(|err| LedgerError::corrupt(&self.path, err))?;
        if let Some(position) = entries.iter().position(|entry| !entry.is_valid()) {
            return Err(LedgerError::corrupt(
                &self.path,
                format!("entry {} has a non-positive value", position + 1),
            ));
        }

        tracing::debug!(path = %self.path.display(), entries = entries.len(), "read data file");
        Ok(entries)
    }

    /// Serializes the entries to a sibling temporary file and renames it over
    /// the data file, so readers only ever see a complete file.
    fn write_entries(&self, entries: &[Entry]) -> Result<(), LedgerError> {
        let mut data = serde_json::to_vec_pretty(entries)
            .map_err(|err| LedgerError::io(&self.path, io::Error::from(err)))?;
        data.push(b'\n');

        let tmp_path = self.tmp_path();
        let result = fs::File::create(&tmp_path)
            .and_then(|mut file| {
                file.write_all(&data)?;
                file.sync_all()
            })
            .and_then(|_| fs::rename(&tmp_path, &self.path));

        if let Err(err) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(LedgerError::io(&self.path, err));
        }

        tracing::debug!(path = %self.path.display(), entries = entries.len(), "wrote data file");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl TryFrom<PathBuf> for Ledger {
    type Error = LedgerError;

    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        Ledger::open(path)
    }
}
