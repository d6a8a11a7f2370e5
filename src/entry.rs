use crate::errors::LedgerError;
use chrono::{DateTime, Local, NaiveDateTime, ParseResult, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timestamps are stored and accepted with second precision, without an
/// offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum EntryKind {
    /// Incoming funds. Credits increase the balance of the ledger.
    #[serde(rename = "entrada")]
    Credit,

    /// Outgoing funds. Debits decrease the balance of the ledger.
    #[serde(rename = "saida")]
    Debit,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Credit => "entrada",
            EntryKind::Debit => "saida",
        }
    }

    /// The sign used when displaying an amount of this kind.
    pub fn sign(&self) -> char {
        match self {
            EntryKind::Credit => '+',
            EntryKind::Debit => '-',
        }
    }
}

impl FromStr for EntryKind {
    type Err = LedgerError;

    /// Parses a kind the way a user would type it: surrounding whitespace
    /// and letter case are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entrada" => Ok(EntryKind::Credit),
            "saida" => Ok(EntryKind::Debit),
            _ => Err(LedgerError::InvalidKind(s.to_string())),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded credit or debit.
///
/// Entries are only ever built through [`Entry::new`], which enforces that
/// the amount is positive, or deserialized from a data file and checked
/// with [`Entry::is_valid`] before being handed out.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Entry {
    kind: EntryKind,
    description: String,
    #[serde(rename = "value")]
    amount: f64,
    #[serde(with = "timestamp")]
    timestamp: NaiveDateTime,
}

impl Entry {
    pub fn new(
        kind: EntryKind,
        description: &str,
        amount: f64,
        timestamp: Option<NaiveDateTime>,
    ) -> Result<Self, LedgerError> {
        if !is_valid_amount(amount) {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let moment = timestamp.unwrap_or_else(|| Local::now().naive_local());
        Ok(Self {
            kind,
            description: description.trim().to_string(),
            amount,
            timestamp: moment.with_nanosecond(0).unwrap_or(moment),
        })
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub(crate) fn is_valid(&self) -> bool {
        is_valid_amount(self.amount)
    }
}

fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

pub fn parse_timestamp(value: &str) -> ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
}

/// Parses a timestamp read back from a data file. Besides the local format
/// written by this crate, RFC 3339 timestamps with an offset are accepted and
/// kept as the wall-clock time they name, dropping the offset.
fn parse_stored_timestamp(value: &str) -> ParseResult<NaiveDateTime> {
    parse_timestamp(value).or_else(|err| {
        DateTime::parse_from_rfc3339(value.trim())
            .map(|moment| moment.naive_local())
            .map_err(|_| err)
    })
}

pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_stored_timestamp(&raw)
            .map_err(|err| de::Error::custom(format!("invalid timestamp {:?}: {}", raw, err)))
    }
}
