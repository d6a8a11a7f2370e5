use std::error::Error;
use std::fmt;
use std::fmt::Formatter;
use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

#[derive(Debug)]
pub enum LedgerError {
    /// The entry kind was neither "entrada" nor "saida".
    InvalidKind(String),

    /// The entry amount was zero, negative, or not a finite number.
    InvalidAmount(f64),

    /// The backing file exists but its contents could not be interpreted as
    /// a sequence of valid entries.
    CorruptStore { path: PathBuf, reason: String },

    /// The backing file or its parent directory could not be read, written,
    /// or created.
    Io { path: PathBuf, source: io::Error },
}

impl LedgerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LedgerError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        LedgerError::CorruptStore {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ExportError {
    LedgerError(LedgerError),
    SerializeError(csv::Error),
    EncodingError(FromUtf8Error),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::InvalidKind(kind) => write!(
                f,
                "invalid entry kind {:?}, expected 'entrada' or 'saida'",
                kind
            ),
            LedgerError::InvalidAmount(amount) => {
                write!(f, "entry amounts must be positive, got {}", amount)
            }
            LedgerError::CorruptStore { path, reason } => write!(
                f,
                "data file {} is corrupt and could not be read: {}",
                path.display(),
                reason
            ),
            LedgerError::Io { path, source } => {
                write!(f, "unable to access {}: {}", path.display(), source)
            }
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::LedgerError(err) => write!(f, "failed to load entries: {}", err),
            ExportError::SerializeError(err) => {
                write!(f, "failed to serialize entry record: {}", err)
            }
            ExportError::EncodingError(err) => write!(f, "failed to encode csv report: {}", err),
        }
    }
}

impl From<LedgerError> for ExportError {
    fn from(err: LedgerError) -> Self {
        ExportError::LedgerError(err)
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::SerializeError(err)
    }
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for ExportError {
    fn from(err: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        ExportError::SerializeError(csv::Error::from(err.into_error()))
    }
}

impl From<FromUtf8Error> for ExportError {
    fn from(err: FromUtf8Error) -> Self {
        ExportError::EncodingError(err)
    }
}

impl Error for LedgerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LedgerError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExportError::LedgerError(err) => Some(err),
            ExportError::SerializeError(err) => Some(err),
            ExportError::EncodingError(err) => Some(err),
        }
    }
}
