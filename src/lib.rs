pub mod args;
pub mod entry;
pub mod errors;
pub mod ledger;
pub mod report;

pub use entry::{Entry, EntryKind};
pub use errors::{ExportError, LedgerError};
pub use ledger::{Ledger, Summary};
