pub mod entry;
pub mod ledger;

pub use entry::{parse_entry_date, Direction, Entry, EntryCategory, EntryId, UnknownCategory};
pub use ledger::Ledger;
