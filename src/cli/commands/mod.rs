pub mod calendar;
pub mod entry;
pub mod report;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;
use crate::domain::EntryCategory;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let definitions = entry::definitions()
        .into_iter()
        .chain(report::definitions())
        .chain(calendar::definitions())
        .chain(system::definitions());
    for entry in definitions {
        registry.register(entry);
    }
}

pub(crate) fn parse_category(raw: &str) -> Result<EntryCategory, CommandError> {
    Ok(raw.parse::<EntryCategory>()?)
}

pub(crate) fn expect_args(
    args: &[&str],
    range: std::ops::RangeInclusive<usize>,
    usage: &str,
) -> Result<(), CommandError> {
    if range.contains(&args.len()) {
        Ok(())
    } else {
        Err(CommandError::InvalidArguments(format!("usage: {usage}")))
    }
}
