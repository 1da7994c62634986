use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::currency::{format_date, format_signed};
use crate::domain::{Entry, EntryCategory, EntryId};

use super::{expect_args, parse_category};

pub const EMPTY_MESSAGE: &str = "Nenhum item adicionado ainda.";

const ADD_USAGE: &str = "add <income|fixed|variable> <name> <amount> [YYYY-MM-DD]";
const REMOVE_USAGE: &str = "remove <income|fixed|variable> <id>";
const LIST_USAGE: &str = "list [income|fixed|variable]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new("remove", "Delete an entry by id", REMOVE_USAGE, cmd_remove)
            .with_aliases(&["rm"]),
        CommandEntry::new("list", "Show recorded entries", LIST_USAGE, cmd_list)
            .with_aliases(&["ls"]),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 3..=4, ADD_USAGE)?;
    let category = parse_category(args[0])?;
    let amount = parse_amount(args[2]);
    let date = match args.get(3) {
        Some(date) => date.to_string(),
        None => context.store.clock().today().format("%Y-%m-%d").to_string(),
    };

    let entry = context.store.add_entry(category, args[1], amount, &date)?;
    output::success(format!(
        "{} added to {}: {} (id {})",
        entry.name,
        category.label(),
        describe(&entry, category),
        entry.id
    ));
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 2..=2, REMOVE_USAGE)?;
    let category = parse_category(args[0])?;
    let id: EntryId = args[1].parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a valid entry id", args[1]))
    })?;

    let removed = context.store.remove_entry(category, id)?;
    if removed.is_empty() {
        output::warning(format!("No entry with id {id} in {}.", category.label()));
    } else {
        let names: Vec<&str> = removed.iter().map(|entry| entry.name.as_str()).collect();
        output::success(format!(
            "Removed {} from {}.",
            names.join(", "),
            category.label()
        ));
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 0..=1, LIST_USAGE)?;
    let categories = match args.first() {
        Some(raw) => vec![parse_category(raw)?],
        None => EntryCategory::ALL.to_vec(),
    };

    let ledger = context.store.snapshot();
    for category in categories {
        output::section(category.label());
        for line in entry_lines(ledger.entries(category), category) {
            output::info(line);
        }
    }
    Ok(())
}

/// Amounts accept a decimal comma; anything unparseable is left for validation to reject.
fn parse_amount(raw: &str) -> f64 {
    raw.trim().replace(',', ".").parse().unwrap_or(f64::NAN)
}

fn describe(entry: &Entry, category: EntryCategory) -> String {
    format!(
        "{} on {}",
        format_signed(entry.amount, category.direction()),
        format_date(entry.date)
    )
}

pub(crate) fn entry_lines(entries: &[Entry], category: EntryCategory) -> Vec<String> {
    if entries.is_empty() {
        return vec![EMPTY_MESSAGE.to_string()];
    }
    entries
        .iter()
        .map(|entry| {
            format!(
                "  {:<24} {}  {:>16}  #{}",
                entry.name,
                format_date(entry.date),
                format_signed(entry.amount, category.direction()),
                entry.id
            )
        })
        .collect()
}
