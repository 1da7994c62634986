use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::Config;
use crate::utils::build_info;

const CONFIG_USAGE: &str = "config [key [value]]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("config", "Show or change settings", CONFIG_USAGE, cmd_config),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::section("Configuration");
            for key in Config::KEYS {
                output::info(format!(
                    "  {:<14} {}",
                    key,
                    context.config.get(key).unwrap_or_default()
                ));
            }
            output::info(format!("  file: {}", context.config_manager.path().display()));
            Ok(())
        }
        [key] => {
            let value = context.config.get(key).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "unknown setting `{key}` (expected one of {})",
                    Config::KEYS.join(", ")
                ))
            })?;
            output::info(format!("{key} = {value}"));
            Ok(())
        }
        [key, value @ ..] => set_config_value(context, key, &value.join(" ")),
    }
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;
    context.config_manager.save(&updated)?;

    if updated.storage_key != context.config.storage_key {
        let ledger = context.store.switch_key(updated.storage_key.clone());
        output::info(format!(
            "Now using `{}` ({} entries).",
            updated.storage_key,
            ledger.len()
        ));
    }
    output::apply_config(&updated);
    context.config = updated;
    output::success("Configuration updated.");
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Finance Tracker {}", meta.version));
    output::info(format!("  Build hash : {} ({})", meta.git_hash, meta.git_status));
    output::info(format!("  Built at   : {}", meta.timestamp));
    output::info(format!("  Target     : {}", meta.target));
    output::info(format!("  Profile    : {}", meta.profile));
    output::info(format!("  Rustc      : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }
    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
