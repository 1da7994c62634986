use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::{
        services::MonthCursor,
        time::{Clock, SystemClock},
        utils::PathResolver,
        LedgerStore,
    },
    currency::month_title,
    storage::{BlobStore, JsonFileStore},
};

use super::commands;
use super::core::CliError;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can reach: the ledger, settings and the
/// month the calendar is focused on.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LedgerStore,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub cursor: MonthCursor,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Context backed by the on-disk layout under the resolved base directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = PathResolver::base_dir();
        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load()?;
        let storage = JsonFileStore::in_base(Some(base))?;
        Ok(Self::with_parts(
            mode,
            config_manager,
            config,
            Box::new(storage),
            Box::new(SystemClock),
        ))
    }

    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        storage: Box<dyn BlobStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        output::apply_config(&config);

        let store = LedgerStore::open(storage, config.storage_key.clone(), clock);
        let cursor = MonthCursor::containing(store.clock().today());

        Self {
            mode,
            registry,
            store,
            config_manager,
            config,
            cursor,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        }
    }

    pub fn prompt(&self) -> String {
        format!(
            "finance [{}]> ",
            month_title(self.cursor.year, self.cursor.month)
        )
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }
}
