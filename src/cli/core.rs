//! Shell context, dispatch, and the helpers command handlers share.

use std::io;

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;

use crate::{
    config::{Config, ConfigManager},
    core::{
        finance_store::{FinanceStore, LoadReport, LoadSource},
        services::ServiceError,
        utils::PathResolver,
    },
    currency::{format_currency_value, CurrencyCode, LocaleConfig},
    domain::{find_by_name, Category, CategoryId, MonthKey, Transaction},
    errors::FinanceError,
    storage::JsonStorage,
};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::io as cli_io;
use super::output::{self, OutputPreferences};
pub use crate::errors::CliError;

/// Characters of a transaction id shown in listings and accepted as a prefix.
pub const SHORT_ID_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: FinanceStore,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        if mode == CliMode::Script {
            colored::control::set_override(false);
            output::set_preferences(OutputPreferences { plain_mode: true });
        }

        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let store = open_store(&config_manager, &config)?;
        let context = Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            store,
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        };
        context.report_load(context.store.load_report());
        Ok(context)
    }

    pub(crate) fn prompt(&self) -> String {
        format!("finance({})> ", self.store.slot())
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(definition) = self.registry.get(command) {
            let handler = definition.handler;
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Tokenizes and dispatches one input line.
    pub(crate) fn execute_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        self.last_command = Some(line.trim().to_string());
        tracing::debug!(command = %command, args = args.len(), "dispatching command");

        let control = self.dispatch(&command, raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    /// Runs one line, reporting command failures in place. Returns whether
    /// the session is still running.
    pub(crate) fn step(&mut self, line: &str) -> Result<bool, CliError> {
        if let Err(err) = self.execute_line(line) {
            self.report_error(err)?;
        }
        Ok(self.running)
    }

    /// Feeds lines until input ends or a command closes the session.
    pub(crate) fn run_lines<I>(&mut self, lines: I) -> Result<(), CliError>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        for line in lines {
            if !self.step(&line?)? {
                break;
            }
        }
        Ok(())
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    /// Asks before destructive actions. Scripts have no one to ask.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        self.confirm("Exit shell?").map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn report_load(&self, report: &LoadReport) {
        if let LoadSource::Seeded { reason } = &report.source {
            cli_io::print_info(format!("Started with default data ({}).", reason));
        }
        for warning in &report.warnings {
            cli_io::print_warning(warning);
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager
            .save(&self.config)
            .map_err(CommandError::from)
    }

    /// Reopens the store after the slot or seed policy changed.
    pub(crate) fn reopen_store(&mut self) -> CommandResult {
        self.store = open_store(&self.config_manager, &self.config)?;
        self.report_load(self.store.load_report());
        Ok(())
    }

    pub(crate) fn money(&self, amount: f64) -> String {
        format_currency_value(
            amount,
            &CurrencyCode::new(self.config.currency.as_str()),
            &LocaleConfig::from_tag(&self.config.locale),
        )
    }

    /// Parses an optional `YYYY-MM` argument, defaulting to the current month.
    pub(crate) fn month_arg(&self, raw: Option<&str>) -> Result<MonthKey, CommandError> {
        match raw {
            Some(value) => value.parse::<MonthKey>().map_err(CommandError::from),
            None => Ok(MonthKey::current()),
        }
    }

    /// Finds a transaction by full id or unique id prefix.
    pub(crate) fn resolve_transaction(&self, token: &str) -> Result<&Transaction, CommandError> {
        let needle = token.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(CommandError::InvalidArguments(
                "transaction identifier missing".into(),
            ));
        }
        let mut matches = self
            .store
            .transactions()
            .iter()
            .filter(|txn| txn.id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(txn),
            (Some(_), Some(_)) => Err(CommandError::InvalidArguments(format!(
                "transaction id `{}` is ambiguous, use more characters",
                token
            ))),
            (None, _) => Err(CommandError::InvalidArguments(format!(
                "no transaction with id `{}`",
                token
            ))),
        }
    }

    /// Finds a category by id, falling back to a case-insensitive name match.
    pub(crate) fn resolve_category(&self, token: &str) -> Result<&Category, CommandError> {
        let id = CategoryId::new(token.trim());
        self.store
            .category(&id)
            .or_else(|| find_by_name(self.store.categories(), token))
            .ok_or_else(|| CommandError::InvalidArguments(format!("no category `{}`", token)))
    }

    pub(crate) fn category_name(&self, id: &CategoryId) -> String {
        self.store
            .category(id)
            .map(|category| category.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

fn open_store(config_manager: &ConfigManager, config: &Config) -> Result<FinanceStore, FinanceError> {
    let storage = JsonStorage::new(Some(PathResolver::store_dir_in(
        config_manager.base_dir(),
    )))?;
    FinanceStore::open_with(Box::new(storage), &config.slot, config.seed_policy())
}

pub(crate) fn short_id(transaction: &Transaction) -> String {
    transaction.id.to_string().chars().take(SHORT_ID_LEN).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(err) => CommandError::Core(err),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            CommandError::InvalidArguments(message) => CliError::Input(message),
            other => CliError::Command(other.to_string()),
        }
    }
}

#[cfg(test)]
pub(crate) fn process_script(lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut context = ShellContext::new(CliMode::Script)?;
    context.run_lines(lines.iter().map(|line| Ok(line.to_string())))?;
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_home<T>(f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let temp = TempDir::new().unwrap();
        std::env::set_var("FINANCE_CORE_HOME", temp.path());
        let result = f();
        std::env::remove_var("FINANCE_CORE_HOME");
        result
    }

    #[test]
    fn quoted_arguments_keep_their_spaces() {
        with_home(|| {
            let context = process_script(&["category add \"Pet care\" '#abc' 40"]).unwrap();
            let pets = context.resolve_category("pet care").unwrap();
            assert_eq!(pets.color, "#abc");
            assert_eq!(context.last_command.as_deref(), Some("category add \"Pet care\" '#abc' 40"));
        });
    }

    #[test]
    fn unbalanced_quotes_are_skipped() {
        with_home(|| {
            let context = process_script(&[
                "transaction add expense 5 2024-01-01 food \"Lunch",
                "transaction add expense 5 2024-01-01 food Lunch",
            ])
            .unwrap();
            assert_eq!(context.store.transactions().len(), 7);
            assert!(context.running);
        });
    }

    #[test]
    fn exit_stops_remaining_lines() {
        with_home(|| {
            let context = process_script(&[
                "exit",
                "transaction add expense 5 2024-01-01 food Lunch",
            ])
            .unwrap();
            assert!(!context.running);
            assert_eq!(context.store.transactions().len(), 6);
        });
    }

    #[test]
    fn config_rejects_oversized_chart_window() {
        with_home(|| {
            let context = process_script(&[
                "config set chart_months 4611686018427387903",
                "chart monthly 2023-12",
            ])
            .unwrap();
            assert_eq!(context.config.chart_months, 6);
            let saved = context.config_manager.load().unwrap();
            assert_eq!(saved.chart_months, 6);
        });
    }

    #[test]
    fn script_adds_transaction_and_persists() {
        with_home(|| {
            let context = process_script(&[
                "transaction add expense 20 2024-02-01 food \"Team lunch\"",
                "exit",
            ])
            .unwrap();
            assert_eq!(context.store.transactions().len(), 7);

            let reopened = ShellContext::new(CliMode::Script).unwrap();
            assert!(reopened
                .store
                .transactions()
                .iter()
                .any(|txn| txn.description == "Team lunch" && txn.amount == -20.0));
        });
    }

    #[test]
    fn invalid_input_leaves_store_untouched() {
        with_home(|| {
            let context = process_script(&[
                "category add \"\" fff 10",
                "category add Pets blue 10",
                "transaction add expense abc 2024-02-01 food Lunch",
            ])
            .unwrap();
            assert_eq!(context.store.categories().len(), 6);
            assert_eq!(context.store.transactions().len(), 6);
        });
    }

    #[test]
    fn transaction_prefix_resolution() {
        with_home(|| {
            let context = ShellContext::new(CliMode::Script).unwrap();
            let first = context.store.transactions()[0].clone();
            let found = context.resolve_transaction(&short_id(&first)).unwrap();
            assert_eq!(found.id, first.id);
            assert!(context.resolve_transaction("zzzz").is_err());
        });
    }

    #[test]
    fn categories_resolve_by_id_or_name() {
        with_home(|| {
            let context = ShellContext::new(CliMode::Script).unwrap();
            assert_eq!(context.resolve_category("food").unwrap().name, "Food & Dining");
            assert_eq!(
                context.resolve_category("food & dining").unwrap().id,
                CategoryId::new("food")
            );
            assert!(context.resolve_category("pets").is_err());
        });
    }

    #[test]
    fn config_slot_switch_reopens_store() {
        with_home(|| {
            let context = process_script(&[
                "config set seed_sample_data false",
                "config set slot household",
            ])
            .unwrap();
            assert_eq!(context.store.slot(), "household");
            assert!(context.store.transactions().is_empty());
            assert_eq!(context.store.categories().len(), 6);
        });
    }
}
