use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::domain::MonthKey;
use crate::ledger::CURRENT_SCHEMA_VERSION;
use crate::utils::build_info;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new(
            "months",
            "List the months available for reports",
            "months",
            cmd_months,
        ),
        CommandDefinition::new(
            "reset",
            "Discard all data and restore the defaults",
            "reset",
            cmd_reset,
        ),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(definition) => help::print_command(definition),
            None => context.suggest_command(name),
        }
        return Ok(());
    }
    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output_section(format!("Finance Core {}", meta.version));
    io::print_info(format!("  Schema ver   : v{}", CURRENT_SCHEMA_VERSION));
    io::print_info(format!(
        "  Build hash   : {} ({})",
        meta.git_hash, meta.git_status
    ));
    io::print_info(format!("  Built at     : {}", meta.timestamp));
    io::print_info(format!("  Target       : {}", meta.target));
    io::print_info(format!("  Profile      : {}", meta.profile));
    Ok(())
}

fn cmd_months(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section("Months");
    for month in MonthKey::current().recent(context.config.month_picker_len) {
        io::print_info(format!("  {}  {}", month, month.label()));
    }
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm("Discard all transactions and categories?")? {
        io::print_info("Reset cancelled.");
        return Ok(());
    }
    context.store.reset()?;
    io::print_success(format!(
        "Store `{}` reset to default data.",
        context.store.slot()
    ));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
