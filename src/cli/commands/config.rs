use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;

use super::{split_action, CommandDefinition};

const USAGE: &str = "config [show|set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "Show or change preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return show(context);
    }
    let (action, rest) = split_action(args, USAGE)?;
    match action.as_str() {
        "show" => show(context),
        "set" => set(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`; usage: {}",
            other, USAGE
        ))),
    }
}

fn show(context: &ShellContext) -> CommandResult {
    output_section("Configuration");
    for (key, value) in context.config.entries() {
        io::print_info(format!("  {:<20} {}", key, value));
    }
    io::print_info(format!(
        "  {:<20} {}",
        "config file",
        context.config_manager.path().display()
    ));
    Ok(())
}

fn set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [key, value @ ..] = args else {
        return Err(CommandError::InvalidArguments(format!("usage: {}", USAGE)));
    };
    if value.is_empty() {
        return Err(CommandError::InvalidArguments(format!("usage: {}", USAGE)));
    }
    let previous = context.config.clone();
    context.config.set(key, &value.join(" "))?;
    context.persist_config()?;

    if previous.slot != context.config.slot
        || previous.seed_sample_data != context.config.seed_sample_data
    {
        context.reopen_store()?;
    }
    io::print_success(format!("Set {} to {}.", key, value.join(" ")));
    Ok(())
}
